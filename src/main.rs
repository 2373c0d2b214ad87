use clap::Parser;
use miette::Result;
use stockroom::cli::{Cli, Commands};
use stockroom::core::logging;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    logging::init(global.verbose, global.quiet);

    match cli.command {
        Commands::Component(cmd) => stockroom::cli::commands::component::run(cmd, &global),
        Commands::Supplier(cmd) => stockroom::cli::commands::supplier::run(cmd, &global),
        Commands::Link(args) => stockroom::cli::commands::link::run(args, &global),
        Commands::Order(cmd) => stockroom::cli::commands::order::run(cmd, &global),
        Commands::Shell(args) => stockroom::cli::commands::shell::run(args, &global),
        Commands::Completions(args) => stockroom::cli::commands::completions::run(args),
    }
}
