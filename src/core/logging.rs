//! Tracing/logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize logging for the process.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, `verbose` lowers
/// the level to debug and `quiet` raises it to errors. Logs go to stderr so they
/// never mix with command output. Subsequent calls are no-ops.
pub fn init(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stockroom={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
