use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber.
///
/// Level comes from `RUST_LOG` (default `warn`); `--verbose` forces `debug`.
/// Table and JSON output go to stdout and stay free of log lines.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
