use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Applies when `RUST_LOG` is unset; keeps diagnostics quiet next to the
/// operator-facing console output.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global subscriber. Diagnostics go to stderr so stdout only
/// carries console messages.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    if let Err(error) = installed {
        eprintln!("warning: tracing subscriber already installed ({error})");
    }
}
