//! Tracing subscriber setup for the `symbiot` binary.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;
use crate::error::AppError;

/// Environment variable holding the log filter (e.g. `symbiot_core=debug`).
pub const LOG_ENV: &str = "SYMBIOT_LOG";

/// Install the global subscriber.
///
/// Filtering follows `SYMBIOT_LOG`, then `RUST_LOG`, then `info`. Logs go to
/// stderr so stdout only carries replies.
pub fn init_tracing(format: LogFormat) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder
            .json()
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .try_init(),
    };

    installed.map_err(|e| AppError::Internal(format!("Failed to install tracing subscriber: {}", e)))
}
