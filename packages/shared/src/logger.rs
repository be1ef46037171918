//! Logging setup utilities for the Tuganire client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the client library crate and the binary itself.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// Logs go to stderr so they do not interleave with the chat view on stdout.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "tuganire_client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use tuganire_shared::logger::setup_logger;
///
/// setup_logger("tuganire_client", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "tuganire_client={},tuganire_shared={},{}={}",
                    default_log_level,
                    default_log_level,
                    binary_name.replace('-', "_"),
                    default_log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
