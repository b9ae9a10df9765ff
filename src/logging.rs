//! Logging configuration for SqlQuest.
//!
//! Logs go to stderr so they compose with service supervisors and test
//! output capture.

use tracing_subscriber::EnvFilter;

/// Initializes logging for the service.
///
/// The filter is taken from `RUST_LOG` when set, defaulting to `info`.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
