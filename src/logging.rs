//! Subscriber setup for applications embedding the optimizer.
//!
//! The library itself only emits `tracing` events. Binaries and test
//! harnesses that want to see them call [`init_logging`] once at startup.

use tracing_subscriber::{EnvFilter, fmt, fmt::time::ChronoUtc};

/// Logging configuration options
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset (e.g. "info,kensho=debug")
    pub level_filter: String,
    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,
    /// Prefix events with an ISO-8601 UTC timestamp
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level_filter: "info,kensho=info".to_string(),
            json: false,
            timestamps: true,
        }
    }
}

/// Installs a global `fmt` subscriber filtered by `RUST_LOG` or `config.level_filter`.
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level_filter))?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(ChronoUtc::new("%Y-%m-%dT%H:%M:%S%.3fZ".to_string()));

    match (config.json, config.timestamps) {
        (true, true) => builder.json().try_init(),
        (true, false) => builder.json().without_time().try_init(),
        (false, true) => builder.try_init(),
        (false, false) => builder.without_time().try_init(),
    }
}
