//! Log subscriber setup for the binary.
//!
//! Library code only emits `tracing` events; nothing is printed until
//! [`init`] installs a subscriber. Logs go to stderr so reports written to
//! stdout stay machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {reason}")]
    InitializationFailed { reason: String },
}

/// Maps the number of `-v` flags to a level name.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Default filter: this crate at the chosen level, HTTP internals at warn.
pub fn default_directives(verbosity: u8) -> String {
    format!("pomgraph={},reqwest=warn", level_for(verbosity))
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity.
pub fn init(verbosity: u8) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed {
            reason: e.to_string(),
        })
}
