//! Logging setup for the binaries using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `CPM_SCHEDULE_LOG` environment variable
//! (`error`, `warn`, `info`, `debug`, `trace`) and defaults to `info`. Logs
//! go to stderr so stdout stays free for command output.

use tracing_subscriber::fmt;

pub const LOG_ENV_VAR: &str = "CPM_SCHEDULE_LOG";

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging() {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|s| parse_level_str(&s))
        .unwrap_or(tracing::Level::INFO);

    let _ = fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
