//! # Observability Bootstrap
//!
//! Tracing subscriber setup for host applications and tests. The cache layer
//! itself only emits `tracing` events; installing a subscriber is the host's
//! choice, made once at process start.

use tracing::{warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    Text,
    /// Structured JSON output for log aggregation
    Json,
}

/// Install a global tracing subscriber.
///
/// `level` is the default directive; `RUST_LOG` still takes precedence where
/// set. Safe to call more than once: a second initialization is skipped with
/// a warning instead of failing, which keeps test suites happy.
pub fn init_logging(level: &str, format: LogFormat) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let initialized = match format {
        LogFormat::Json => Registry::default()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Text => Registry::default()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .try_init(),
    };

    if initialized.is_err() {
        warn!("Tracing subscriber already initialized, skipping initialization");
    }
}
