//! Tracing and logging support.
//!
//! The listing logs through `tracing`: one debug event per projected
//! listing, trace events for every hidden global set, and warnings for
//! permission tokens that could not be parsed. This module installs a
//! subscriber for applications that do not bring their own.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,

    /// Compact format without colors.
    Compact,

    /// JSON format (recommended for production).
    Json,
}

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter.
    ///
    /// If None, uses RUST_LOG environment variable or defaults to "info".
    pub level: Option<tracing::Level>,

    /// Output format.
    pub format: TracingFormat,

    /// Include timestamps in output.
    pub timestamps: bool,

    /// Include target module names in output.
    pub target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: TracingFormat::Pretty,
            timestamps: true,
            target: true,
        }
    }
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        match self.level {
            Some(level) => EnvFilter::new(level.to_string()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }
}

/// Initialize tracing subscriber with default settings.
///
/// Uses RUST_LOG environment variable for level filtering, e.g.
/// `RUST_LOG=globals_listing=trace` to see why global sets were hidden.
pub fn init_subscriber() {
    init_subscriber_with_config(TracingConfig::default());
}

/// Initialize tracing subscriber with custom configuration.
///
/// ```ignore
/// use globals_listing::tracing_support::{
///     init_subscriber_with_config, TracingConfig, TracingFormat,
/// };
///
/// init_subscriber_with_config(TracingConfig {
///     format: TracingFormat::Json,
///     ..Default::default()
/// });
/// ```
pub fn init_subscriber_with_config(config: TracingConfig) {
    let fmt = tracing_subscriber::fmt::layer().with_target(config.target);

    let layer = match (config.format, config.timestamps) {
        (TracingFormat::Pretty, true) => fmt.pretty().boxed(),
        (TracingFormat::Pretty, false) => fmt.pretty().without_time().boxed(),
        (TracingFormat::Compact, true) => fmt.compact().boxed(),
        (TracingFormat::Compact, false) => fmt.compact().without_time().boxed(),
        (TracingFormat::Json, true) => fmt.json().boxed(),
        (TracingFormat::Json, false) => fmt.json().without_time().boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.format, TracingFormat::Pretty);
        assert!(config.timestamps);
        assert!(config.target);
        assert!(config.level.is_none());
    }

    #[test]
    fn test_explicit_level_overrides_env() {
        let config = TracingConfig {
            level: Some(tracing::Level::DEBUG),
            ..Default::default()
        };
        assert_eq!(config.filter().to_string(), "debug");
    }
}
