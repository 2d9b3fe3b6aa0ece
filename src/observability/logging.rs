//! Structured logging bootstrap.
//!
//! # Responsibilities
//! - Install the tracing subscriber the default sink forwards to
//! - JSON lines by default, console text when configured
//!
//! # Design Decisions
//! - The filter comes from the configured level only, never the environment
//! - A second initialization keeps the first subscriber

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ConfigError, LogConfig, ValidationError};
use crate::event::Level;

/// The subscriber filter directive for a minimum level.
pub fn filter_directive(level: Level) -> &'static str {
    match level {
        Level::Trace => "trace",
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warn => "warn",
        Level::Error | Level::Fatal | Level::Panic => "error",
        Level::Disabled => "off",
    }
}

/// Initialize the global tracing subscriber from `config`.
///
/// Fails only on an invalid level.
pub fn init_logging(config: &LogConfig) -> Result<(), ConfigError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|e: crate::event::ParseLevelError| {
            ConfigError::Validation(vec![ValidationError::InvalidLevel(e.0)])
        })?;

    let env_filter = EnvFilter::new(filter_directive(level));

    let result = if config.console {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(!config.no_color),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .flatten_event(true),
            )
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(Level::Info), "info");
        assert_eq!(filter_directive(Level::Fatal), "error");
        assert_eq!(filter_directive(Level::Disabled), "off");
    }

    #[test]
    fn test_init_rejects_invalid_level() {
        let config = LogConfig {
            level: "loud".to_string(),
            ..LogConfig::default()
        };
        assert!(init_logging(&config).is_err());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LogConfig::default();
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_ok());
    }
}
