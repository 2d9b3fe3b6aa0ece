//! The process-wide default logger and its free-function front-end.
//!
//! The default is set at most once. Until it is set, the first use installs a
//! logger with the default configuration forwarding to `tracing`.

use std::sync::{Arc, OnceLock};

use crate::config::{ConfigError, LogConfig};
use crate::event::{Arg, Event, Level};
use crate::logger::instance::Logger;
use crate::logger::sink::TracingSink;
use crate::stack::FrameFilter;

static DEFAULT: OnceLock<Logger> = OnceLock::new();

/// Install `logger` as the default.
///
/// Returns the logger back if a default is already in place.
pub fn set_default(logger: Logger) -> Result<(), Logger> {
    DEFAULT.set(logger)
}

/// Build a logger from `config` and install it as the default.
///
/// A config error is returned before anything is installed; an already
/// installed default is kept.
pub fn init(config: &LogConfig) -> Result<&'static Logger, ConfigError> {
    let logger = Logger::new(config)?;
    if set_default(logger).is_err() {
        tracing::warn!("default logger already initialized, keeping it");
    }
    Ok(default())
}

/// The default logger.
pub fn default() -> &'static Logger {
    DEFAULT.get_or_init(|| {
        let config = LogConfig::default();
        let level = config.level.parse().unwrap_or(Level::Debug);
        Logger::from_parts(level, config.stack, FrameFilter::default(), Arc::new(TracingSink))
    })
}

#[track_caller]
pub fn trace<I: IntoIterator<Item = Arg>>(args: I) -> Event {
    default().trace(args)
}

#[track_caller]
pub fn debug<I: IntoIterator<Item = Arg>>(args: I) -> Event {
    default().debug(args)
}

#[track_caller]
pub fn info<I: IntoIterator<Item = Arg>>(args: I) -> Event {
    default().info(args)
}

#[track_caller]
pub fn warn<I: IntoIterator<Item = Arg>>(args: I) -> Event {
    default().warn(args)
}

#[track_caller]
pub fn error<I: IntoIterator<Item = Arg>>(args: I) -> Event {
    default().error(args)
}

#[track_caller]
pub fn panic<I: IntoIterator<Item = Arg>>(args: I) -> Event {
    default().panic(args)
}

#[track_caller]
pub fn fatal<I: IntoIterator<Item = Arg>>(args: I) -> Event {
    default().fatal(args)
}

#[track_caller]
pub fn tracef<I: IntoIterator<Item = Arg>>(format: &str, args: I) {
    default().tracef(format, args)
}

#[track_caller]
pub fn debugf<I: IntoIterator<Item = Arg>>(format: &str, args: I) {
    default().debugf(format, args)
}

#[track_caller]
pub fn infof<I: IntoIterator<Item = Arg>>(format: &str, args: I) {
    default().infof(format, args)
}

#[track_caller]
pub fn warnf<I: IntoIterator<Item = Arg>>(format: &str, args: I) {
    default().warnf(format, args)
}

#[track_caller]
pub fn errorf<I: IntoIterator<Item = Arg>>(format: &str, args: I) {
    default().errorf(format, args)
}

#[track_caller]
pub fn panicf<I: IntoIterator<Item = Arg>>(format: &str, args: I) {
    default().panicf(format, args)
}

#[track_caller]
pub fn fatalf<I: IntoIterator<Item = Arg>>(format: &str, args: I) {
    default().fatalf(format, args)
}
