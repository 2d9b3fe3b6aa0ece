//! The logger handle and its leveled entry points.

use std::fmt;
use std::sync::Arc;

use crate::config::{validate_config, ConfigError, LogConfig, ValidationError};
use crate::event::{build_event, build_formatted_event, Arg, Event, Level};
use crate::logger::sink::{Sink, TracingSink};
use crate::stack::FrameFilter;

struct Inner {
    level: Level,
    stack_on_error: bool,
    filter: FrameFilter,
    sink: Arc<dyn Sink>,
}

/// A leveled structured logger.
///
/// Cheap to clone; clones share level, stack mode, frame filter and sink.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// A logger forwarding to `tracing`.
    pub fn new(config: &LogConfig) -> Result<Self, ConfigError> {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// A logger emitting to `sink`.
    pub fn with_sink(config: &LogConfig, sink: Arc<dyn Sink>) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let level = config
            .level
            .parse::<Level>()
            .map_err(|e| ConfigError::Validation(vec![ValidationError::InvalidLevel(e.0)]))?;

        let filter = config
            .deny_paths
            .iter()
            .fold(FrameFilter::default(), |filter, marker| {
                filter.with_denied_path(marker.as_str())
            });

        Ok(Self::from_parts(level, config.stack, filter, sink))
    }

    pub fn from_parts(
        level: Level,
        stack_on_error: bool,
        filter: FrameFilter,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                level,
                stack_on_error,
                filter,
                sink,
            }),
        }
    }

    /// A logger sharing this one's sink and settings with another minimum level.
    pub fn with_level(&self, level: Level) -> Self {
        Self::from_parts(
            level,
            self.inner.stack_on_error,
            self.inner.filter.clone(),
            self.inner.sink.clone(),
        )
    }

    pub fn level(&self) -> Level {
        self.inner.level
    }

    /// Whether events at `level` are emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::Disabled && level >= self.inner.level
    }

    pub fn stack_on_error(&self) -> bool {
        self.inner.stack_on_error
    }

    pub fn frame_filter(&self) -> &FrameFilter {
        &self.inner.filter
    }

    pub(crate) fn sink(&self) -> &dyn Sink {
        &*self.inner.sink
    }

    /// An empty event at `level`.
    #[track_caller]
    pub fn event(&self, level: Level) -> Event {
        Event::new(self.clone(), level)
    }

    /// An event at `level` built from `args`.
    #[track_caller]
    pub fn log<I>(&self, level: Level, args: I) -> Event
    where
        I: IntoIterator<Item = Arg>,
    {
        build_event(self.event(level), args)
    }

    /// Render `format` with `args` and send at `level`.
    #[track_caller]
    pub fn logf<I>(&self, level: Level, format: &str, args: I)
    where
        I: IntoIterator<Item = Arg>,
    {
        build_formatted_event(self.event(level), format, args);
    }

    #[track_caller]
    pub fn trace<I: IntoIterator<Item = Arg>>(&self, args: I) -> Event {
        self.log(Level::Trace, args)
    }

    #[track_caller]
    pub fn debug<I: IntoIterator<Item = Arg>>(&self, args: I) -> Event {
        self.log(Level::Debug, args)
    }

    #[track_caller]
    pub fn info<I: IntoIterator<Item = Arg>>(&self, args: I) -> Event {
        self.log(Level::Info, args)
    }

    #[track_caller]
    pub fn warn<I: IntoIterator<Item = Arg>>(&self, args: I) -> Event {
        self.log(Level::Warn, args)
    }

    #[track_caller]
    pub fn error<I: IntoIterator<Item = Arg>>(&self, args: I) -> Event {
        self.log(Level::Error, args)
    }

    /// An event that panics with its message once sent. Stack is always on.
    #[track_caller]
    pub fn panic<I: IntoIterator<Item = Arg>>(&self, args: I) -> Event {
        self.log(Level::Panic, args)
    }

    /// An event that exits the process once sent. Stack is always on.
    #[track_caller]
    pub fn fatal<I: IntoIterator<Item = Arg>>(&self, args: I) -> Event {
        self.log(Level::Fatal, args)
    }

    #[track_caller]
    pub fn tracef<I: IntoIterator<Item = Arg>>(&self, format: &str, args: I) {
        self.logf(Level::Trace, format, args)
    }

    #[track_caller]
    pub fn debugf<I: IntoIterator<Item = Arg>>(&self, format: &str, args: I) {
        self.logf(Level::Debug, format, args)
    }

    #[track_caller]
    pub fn infof<I: IntoIterator<Item = Arg>>(&self, format: &str, args: I) {
        self.logf(Level::Info, format, args)
    }

    #[track_caller]
    pub fn warnf<I: IntoIterator<Item = Arg>>(&self, format: &str, args: I) {
        self.logf(Level::Warn, format, args)
    }

    #[track_caller]
    pub fn errorf<I: IntoIterator<Item = Arg>>(&self, format: &str, args: I) {
        self.logf(Level::Error, format, args)
    }

    #[track_caller]
    pub fn panicf<I: IntoIterator<Item = Arg>>(&self, format: &str, args: I) {
        self.logf(Level::Panic, format, args)
    }

    #[track_caller]
    pub fn fatalf<I: IntoIterator<Item = Arg>>(&self, format: &str, args: I) {
        self.logf(Level::Fatal, format, args)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.inner.level)
            .field("stack_on_error", &self.inner.stack_on_error)
            .field("filter", &self.inner.filter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::logger::sink::MemorySink;
    use crate::stack::{HasStackTrace, StackFrame};

    fn config(level: &str) -> LogConfig {
        LogConfig {
            level: level.to_string(),
            ..LogConfig::default()
        }
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = Logger::new(&config("loud")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_level_filtering() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(&config("warn"), sink.clone()).unwrap();

        logger.trace(args!["a"]).send();
        logger.debug(args!["b"]).send();
        logger.info(args!["c"]).send();
        logger.warn(args!["d"]).send();
        logger.error(args!["e"]).send();
        logger.infof("{}", args!["f"]);
        logger.errorf("{}", args!["g"]);

        let messages: Vec<_> = sink
            .records()
            .into_iter()
            .filter_map(|r| r.message)
            .collect();
        assert_eq!(messages, vec!["d", "e", "g"]);
    }

    #[test]
    fn test_disabled_level() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(&config("disabled"), sink.clone()).unwrap();
        logger.error(args!["nothing"]).send();
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_with_level_shares_sink() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(&config("error"), sink.clone()).unwrap();
        let verbose = logger.with_level(Level::Trace);

        verbose.trace(args!["shown"]).send();
        logger.trace(args!["hidden"]).send();
        assert_eq!(sink.take().len(), 1);
        assert_eq!(logger.level(), Level::Error);
    }

    #[test]
    fn test_caller_is_call_site() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(&config("trace"), sink.clone()).unwrap();

        let line = line!() + 1;
        logger.info(args!["here"]).send();

        let record = &sink.records()[0];
        assert_eq!(record.caller, format!("{}:{}", file!(), line));
    }

    #[test]
    fn test_panic_level_panics_after_send() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(&config("trace"), sink.clone()).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic(args!["boom"]).send();
        }));

        assert!(result.is_err());
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Panic);
        assert_eq!(records[0].message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_terminal_levels_force_stack() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(&config("trace"), sink).unwrap();

        assert!(logger.panic(args![]).stack_forced());
        assert!(logger.fatal(args![]).stack_forced());
        assert!(!logger.error(args![]).stack_forced());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("replica lagging")]
    struct ReplicaLag {
        frames: Vec<StackFrame>,
    }

    impl HasStackTrace for ReplicaLag {
        fn stack_trace(&self) -> &[StackFrame] {
            &self.frames
        }
    }

    #[test]
    fn test_registered_carrier_not_rewrapped() {
        let sink = Arc::new(MemorySink::new());
        let filter = FrameFilter::default().with_stack_carrier::<ReplicaLag>();
        let logger = Logger::from_parts(Level::Trace, true, filter, sink.clone());

        let err = ReplicaLag {
            frames: vec![
                StackFrame::new("/srv/app/src/db/replica.rs", 40, "(Replica).read", "app::db"),
                StackFrame::new("/rustc/library/std/src/rt.rs", 195, "lang_start", "std::rt"),
            ],
        };
        logger.error(args!["read failed", Arg::error(err)]).send();

        let record = &sink.records()[0];
        let err = record.error.as_ref().unwrap();
        assert!(err.downcast_ref::<ReplicaLag>().is_some());
        assert_eq!(
            record.stack,
            Some(vec!["db.read:/srv/app/src/db/replica.rs:40".to_string()])
        );
    }

    #[test]
    fn test_record_json() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(&config("trace"), sink.clone()).unwrap();
        logger.info(args!["Hello", 5]).str("component", "orders").send();

        let json: serde_json::Value = serde_json::from_str(&sink.records()[0].to_json()).unwrap();
        assert_eq!(json["level"], "info");
        assert_eq!(json["msg"], "Hello");
        assert_eq!(json["any"], 5);
        assert_eq!(json["component"], "orders");
        assert!(json.get("stack").is_none());
    }
}
