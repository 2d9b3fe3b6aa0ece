//! Structured logging with request context and filtered error stacks.
//!
//! ```
//! use ctxlog::{args, context, Arg, Context, LogConfig, Logger, MemorySink, Traced};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::with_sink(&LogConfig::default(), sink.clone()).unwrap();
//!
//! let ctx = context::with_value(&Context::background(), context::REQUEST_KEY, "r1");
//! logger
//!     .error(args!["Hello", "world", &ctx, true, Arg::error(Traced::msg("boom"))])
//!     .send();
//!
//! let record = &sink.records()[0];
//! assert_eq!(record.message.as_deref(), Some("Hello world"));
//! assert_eq!(record.get("id").unwrap(), "r1");
//! ```

pub mod config;
pub mod context;
pub mod event;
pub mod http;
pub mod logger;
pub mod observability;
pub mod stack;

pub use config::{ConfigError, LogConfig};
pub use context::{attach, detach, request_id, to_log_string, with_value, Context, ContextData};
pub use event::{build_event, build_formatted_event, Arg, Event, Level, Record};
pub use logger::global::{
    debug, debugf, default, error, errorf, fatal, fatalf, info, infof, init, panic, panicf,
    set_default, trace, tracef, warn, warnf,
};
pub use logger::{Logger, MemorySink, Sink, TracingSink};
pub use stack::{filter_stack, FrameFilter, HasStackTrace, StackFrame, Traced};
