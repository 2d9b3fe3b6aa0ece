//! Leveled logging front-end.
//!
//! # Data Flow
//! ```text
//! LogConfig
//!     → instance.rs Logger        level, stack mode, frame filter, sink
//!     → Logger::info(args) …      Event built by the classifier
//!     → Event::send               Record
//!     → sink.rs Sink              TracingSink (default) | MemorySink
//! ```
//!
//! # Design Decisions
//! - Loggers are constructed explicitly and passed around
//! - global.rs keeps one optional process-wide default behind a OnceLock

pub mod global;
pub mod instance;
pub mod sink;

pub use instance::Logger;
pub use sink::{MemorySink, Sink, TracingSink};
