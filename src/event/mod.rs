//! Structured events and the argument classifier.
//!
//! # Data Flow
//! ```text
//! call site args (args![...])
//!     → arg.rs Arg              Text | Error | Context | Flag | Value
//!     → builder.rs build_event  classify in call order, merge into Event
//!     → record.rs Event::send   stack filtering, Record → sink
//! ```
//!
//! # Design Decisions
//! - Classification never fails; unknown kinds become generic values
//! - Events are owned values; `send` consumes them

pub mod arg;
pub mod builder;
pub mod level;
pub mod record;

pub use arg::Arg;
pub use builder::{build_event, build_formatted_event, render_format};
pub use level::{Level, ParseLevelError};
pub use record::{Event, Record, ANY, ERROR, MSG, STACK, TIME_FORMAT};
