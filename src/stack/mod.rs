//! Error stack traces.
//!
//! # Data Flow
//! ```text
//! error argument
//!     → trace.rs Traced          capture the call stack when the chain has none
//!     → trace.rs find_stack_trace walk Error::source to the first trace
//!     → filter.rs FrameFilter     drop last frame, self frames, HTTP-stack frames
//!     → frame.rs render           "<package>.<function>:<file>:<line>"
//! ```

pub mod filter;
pub mod frame;
pub mod trace;

pub use filter::{filter_stack, FrameFilter};
pub use frame::{funcname, pkgname, StackFrame};
pub use trace::{
    downcast_carrier, find_stack_trace, find_stack_trace_with, HasStackTrace, TraceCarrier, Traced,
};
