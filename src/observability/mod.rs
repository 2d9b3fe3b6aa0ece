//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Logger (TracingSink)
//!     → tracing dispatcher
//!     → logging.rs subscriber (JSON lines | console text)
//!     → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
