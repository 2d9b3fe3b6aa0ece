//! HTTP integration.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → tower-http SetRequestIdLayer   ensure x-request-id
//!     → middleware/context.rs          attach Context to extensions
//!     → LogContext extractor           hand the Context to handlers
//!     → logger entry points            carrier fields on every event
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use middleware::{context_middleware, LogContext};
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
