//! Request-scoped contextual log fields.
//!
//! # Data Flow
//! ```text
//! inbound request (x-request-id)
//!     → carrier.rs attach()       seed a fresh ContextData
//!     → propagation.rs Context    store it under the "logger" key
//!     → carrier.rs with_value()   copy, extend, derive a child context
//!     → carrier.rs detach()       read back when an event is built
//! ```
//!
//! # Design Decisions
//! - Contexts are immutable; every derivation copies the carrier
//! - Missing carriers and fields are `None` / `""`, never errors

pub mod carrier;
pub mod data;
pub mod propagation;

pub use carrier::{
    attach, detach, request_id, with_value, RequestIdSource, ACCOUNT_KEY, CLIENT_KEY,
    CONTEXT_KEY, DEVICE_KEY, REQUEST_KEY, USER_AGENT_KEY, USER_KEY,
};
pub use data::{to_log_string, ContextData};
pub use propagation::Context;
