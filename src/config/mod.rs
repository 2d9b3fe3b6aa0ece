//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LogConfig (validated, immutable)
//!     → Logger::new
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never re-evaluated
//! - All fields have defaults to allow minimal configs
//! - An invalid level is fatal for the binary

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::LogConfig;
pub use validation::{validate_config, ValidationError};
