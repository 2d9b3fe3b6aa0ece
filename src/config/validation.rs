//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::LogConfig;
use crate::event::Level;

/// A semantic problem with an otherwise well-formed config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid level '{0}'")]
    InvalidLevel(String),

    #[error("deny_paths[{0}] is empty")]
    EmptyDenyPath(usize),
}

pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.level.parse::<Level>().is_err() {
        errors.push(ValidationError::InvalidLevel(config.level.clone()));
    }

    for (i, marker) in config.deny_paths.iter().enumerate() {
        if marker.is_empty() {
            errors.push(ValidationError::EmptyDenyPath(i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
