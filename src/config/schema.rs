//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Logger configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level (trace, debug, info, warn, error, fatal, panic, disabled).
    pub level: String,

    /// Append the filtered stack trace to every event carrying an error.
    pub stack: bool,

    /// Console text output instead of JSON lines.
    pub console: bool,

    /// Disable ANSI colors in console output.
    pub no_color: bool,

    /// Extra file path markers whose frames are dropped from stack traces.
    pub deny_paths: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            stack: true,
            console: false,
            no_color: true,
            deny_paths: Vec::new(),
        }
    }
}
