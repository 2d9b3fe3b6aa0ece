//! A structured log event under construction and its finalized record.

use std::error::Error;
use std::panic::Location;
use std::process;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::context::data::to_field_value;
use crate::context::ContextData;
use crate::event::level::Level;
use crate::logger::Logger;
use crate::stack::{filter_stack, Traced};

/// Field holding the message.
pub const MSG: &str = "msg";

/// Field holding generic values.
pub const ANY: &str = "any";

/// Field holding the error text.
pub const ERROR: &str = "error";

/// Field holding the filtered stack trace.
pub const STACK: &str = "stack";

/// Timestamp layout of records.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One log record under construction.
///
/// Insertions are additive. [`Event::send`] consumes the event, so a record is
/// emitted at most once. An event below the logger's level is disabled: it
/// accepts insertions and emits nothing.
#[must_use = "an event does nothing until it is sent"]
pub struct Event {
    logger: Logger,
    level: Level,
    enabled: bool,
    fields: Map<String, Value>,
    any_count: usize,
    message: Option<String>,
    error: Option<Arc<dyn Error + Send + Sync>>,
    stack: bool,
    caller: &'static Location<'static>,
}

impl Event {
    #[track_caller]
    pub(crate) fn new(logger: Logger, level: Level) -> Self {
        let enabled = logger.enabled(level);
        Self {
            logger,
            level,
            enabled,
            fields: Map::new(),
            any_count: 0,
            message: None,
            error: None,
            stack: level.is_terminal(),
            caller: Location::caller(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The attached error, wrapped so its chain carries a stack trace.
    pub fn error_value(&self) -> Option<&Arc<dyn Error + Send + Sync>> {
        self.error.as_ref()
    }

    pub fn stack_forced(&self) -> bool {
        self.stack
    }

    pub(crate) fn stack_on_error(&self) -> bool {
        self.logger.stack_on_error()
    }

    /// Add a string field.
    pub fn str(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(key, Value::String(value.into()))
    }

    /// Add a field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field from any serializable value.
    pub fn any<T>(self, key: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + std::fmt::Debug + ?Sized,
    {
        self.field(key, to_field_value(value))
    }

    /// Add a generic value under [`ANY`].
    ///
    /// Repeated values accumulate into an array instead of replacing each other.
    pub fn value(mut self, value: Value) -> Self {
        self.any_count += 1;
        match (self.any_count, self.fields.remove(ANY)) {
            (1, _) | (_, None) => {
                self.fields.insert(ANY.to_string(), value);
            }
            (2, Some(first)) => {
                self.fields.insert(ANY.to_string(), Value::Array(vec![first, value]));
            }
            (_, Some(Value::Array(mut values))) => {
                values.push(value);
                self.fields.insert(ANY.to_string(), Value::Array(values));
            }
            (_, Some(other)) => {
                self.fields.insert(ANY.to_string(), Value::Array(vec![other, value]));
            }
        }
        self
    }

    /// Merge every carrier entry as an individual field.
    pub fn fields(mut self, data: &ContextData) -> Self {
        for (key, value) in data {
            self.fields.insert(key.clone(), value.clone());
        }
        self
    }

    /// Attach an error as the event's error and as the literal `error` field.
    ///
    /// An error whose chain carries no stack trace known to the logger's
    /// frame filter is wrapped in [`Traced`].
    pub fn error(mut self, err: Arc<dyn Error + Send + Sync>) -> Self {
        if !self.enabled {
            return self;
        }

        let traced = self.logger.frame_filter().find_stack_trace(&*err).is_some();
        let err: Arc<dyn Error + Send + Sync> = if traced {
            err
        } else {
            Arc::new(Traced::capture_shared(err))
        };

        self.fields
            .insert(ERROR.to_string(), Value::String(err.to_string()));
        self.error = Some(err);
        self
    }

    /// Render the error's filtered stack trace when the event is sent.
    pub fn stack(mut self) -> Self {
        self.stack = true;
        self
    }

    /// Set the message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the reported call site.
    pub fn caller(mut self, location: &'static Location<'static>) -> Self {
        self.caller = location;
        self
    }

    /// Set the message and send.
    pub fn msg(self, message: impl Into<String>) {
        self.message(message).send();
    }

    /// Emit the record.
    ///
    /// Panic-level events then panic with the message; fatal-level events
    /// exit the process with status 1. Both happen even when the event is
    /// disabled.
    pub fn send(self) {
        let level = self.level;
        let message = self.message.clone().unwrap_or_default();

        if self.enabled {
            let logger = self.logger.clone();
            logger.sink().emit(&self.finish());
        }

        if level.is_terminal() {
            if level == Level::Panic {
                panic!("{message}");
            }
            process::exit(1);
        }
    }

    fn finish(self) -> Record {
        let stack = match (&self.error, self.stack) {
            (Some(err), true) => filter_stack(&**err, self.logger.frame_filter()),
            _ => None,
        };

        Record {
            level: self.level,
            time: chrono::Local::now().format(TIME_FORMAT).to_string(),
            caller: format!("{}:{}", self.caller.file(), self.caller.line()),
            message: self.message,
            fields: self.fields,
            stack,
            error: self.error,
        }
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("level", &self.level)
            .field("enabled", &self.enabled)
            .field("fields", &self.fields)
            .field("message", &self.message)
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

/// A finalized event, as handed to a sink.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub level: Level,
    pub time: String,
    pub caller: String,
    #[serde(rename = "msg", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
    /// The attached error value; its text is in the `error` field.
    #[serde(skip)]
    pub error: Option<Arc<dyn Error + Send + Sync>>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Encode as one JSON line; never fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!(r#"{{"{ERROR}":"{e}"}}"#))
    }
}
