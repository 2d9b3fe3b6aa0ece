//! Destinations of finalized records.

use std::sync::{Mutex, PoisonError};

use crate::event::{Level, Record};

/// Receives every record a logger emits.
///
/// Sinks own their thread-safety; `emit` must never fail the caller.
pub trait Sink: Send + Sync {
    fn emit(&self, record: &Record);
}

/// Forwards records to the `tracing` dispatcher.
///
/// Panic and fatal records report at `ERROR` with their severity attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

macro_rules! forward {
    ($level:expr, $record:expr, $fields:expr, $stack:expr) => {
        tracing::event!(
            target: "ctxlog",
            $level,
            severity = $record.level.as_str(),
            caller = %$record.caller,
            fields = %$fields,
            stack = $stack,
            "{}",
            $record.message.as_deref().unwrap_or_default()
        )
    };
}

impl Sink for TracingSink {
    fn emit(&self, record: &Record) {
        let fields = serde_json::Value::Object(record.fields.clone());
        let stack = record.stack.as_ref().map(|frames| frames.join(", "));
        let stack = stack.as_deref();

        match record.level {
            Level::Trace => forward!(tracing::Level::TRACE, record, fields, stack),
            Level::Debug => forward!(tracing::Level::DEBUG, record, fields, stack),
            Level::Info => forward!(tracing::Level::INFO, record, fields, stack),
            Level::Warn => forward!(tracing::Level::WARN, record, fields, stack),
            Level::Error | Level::Fatal | Level::Panic | Level::Disabled => {
                forward!(tracing::Level::ERROR, record, fields, stack)
            }
        }
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the records emitted so far.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the records emitted so far.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: &Record) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}
