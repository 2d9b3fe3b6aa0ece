//! Shared utilities for integration tests.

use std::sync::Arc;

use ctxlog::{LogConfig, Logger, MemorySink, Record};

/// A logger at `level` recording into memory.
pub fn memory_logger(level: &str, stack: bool) -> (Logger, Arc<MemorySink>) {
    let config = LogConfig {
        level: level.to_string(),
        stack,
        ..LogConfig::default()
    };
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::with_sink(&config, sink.clone()).unwrap();
    (logger, sink)
}

/// The single record at `level`, panicking if there is not exactly one.
#[allow(dead_code)]
pub fn only_at(records: &[Record], level: ctxlog::Level) -> Record {
    let matching: Vec<&Record> = records.iter().filter(|r| r.level == level).collect();
    assert_eq!(matching.len(), 1, "records: {records:?}");
    matching[0].clone()
}
