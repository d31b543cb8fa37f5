use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::logging::{Logger, Record, Terminator};

/// Cloneable in-memory writer.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps every record as its JSON value.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<Value>>>,
    flushes: Arc<AtomicUsize>,
}

impl RecordingLogger {
    pub fn records(&self) -> Vec<Value> {
        self.records.lock().unwrap().clone()
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl Logger for RecordingLogger {
    fn log(&self, record: &Record<'_>) {
        let value = serde_json::to_value(record).unwrap();
        self.records.lock().unwrap().push(value);
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Counts terminations and remembers how many records had been written
/// when each one happened.
#[derive(Clone, Default)]
pub struct RecordingTerminator {
    logger: Option<RecordingLogger>,
    calls: Arc<Mutex<Vec<usize>>>,
}

impl RecordingTerminator {
    pub fn watching(logger: &RecordingLogger) -> Self {
        Self {
            logger: Some(logger.clone()),
            calls: Arc::default(),
        }
    }

    /// Record count observed at each termination.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self) {
        let seen = self.logger.as_ref().map_or(0, |l| l.records().len());
        self.calls.lock().unwrap().push(seen);
    }
}
