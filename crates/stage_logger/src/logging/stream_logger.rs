use std::io::{self, Write};
use std::sync::Mutex;

use crate::logging::{Logger, Record};

/// Line layout used by [`StreamLogger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One JSON object per line.
    Json,
    /// Human-readable single line, for local development.
    Pretty,
}

/// Writes each record as one line to an `io::Write`.
///
/// The writer sits behind a mutex and every record is written with a
/// single `write_all`, so lines from concurrent callers never interleave.
/// Write failures are dropped.
pub struct StreamLogger<W: Write + Send> {
    writer: Mutex<W>,
    format: Format,
}

impl StreamLogger<io::Stderr> {
    pub fn stderr(format: Format) -> Self {
        Self::new(io::stderr(), format)
    }
}

impl<W: Write + Send> StreamLogger<W> {
    pub fn new(writer: W, format: Format) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    fn render(&self, record: &Record<'_>) -> Option<String> {
        let mut line = match self.format {
            Format::Json => serde_json::to_string(record).ok()?,
            Format::Pretty => render_pretty(record),
        };
        line.push('\n');
        Some(line)
    }
}

/// Message and string fields are quoted and escaped so a record always
/// stays on one line.
fn render_pretty(record: &Record<'_>) -> String {
    let mut line = format!(
        "{} {:>5} {} {:?} stage={:?}",
        record.timestamp_string(),
        record.level.as_str().to_ascii_uppercase(),
        record.caller_string(),
        record.message,
        record.stage,
    );
    if let Some(c) = &record.correlation {
        line.push_str(&format!(" trace-id={:?} user-id={:?}", c.trace_id, c.user_id));
    }
    line.push_str(" params=");
    line.push_str(&record.params_json());
    line
}

impl<W: Write + Send> Logger for StreamLogger<W> {
    fn log(&self, record: &Record<'_>) {
        let Some(line) = self.render(record) else {
            return;
        };
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writer.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}
