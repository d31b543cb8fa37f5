use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::context::{self, RequestContext};
use crate::error::LoggerError;

/// Record severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// Correlation identifiers pulled out of a request context.
///
/// Both fields are always present; a missing or empty context value
/// becomes the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Correlation<'a> {
    #[serde(rename = "trace-id")]
    pub trace_id: &'a str,
    #[serde(rename = "user-id")]
    pub user_id: &'a str,
}

impl<'a> Correlation<'a> {
    pub fn from_context<C: RequestContext + ?Sized>(ctx: &'a C) -> Self {
        Self {
            trace_id: context::trace_id(ctx),
            user_id: context::user_id(ctx),
        }
    }
}

/// One log line, built per call and handed to a [`Logger`].
#[derive(Debug, Clone, Serialize)]
pub struct Record<'a> {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: &'a str,
    pub pid: u32,
    #[serde(serialize_with = "serialize_caller")]
    pub caller: &'static Location<'static>,
    pub stage: &'a str,
    #[serde(flatten)]
    pub correlation: Option<Correlation<'a>>,
    pub params: &'a [Value],
}

impl Record<'_> {
    /// Timestamp as written to the sink: RFC 3339, UTC, millisecond precision.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn caller_string(&self) -> String {
        format!("{}:{}", self.caller.file(), self.caller.line())
    }

    /// Params rendered as a JSON array.
    pub fn params_json(&self) -> String {
        serde_json::to_string(self.params).unwrap_or_else(|_| "[]".to_string())
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn serialize_caller<S: Serializer>(
    loc: &&'static Location<'static>,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.collect_str(&format_args!("{}:{}", loc.file(), loc.line()))
}

/// The underlying leveled, structured sink a [`ContextLogger`](super::ContextLogger)
/// writes through.
pub trait Logger: Send + Sync {
    fn log(&self, record: &Record<'_>);

    /// Push buffered output to its destination. Called before a fatal
    /// record terminates the process.
    fn flush(&self) {}
}
