use crate::logging::{Level, Logger, Record};
use tracing::{debug, error, info, warn};

/// A logger implementation that forwards records to the tracing crate
///
/// Whatever subscriber the process installed decides the final layout.
/// Field names match the JSON record (`pid`, `stage`, `trace-id`,
/// `user-id`, `params`, `caller`). `fatal` has no tracing counterpart and
/// is emitted as an error event with `fatal = true`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, record: &Record<'_>) {
        let pid = record.pid;
        let stage = record.stage;
        let caller = record.caller_string();
        let params = record.params_json();
        let trace_id = record.correlation.map(|c| c.trace_id);
        let user_id = record.correlation.map(|c| c.user_id);
        let msg = record.message;

        match record.level {
            Level::Fatal => error!(
                fatal = true,
                pid,
                stage,
                "trace-id" = trace_id,
                "user-id" = user_id,
                params = %params,
                caller = %caller,
                "{}",
                msg
            ),
            Level::Error => error!(
                pid,
                stage,
                "trace-id" = trace_id,
                "user-id" = user_id,
                params = %params,
                caller = %caller,
                "{}",
                msg
            ),
            Level::Warn => warn!(
                pid,
                stage,
                "trace-id" = trace_id,
                "user-id" = user_id,
                params = %params,
                caller = %caller,
                "{}",
                msg
            ),
            Level::Info => info!(
                pid,
                stage,
                "trace-id" = trace_id,
                "user-id" = user_id,
                params = %params,
                caller = %caller,
                "{}",
                msg
            ),
            Level::Debug => debug!(
                pid,
                stage,
                "trace-id" = trace_id,
                "user-id" = user_id,
                params = %params,
                caller = %caller,
                "{}",
                msg
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Correlation;
    use crate::logging::test_support::SharedBuf;
    use chrono::Utc;
    use serde_json::json;
    use std::panic::Location;

    fn capture(record: &Record<'_>) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || TracingLogger::new().log(record));
        buf.contents()
    }

    #[test]
    fn test_forwards_fields() {
        let params = [json!(200)];
        let record = Record {
            timestamp: Utc::now(),
            level: Level::Info,
            message: "request handled",
            pid: 1,
            caller: Location::caller(),
            stage: "api",
            correlation: Some(Correlation {
                trace_id: "abc123",
                user_id: "",
            }),
            params: &params,
        };

        let out = capture(&record);
        assert!(out.contains("INFO"));
        assert!(out.contains("request handled"));
        assert!(out.contains("stage=\"api\""));
        assert!(out.contains("pid=1 "));
        assert!(out.contains("trace-id=\"abc123\""));
        assert!(out.contains("user-id=\"\""));
        assert!(out.contains("params=[200]"));
    }

    #[test]
    fn test_fatal_maps_to_error() {
        let record = Record {
            timestamp: Utc::now(),
            level: Level::Fatal,
            message: "unrecoverable",
            pid: 1,
            caller: Location::caller(),
            stage: "api",
            correlation: None,
            params: &[],
        };

        let out = capture(&record);
        assert!(out.contains("ERROR"));
        assert!(out.contains("fatal=true"));
        assert!(out.contains("unrecoverable"));
        assert!(out.contains("pid=1 "));
        assert!(!out.contains("trace-id"));
        assert!(!out.contains("user-id"));
    }
}
