//! Structured logging with a fixed stage tag and request correlation.
//!
//! ```no_run
//! use stage_logger::{Context, ContextLogger, params};
//!
//! let log = ContextLogger::new("prod", "ingest");
//! log.info("started", params![]);
//!
//! let ctx = Context::new().with_trace_id("abc123");
//! log.info_context(&ctx, "request handled", params![200]);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod logging;

// Re-export commonly used types at the crate root
pub use config::{Environment, LoggerConfig};
pub use context::{Context, RequestContext, TRACE_ID_KEY, USER_ID_KEY};
pub use error::LoggerError;
pub use logging::*;
pub use serde_json::{Value, json};

/// Build a `&[Value]` parameter list from heterogeneous expressions.
///
/// Each argument goes through `Value::from`, so numbers, strings, bools
/// and ready-made [`Value`]s all work:
///
/// ```
/// use stage_logger::{json, params};
///
/// let p = params![1, "a", true, json!({"k": 2})];
/// assert_eq!(p.len(), 4);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[] as &[$crate::Value]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+] as &[$crate::Value]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_macro_keeps_order() {
        let p = params![1, "a", true];
        assert_eq!(p, &[json!(1), json!("a"), json!(true)]);
        assert!(params![].is_empty());
    }

    #[test]
    fn params_macro_accepts_values_and_owned_strings() {
        let name = String::from("alice");
        let p = params![name, json!({"n": 1}), 2.5];
        assert_eq!(p[0], "alice");
        assert_eq!(p[1]["n"], 1);
        assert_eq!(p[2], 2.5);
    }
}
