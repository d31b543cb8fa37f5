use thiserror::Error;

/// Errors raised while building a logger.
///
/// Logging calls themselves never fail; only configuration and sink
/// setup can.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidConfig { var: &'static str, reason: String },

    #[error("log sink unavailable: {0}")]
    Io(#[from] std::io::Error),
}
