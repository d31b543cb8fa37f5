pub mod context_logger;
pub mod logger;
pub mod stream_logger;
pub mod terminator;
pub mod tracing_logger;

#[cfg(test)]
pub(crate) mod test_support;

pub use context_logger::{ContextLogger, ContextLoggerBuilder};
pub use logger::{Correlation, Level, Logger, Record};
pub use stream_logger::{Format, StreamLogger};
pub use terminator::{FATAL_EXIT_CODE, ProcessExit, Terminator};
pub use tracing_logger::TracingLogger;
