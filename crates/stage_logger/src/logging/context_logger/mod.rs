use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::config::LoggerConfig;
use crate::context::RequestContext;
use crate::error::LoggerError;
use crate::logging::{
    Correlation, FATAL_EXIT_CODE, Level, Logger, ProcessExit, Record, StreamLogger, Terminator,
};

/// Structured logger bound to a fixed stage.
///
/// Every record carries `stage` and `pid`. The `*_context` variants also
/// carry `trace-id` and `user-id` read from a [`RequestContext`], set to
/// `""` when the context has no value for them.
///
/// Cloning is cheap and all clones share the same sink. Nothing is
/// mutated after construction, so one instance can serve any number of
/// threads.
#[derive(Clone)]
pub struct ContextLogger {
    stage: Arc<str>,
    pid: u32,
    level: Level,
    sink: Arc<dyn Logger>,
    terminator: Arc<dyn Terminator>,
}

impl fmt::Debug for ContextLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextLogger")
            .field("stage", &self.stage)
            .field("pid", &self.pid)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl ContextLogger {
    /// Build a stderr logger for `stage`.
    ///
    /// `environment == "dev"` writes readable lines, anything else JSON.
    /// A logger that cannot be built ends the process: nothing should run
    /// without working logging.
    pub fn new(environment: &str, stage: &str) -> Self {
        match Self::try_new(environment, stage) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("failed to build logger for stage {stage:?}: {e}");
                std::process::exit(FATAL_EXIT_CODE)
            }
        }
    }

    /// Fallible form of [`ContextLogger::new`].
    ///
    /// Fails only when stderr cannot be written. The level is always
    /// `info`; use [`LoggerConfig::from_env`] to take `LOG_LEVEL` into
    /// account.
    pub fn try_new(environment: &str, stage: &str) -> Result<Self, LoggerError> {
        io::stderr().lock().flush()?;
        Ok(Self::from_config(LoggerConfig::new(environment, stage)))
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: LoggerConfig) -> ContextLoggerBuilder {
        ContextLoggerBuilder {
            config,
            sink: None,
            terminator: None,
        }
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Emit one record at `level` without correlation fields.
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, params: &[Value]) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, msg, params, None, Location::caller());
    }

    /// Emit one record at `level` carrying the trace and user ids found in `ctx`.
    #[track_caller]
    pub fn log_context<C: RequestContext + ?Sized>(
        &self,
        level: Level,
        ctx: &C,
        msg: &str,
        params: &[Value],
    ) {
        if !self.enabled(level) {
            return;
        }
        let correlation = Correlation::from_context(ctx);
        self.emit(level, msg, params, Some(correlation), Location::caller());
    }

    fn emit(
        &self,
        level: Level,
        msg: &str,
        params: &[Value],
        correlation: Option<Correlation<'_>>,
        caller: &'static Location<'static>,
    ) {
        let record = Record {
            timestamp: Utc::now(),
            level,
            message: msg,
            pid: self.pid,
            caller,
            stage: &self.stage,
            correlation,
            params,
        };
        self.sink.log(&record);

        if level == Level::Fatal {
            self.sink.flush();
            self.terminator.terminate();
        }
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, params: &[Value]) {
        self.log(Level::Debug, msg, params)
    }

    #[track_caller]
    pub fn debug_context<C: RequestContext + ?Sized>(
        &self,
        ctx: &C,
        msg: &str,
        params: &[Value],
    ) {
        self.log_context(Level::Debug, ctx, msg, params)
    }

    #[track_caller]
    pub fn info(&self, msg: &str, params: &[Value]) {
        self.log(Level::Info, msg, params)
    }

    #[track_caller]
    pub fn info_context<C: RequestContext + ?Sized>(
        &self,
        ctx: &C,
        msg: &str,
        params: &[Value],
    ) {
        self.log_context(Level::Info, ctx, msg, params)
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, params: &[Value]) {
        self.log(Level::Warn, msg, params)
    }

    #[track_caller]
    pub fn warn_context<C: RequestContext + ?Sized>(
        &self,
        ctx: &C,
        msg: &str,
        params: &[Value],
    ) {
        self.log_context(Level::Warn, ctx, msg, params)
    }

    #[track_caller]
    pub fn error(&self, msg: &str, params: &[Value]) {
        self.log(Level::Error, msg, params)
    }

    #[track_caller]
    pub fn error_context<C: RequestContext + ?Sized>(
        &self,
        ctx: &C,
        msg: &str,
        params: &[Value],
    ) {
        self.log_context(Level::Error, ctx, msg, params)
    }

    /// Write a fatal record, flush, then terminate the process.
    #[track_caller]
    pub fn fatal(&self, msg: &str, params: &[Value]) {
        self.log(Level::Fatal, msg, params)
    }

    /// Context-aware [`ContextLogger::fatal`].
    #[track_caller]
    pub fn fatal_context<C: RequestContext + ?Sized>(
        &self,
        ctx: &C,
        msg: &str,
        params: &[Value],
    ) {
        self.log_context(Level::Fatal, ctx, msg, params)
    }
}

/// Assembles a [`ContextLogger`] with a custom sink or terminator.
///
/// Without overrides the sink is stderr in the format picked by the
/// config's environment, and fatal records exit the process.
pub struct ContextLoggerBuilder {
    config: LoggerConfig,
    sink: Option<Arc<dyn Logger>>,
    terminator: Option<Arc<dyn Terminator>>,
}

impl ContextLoggerBuilder {
    pub fn sink<L: Logger + 'static>(mut self, sink: L) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn terminator<T: Terminator + 'static>(mut self, terminator: T) -> Self {
        self.terminator = Some(Arc::new(terminator));
        self
    }

    pub fn build(self) -> ContextLogger {
        let LoggerConfig {
            environment,
            stage,
            level,
        } = self.config;

        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(StreamLogger::stderr(environment.format())));
        let terminator = self.terminator.unwrap_or_else(|| Arc::new(ProcessExit));

        ContextLogger {
            stage: Arc::from(stage),
            pid: std::process::id(),
            level,
            sink,
            terminator,
        }
    }
}
