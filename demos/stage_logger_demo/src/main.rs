use stage_logger::{
    Context, ContextLogger, LoggerConfig, TracingLogger, USER_ID_KEY, json, params,
};
use tracing_subscriber::EnvFilter;

fn handle(log: &ContextLogger, req: &http::Request<()>) {
    log.info_context(req, "request received", params![req.method().as_str(), req.uri().path()]);
    log.warn_context(req, "slow upstream", params![json!({"upstream": "search", "ms": 812})]);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // APP_ENV / APP_STAGE / LOG_LEVEL, writing to stderr
    let config = match LoggerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid logging configuration: {e}");
            std::process::exit(1);
        }
    };
    let stderr_log = ContextLogger::from_config(config);
    stderr_log.info("started", params![]);

    // Same calls routed through the tracing subscriber installed above
    let tracing_log = ContextLogger::builder(LoggerConfig::new("prod", "gateway"))
        .sink(TracingLogger::new())
        .build();

    let mut req = http::Request::builder()
        .method("GET")
        .uri("/search?q=rust")
        .header(USER_ID_KEY, "u-1024")
        .body(())
        .unwrap_or_default();
    req.extensions_mut()
        .insert(Context::new().with_trace_id("7f3a9c"));

    handle(&stderr_log, &req);
    handle(&tracing_log, &req);

    stderr_log.debug("only visible with LOG_LEVEL=debug", params![1, "a", true]);
    stderr_log.info("shutting down", params![]);
}
