use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    // 提前加载 .env，使得 RUST_LOG / DATABASE_URL 等环境变量生效
    dotenv().ok();

    let cfg = match configs::AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "book-catalog", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(cfg.logging.json);
    info!(service = "book-catalog", event = "logger_init", json = cfg.logging.json, "tracing subscriber initialized");

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：捕获异常并输出错误日志
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "book-catalog", event = "panic", pid, message = %info, "unhandled panic occurred");
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "book-catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "book-catalog",
        event = "start",
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "book catalog starting"
    );

    // server::run_with 内部监听 Ctrl+C 并优雅停机
    rt.block_on(async move {
        match server::run_with(cfg).await {
            Ok(()) => {
                info!(service = "book-catalog", event = "stop", pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "book-catalog", event = "run_failed", error = %e, "server::run_with returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
