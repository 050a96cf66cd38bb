// ==========================================
// 库存补货决策系统 - HTTP 服务入口
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 决策支持系统
// ==========================================

use anyhow::Context;
use inventory_reorder::app::{create_router, get_default_db_path, AppState};
use inventory_reorder::config::ServerConfig;
use inventory_reorder::{i18n, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", inventory_reorder::APP_NAME);
    tracing::info!("系统版本: {}", inventory_reorder::VERSION);
    tracing::info!("==================================================");

    let config = ServerConfig::from_env().context("启动配置无效")?;
    i18n::set_locale(&config.locale);

    // 获取数据库路径
    let db_path = config.db_path.clone().unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let state = tokio::task::spawn_blocking(move || AppState::new(&db_path))
        .await
        .context("初始化任务异常退出")??;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("无法监听 {}", config.bind_address))?;
    tracing::info!("HTTP 服务已启动: http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP 服务异常退出")?;

    tracing::info!("HTTP 服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
}
