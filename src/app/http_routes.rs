// ==========================================
// 库存补货决策系统 - HTTP 路由（按域拆分）
// ==========================================
// 职责: REST 接口定义，连接前端驾驶舱与后端 API
// 约束: 同步 API 调用一律放入 spawn_blocking
// ==========================================

mod common;
mod config;
mod import;
mod product;
mod reorder;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::state::AppState;

pub use common::{ErrorResponse, ACTOR_HEADER};

/// 构建路由
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // 健康检查
        .route("/health", get(health))
        // 产品
        .route(
            "/api/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/api/products/:id",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route("/api/products/:id/actions", get(product::list_product_actions))
        // 导入（不占用产品 ID 路径空间）
        .route(
            "/api/import/products",
            post(import::import_products)
                .layer(DefaultBodyLimit::max(import::MAX_IMPORT_BODY_BYTES)),
        )
        // 补货分析
        .route("/api/analysis", get(reorder::analyze_all))
        .route("/api/analysis/reorder", get(reorder::list_reorder_needed))
        .route("/api/analysis/overview", get(reorder::get_overview))
        .route("/api/analysis/:id", get(reorder::analyze_one))
        .route("/api/simulate-spike", post(reorder::simulate_spike))
        // 配置
        .route(
            "/api/config/reorder",
            get(config::get_reorder_config).put(config::update_reorder_config),
        )
        // 审计
        .route("/api/actions", get(product::list_recent_actions))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": crate::APP_NAME,
        "version": crate::VERSION,
    }))
}
