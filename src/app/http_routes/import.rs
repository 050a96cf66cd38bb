use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;

use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::importer::ImportReport;

use super::common::{actor_from_headers, run_blocking};

// ==========================================
// 导入相关路由
// ==========================================

/// CSV 请求体大小上限
pub const MAX_IMPORT_BODY_BYTES: usize = 10 * 1024 * 1024;

/// POST /api/import/products（请求体为 CSV 文本）
pub async fn import_products(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ImportReport>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::InvalidInput("请求体为空".to_string()));
    }
    let actor = actor_from_headers(&headers);
    let api = state.import_api.clone();
    let report = run_blocking("http.import_products", move || {
        api.import_csv(body.as_ref(), &actor)
    })
    .await?;
    Ok(Json(report))
}
