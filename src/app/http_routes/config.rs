use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::HeaderMap;

use crate::api::config_api::ReorderParamsUpdate;
use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::engine::reorder::ReorderParams;

use super::common::{actor_from_headers, parse_json, run_blocking};

// ==========================================
// 配置相关路由
// ==========================================

/// GET /api/config/reorder
pub async fn get_reorder_config(
    State(state): State<AppState>,
) -> Result<Json<ReorderParams>, ApiError> {
    let api = state.config_api.clone();
    let params = run_blocking("http.get_reorder_config", move || api.get_reorder_params()).await?;
    Ok(Json(params))
}

/// PUT /api/config/reorder
pub async fn update_reorder_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ReorderParamsUpdate>, JsonRejection>,
) -> Result<Json<ReorderParams>, ApiError> {
    let update = parse_json(payload)?;
    let actor = actor_from_headers(&headers);
    let api = state.config_api.clone();
    let params = run_blocking("http.update_reorder_config", move || {
        api.update_reorder_params(update, &actor)
    })
    .await?;
    Ok(Json(params))
}
