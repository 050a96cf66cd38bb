use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};

use crate::api::error::ApiError;
use crate::api::reorder_api::SpikeRequest;
use crate::app::state::AppState;
use crate::domain::analysis::{InventoryOverview, ReorderAnalysis, SpikeSimulation};

use super::common::{parse_json, run_blocking};

// ==========================================
// 补货分析相关路由
// ==========================================

/// GET /api/analysis
pub async fn analyze_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReorderAnalysis>>, ApiError> {
    let api = state.reorder_api.clone();
    let analyses = run_blocking("http.analyze_all", move || api.analyze_all()).await?;
    Ok(Json(analyses))
}

/// GET /api/analysis/reorder
pub async fn list_reorder_needed(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReorderAnalysis>>, ApiError> {
    let api = state.reorder_api.clone();
    let analyses = run_blocking("http.list_reorder_needed", move || api.list_reorder_needed()).await?;
    Ok(Json(analyses))
}

/// GET /api/analysis/overview
pub async fn get_overview(
    State(state): State<AppState>,
) -> Result<Json<InventoryOverview>, ApiError> {
    let api = state.reorder_api.clone();
    let overview = run_blocking("http.get_overview", move || api.get_overview()).await?;
    Ok(Json(overview))
}

/// GET /api/analysis/:id
pub async fn analyze_one(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ReorderAnalysis>, ApiError> {
    let api = state.reorder_api.clone();
    let analysis = run_blocking("http.analyze_one", move || api.analyze_one(&product_id)).await?;
    Ok(Json(analysis))
}

/// POST /api/simulate-spike
pub async fn simulate_spike(
    State(state): State<AppState>,
    payload: Result<Json<SpikeRequest>, JsonRejection>,
) -> Result<Json<SpikeSimulation>, ApiError> {
    let request = parse_json(payload)?;
    let api = state.reorder_api.clone();
    let simulation = run_blocking("http.simulate_spike", move || api.simulate_spike(&request)).await?;
    Ok(Json(simulation))
}
