use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};

use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::domain::action_log::ActionLog;
use crate::domain::product::{NewProduct, Product, ProductPatch};

use super::common::{actor_from_headers, parse_json, parse_query, run_blocking, LimitQuery};

// ==========================================
// 产品相关路由
// ==========================================

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let api = state.product_api.clone();
    let products = run_blocking("http.list_products", move || api.list_products()).await?;
    Ok(Json(products))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let new_product = parse_json(payload)?;
    let actor = actor_from_headers(&headers);
    let api = state.product_api.clone();
    let product = run_blocking("http.create_product", move || {
        api.create_product(new_product, &actor)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let api = state.product_api.clone();
    let product = run_blocking("http.get_product", move || api.get_product(&product_id)).await?;
    Ok(Json(product))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let patch = parse_json(payload)?;
    let actor = actor_from_headers(&headers);
    let api = state.product_api.clone();
    let product = run_blocking("http.update_product", move || {
        api.update_product(&product_id, patch, &actor)
    })
    .await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let actor = actor_from_headers(&headers);
    let api = state.product_api.clone();
    run_blocking("http.delete_product", move || {
        api.delete_product(&product_id, &actor)
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/products/:id/actions
pub async fn list_product_actions(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<ActionLog>>, ApiError> {
    let LimitQuery { limit } = parse_query(query)?;
    let api = state.product_api.clone();
    let logs = run_blocking("http.list_product_actions", move || {
        api.list_product_actions(&product_id, limit)
    })
    .await?;
    Ok(Json(logs))
}

/// GET /api/actions
pub async fn list_recent_actions(
    State(state): State<AppState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<ActionLog>>, ApiError> {
    let LimitQuery { limit } = parse_query(query)?;
    let api = state.product_api.clone();
    let logs = run_blocking("http.list_recent_actions", move || api.list_recent_actions(limit))
        .await?;
    Ok(Json(logs))
}
