use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::i18n;

// ==========================================
// 公共工具：错误映射、阻塞任务、请求解析
// ==========================================

/// 操作人请求头
pub const ACTOR_HEADER: &str = "x-actor";

/// 未携带操作人时的默认值
pub const DEFAULT_ACTOR: &str = "api";

/// 错误响应（返回给前端）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 本地化错误标题
    pub message: String,

    /// 详细信息（原因、逐字段违规）
    pub details: Option<serde_json::Value>,
}

/// 错误码 → HTTP 状态码
pub fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::InvalidInput(_) | ApiError::ValidationError { .. } | ApiError::ImportError(_) => {
            StatusCode::BAD_REQUEST
        }
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::DuplicateKey(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "请求处理失败");
        } else {
            tracing::debug!(code, error = %self, "请求被拒绝");
        }

        let details = match &self {
            ApiError::ValidationError { reason, violations } => Some(serde_json::json!({
                "reason": reason,
                "violations": violations,
            })),
            other => Some(serde_json::json!({ "reason": other.to_string() })),
        };

        let body = ErrorResponse {
            code: code.to_string(),
            message: i18n::error_title(code),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// 在阻塞线程池执行 API 调用（SQLite 为同步 IO）
pub async fn run_blocking<T, F>(op: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new(op);
        f()
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))?
}

/// 读取操作人
pub fn actor_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_ACTOR)
        .to_string()
}

/// JSON 请求体解析失败统一映射为 InvalidInput
pub fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::InvalidInput(format!("请求体格式错误: {}", e.body_text())))
}

/// 查询参数解析失败统一映射为 InvalidInput
pub fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|e| ApiError::InvalidInput(format!("查询参数错误: {}", e.body_text())))
}

/// `?limit=` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}
