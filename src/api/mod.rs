// ==========================================
// 库存补货决策系统 - API 层
// ==========================================
// 职责: 与传输无关的业务接口（校验、记录解析、审计、错误映射）
// 调用方: app::http_routes
// ==========================================

pub mod config_api;
pub mod error;
pub mod import_api;
pub mod product_api;
pub mod reorder_api;
pub mod validator;

// 重导出核心类型
pub use config_api::{ConfigApi, ReorderParamsUpdate};
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use product_api::ProductApi;
pub use reorder_api::{ReorderApi, SpikeRequest};
pub use validator::ProductValidator;
