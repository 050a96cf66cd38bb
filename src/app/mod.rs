// ==========================================
// 库存补货决策系统 - 应用层
// ==========================================
// 职责: 状态组装 + HTTP 路由
// ==========================================

pub mod http_routes;
pub mod state;

// 重导出
pub use http_routes::create_router;
pub use state::{get_default_db_path, AppState};
