// ==========================================
// 库存补货决策系统 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 决策支持系统（补货建议由人工确认）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 补货规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 补货参数与启动配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 服务
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Criticality, DaysRemaining, StockDepletion};

// 领域实体
pub use domain::{
    ActionLog, ActionType, InventoryOverview, NewProduct, Product, ProductPatch, ReorderAnalysis,
    SpikeSimulation,
};

// 引擎
pub use engine::{AnalysisAggregator, ReorderEngine, ReorderParams, SpikeForecaster};

// API
pub use api::{ApiError, ConfigApi, ImportApi, ProductApi, ReorderApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存补货决策系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
