// ==========================================
// 库存补货决策系统 - 配置层
// ==========================================
// 职责: 补货参数管理（config_kv 表）+ 服务启动配置（环境变量）
// ==========================================

pub mod config_manager;
pub mod reorder_config_trait;
pub mod server_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use reorder_config_trait::ReorderConfigReader;
pub use server_config::{ConfigError, ServerConfig};
