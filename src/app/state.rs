// ==========================================
// 库存补货决策系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 作为 axum State 注入各路由（Clone 仅复制 Arc）
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use rusqlite::Connection;

use crate::api::{ConfigApi, ImportApi, ProductApi, ReorderApi};
use crate::config::config_manager::ConfigManager;
use crate::config::server_config::ENV_DB_PATH;
use crate::db::{ensure_schema, open_sqlite_connection, read_schema_version};
use crate::repository::{ActionLogRepository, ProductRepository, ProductRepositoryImpl};

/// 应用状态
///
/// 所有 API 共享同一个 SQLite 连接
#[derive(Clone)]
pub struct AppState {
    /// 数据库路径（内存库为 ":memory:"）
    pub db_path: String,

    /// 产品管理API
    pub product_api: Arc<ProductApi>,

    /// 补货分析API
    pub reorder_api: Arc<ReorderApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,

    /// 产品导入API
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// 打开数据库、建表并组装所有API
    pub fn new(db_path: &str) -> anyhow::Result<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(db_path)
            .with_context(|| format!("无法打开数据库: {}", db_path))?;
        Self::from_connection(db_path, conn)
    }

    /// 从已打开的连接组装（测试使用内存库）
    pub fn from_connection(db_path: &str, conn: Connection) -> anyhow::Result<Self> {
        ensure_schema(&conn).context("数据库建表失败")?;
        let version = read_schema_version(&conn).context("读取 schema_version 失败")?;
        tracing::info!(schema_version = ?version, "数据库 schema 就绪");

        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let product_repo: Arc<dyn ProductRepository> =
            Arc::new(ProductRepositoryImpl::from_connection(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));

        // ==========================================
        // 创建API实例
        // ==========================================
        let product_api = Arc::new(ProductApi::new(product_repo.clone(), action_log_repo.clone()));
        let reorder_api = Arc::new(ReorderApi::new(product_repo.clone(), config_manager.clone()));
        let config_api = Arc::new(ConfigApi::new(config_manager, action_log_repo.clone()));
        let import_api = Arc::new(ImportApi::new(product_repo, action_log_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path: db_path.to_string(),
            product_api,
            reorder_api,
            config_api,
            import_api,
        })
    }

    /// 内存数据库（测试与演示）
    pub fn in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("无法创建内存数据库")?;
        crate::db::configure_sqlite_connection(&conn)?;
        Self::from_connection(":memory:", conn)
    }
}

/// 默认数据库路径
///
/// 优先级: INVENTORY_DB_PATH > 用户数据目录 > ./inventory.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./inventory.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = if cfg!(debug_assertions) {
            data_dir.join("inventory-reorder-dev")
        } else {
            data_dir.join("inventory-reorder")
        };

        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join("inventory.db"),
            Err(e) => tracing::warn!("无法创建数据目录 {}: {}，使用当前目录", dir.display(), e),
        }
    }

    path.to_string_lossy().to_string()
}
