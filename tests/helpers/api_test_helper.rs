// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::NamedTempFile;

use inventory_reorder::api::{ConfigApi, ImportApi, ProductApi, ReorderApi};
use inventory_reorder::config::ConfigManager;
use inventory_reorder::db::open_sqlite_connection;
use inventory_reorder::domain::{NewProduct, Product};
use inventory_reorder::repository::{
    ActionLogRepository, ProductRepository, ProductRepositoryImpl,
};

pub use test_helpers::{healthy_product, low_stock_product, new_product};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub product_api: Arc<ProductApi>,
    pub reorder_api: Arc<ReorderApi>,
    pub config_api: Arc<ConfigApi>,
    pub import_api: Arc<ImportApi>,

    // Repository层（用于测试数据准备）
    pub product_repo: Arc<dyn ProductRepository>,
    pub action_log_repo: Arc<ActionLogRepository>,
    pub config_manager: Arc<ConfigManager>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境
    ///
    /// # 说明
    /// - 使用临时数据库文件
    /// - 所有Repository共享同一连接
    pub fn new() -> Result<Self, String> {
        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let conn: Connection = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let product_repo: Arc<dyn ProductRepository> =
            Arc::new(ProductRepositoryImpl::from_connection(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));

        // ==========================================
        // 初始化API层
        // ==========================================

        let product_api = Arc::new(ProductApi::new(
            product_repo.clone(),
            action_log_repo.clone(),
        ));
        let reorder_api = Arc::new(ReorderApi::new(
            product_repo.clone(),
            config_manager.clone(),
        ));
        let config_api = Arc::new(ConfigApi::new(
            config_manager.clone(),
            action_log_repo.clone(),
        ));
        let import_api = Arc::new(ImportApi::new(
            product_repo.clone(),
            action_log_repo.clone(),
        ));

        Ok(Self {
            db_path,
            product_api,
            reorder_api,
            config_api,
            import_api,
            product_repo,
            action_log_repo,
            config_manager,
            _temp_file: temp_file,
        })
    }

    /// 直接通过仓储写入产品（不经过 API，不产生审计日志）
    pub fn seed(&self, products: Vec<NewProduct>) -> Vec<Product> {
        products
            .into_iter()
            .map(|p| self.product_repo.create(p).expect("写入测试产品失败"))
            .collect()
    }
}
