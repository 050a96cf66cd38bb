// ==========================================
// 库存补货决策系统 - 产品管理 API
// ==========================================
// 职责: 产品记录 CRUD + 操作审计
// 红线: 所有写入必须记录 ActionLog（审计失败只告警，不回滚已完成的写入）
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{normalize_limit, ProductValidator};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::product::{NewProduct, Product, ProductPatch};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::product_repo::ProductRepository;

// ==========================================
// ProductApi - 产品管理 API
// ==========================================
pub struct ProductApi {
    product_repo: Arc<dyn ProductRepository>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl ProductApi {
    /// 创建新的ProductApi实例
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            product_repo,
            action_log_repo,
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部产品
    pub fn list_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.product_repo.find_all()?)
    }

    /// 查询单个产品
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): productId 不存在
    pub fn get_product(&self, product_id: &str) -> ApiResult<Product> {
        let product_id = ProductValidator::validate_product_id(product_id)?;
        self.product_repo
            .find_by_id(&product_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Product(id={})不存在", product_id)))
    }

    /// 查询产品的操作日志（最新在前）
    pub fn list_product_actions(
        &self,
        product_id: &str,
        limit: Option<usize>,
    ) -> ApiResult<Vec<ActionLog>> {
        let product_id = ProductValidator::validate_product_id(product_id)?;
        let limit = normalize_limit(limit)?;
        Ok(self.action_log_repo.find_by_product_id(&product_id, limit)?)
    }

    /// 查询最近的操作日志
    pub fn list_recent_actions(&self, limit: Option<usize>) -> ApiResult<Vec<ActionLog>> {
        let limit = normalize_limit(limit)?;
        Ok(self.action_log_repo.list_recent(limit)?)
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 新建产品
    ///
    /// # 返回
    /// - Err(ApiError::ValidationError): 字段不合法
    /// - Err(ApiError::DuplicateKey): productId 已存在
    pub fn create_product(&self, new_product: NewProduct, actor: &str) -> ApiResult<Product> {
        ProductValidator::validate_new(&new_product)?;

        let product = self.product_repo.create(new_product)?;

        self.action_log_repo.insert_or_warn(&ActionLog::new(
            Some(&product.product_id),
            ActionType::Create,
            actor,
            serde_json::to_value(&product).ok(),
            Some(format!("新建产品: {}", product.name)),
        ));

        info!(product_id = %product.product_id, actor, "产品已创建");
        Ok(product)
    }

    /// 局部更新产品
    ///
    /// # 返回
    /// - Err(ApiError::InvalidInput): 补丁为空
    /// - Err(ApiError::NotFound): productId 不存在
    pub fn update_product(
        &self,
        product_id: &str,
        patch: ProductPatch,
        actor: &str,
    ) -> ApiResult<Product> {
        let product_id = ProductValidator::validate_product_id(product_id)?;
        ProductValidator::validate_patch(&patch)?;

        let product = self.product_repo.update(&product_id, &patch)?;

        self.action_log_repo.insert_or_warn(&ActionLog::new(
            Some(&product_id),
            ActionType::Update,
            actor,
            serde_json::to_value(&patch).ok(),
            None,
        ));

        info!(product_id = %product_id, actor, "产品已更新");
        Ok(product)
    }

    /// 删除产品
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): productId 不存在
    pub fn delete_product(&self, product_id: &str, actor: &str) -> ApiResult<()> {
        let product_id = ProductValidator::validate_product_id(product_id)?;

        self.product_repo.delete(&product_id)?;

        self.action_log_repo.insert_or_warn(&ActionLog::new(
            Some(&product_id),
            ActionType::Delete,
            actor,
            None,
            None,
        ));

        info!(product_id = %product_id, actor, "产品已删除");
        Ok(())
    }
}
