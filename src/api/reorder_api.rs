// ==========================================
// 库存补货决策系统 - 补货分析 API
// ==========================================
// 职责: productId → 产品记录解析、读取补货参数、调用引擎
// 错误: InvalidInput / NotFound（引擎本身不报其他错误）
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::ProductValidator;
use crate::config::reorder_config_trait::ReorderConfigReader;
use crate::domain::analysis::{InventoryOverview, ReorderAnalysis, SpikeSimulation};
use crate::domain::product::Product;
use crate::engine::spike::validate_spike_params;
use crate::engine::{AnalysisAggregator, ReorderEngine, SpikeForecaster};
use crate::repository::product_repo::ProductRepository;

/// 激增模拟请求（字段均可缺省，缺省视为无效输入）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpikeRequest {
    pub product_id: Option<String>,
    pub spike_multiplier: Option<f64>,
    pub spike_duration: Option<f64>,
}

// ==========================================
// ReorderApi - 补货分析 API
// ==========================================
pub struct ReorderApi {
    product_repo: Arc<dyn ProductRepository>,
    config_reader: Arc<dyn ReorderConfigReader>,
}

impl ReorderApi {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        config_reader: Arc<dyn ReorderConfigReader>,
    ) -> Self {
        Self {
            product_repo,
            config_reader,
        }
    }

    /// 按当前配置构造引擎
    fn engine(&self) -> ApiResult<ReorderEngine> {
        Ok(ReorderEngine::new(self.config_reader.get_reorder_params()?))
    }

    fn load_product(&self, product_id: &str) -> ApiResult<Product> {
        let product_id = ProductValidator::validate_product_id(product_id)?;
        self.product_repo
            .find_by_id(&product_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Product(id={})不存在", product_id)))
    }

    /// 单个产品的补货分析
    pub fn analyze_one(&self, product_id: &str) -> ApiResult<ReorderAnalysis> {
        let product = self.load_product(product_id)?;
        Ok(self.engine()?.analyze(&product))
    }

    /// 全部产品的补货分析（按紧迫度排序）
    pub fn analyze_all(&self) -> ApiResult<Vec<ReorderAnalysis>> {
        let products = self.product_repo.find_all()?;
        Ok(AnalysisAggregator::new(self.engine()?).rank(&products))
    }

    /// 仅需补货的产品（按紧迫度排序）
    pub fn list_reorder_needed(&self) -> ApiResult<Vec<ReorderAnalysis>> {
        let products = self.product_repo.find_all()?;
        Ok(AnalysisAggregator::new(self.engine()?).reorder_list(&products))
    }

    /// 驾驶舱概览
    pub fn get_overview(&self) -> ApiResult<InventoryOverview> {
        let products = self.product_repo.find_all()?;
        let aggregator = AnalysisAggregator::new(self.engine()?);
        Ok(aggregator.overview(&aggregator.rank(&products)))
    }

    /// 需求激增模拟
    ///
    /// # 返回
    /// - Err(ApiError::InvalidInput): 字段缺失、非正数或越界
    /// - Err(ApiError::NotFound): productId 不存在
    pub fn simulate_spike(&self, request: &SpikeRequest) -> ApiResult<SpikeSimulation> {
        let product_id = request
            .product_id
            .as_deref()
            .ok_or_else(|| ApiError::InvalidInput("缺少 productId".to_string()))?;
        let multiplier = request
            .spike_multiplier
            .ok_or_else(|| ApiError::InvalidInput("缺少 spikeMultiplier".to_string()))?;
        let duration = request
            .spike_duration
            .ok_or_else(|| ApiError::InvalidInput("缺少 spikeDuration".to_string()))?;
        let duration_days = whole_days(duration)?;
        validate_spike_params(multiplier, duration_days)?;

        let product = self.load_product(product_id)?;
        let forecaster = SpikeForecaster::new(self.engine()?);
        Ok(forecaster.simulate(&product, multiplier, duration_days)?)
    }
}

/// 持续天数必须为正整数
fn whole_days(duration: f64) -> ApiResult<u32> {
    if !duration.is_finite() || duration <= 0.0 || duration.fract() != 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "spikeDuration 必须为正整数: {}",
            duration
        )));
    }
    if duration > f64::from(u32::MAX) {
        return Err(ApiError::InvalidInput(format!(
            "spikeDuration 超出范围: {}",
            duration
        )));
    }
    Ok(duration as u32)
}
