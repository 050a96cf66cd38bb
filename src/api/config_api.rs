// ==========================================
// 库存补货决策系统 - 配置管理 API
// ==========================================
// 职责: 补货参数查询、更新（带审计）
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_reorder_params;
use crate::config::config_manager::{config_keys, ConfigManager};
use crate::config::reorder_config_trait::ReorderConfigReader;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::engine::reorder::ReorderParams;
use crate::repository::action_log_repo::ActionLogRepository;

/// 补货参数更新请求（缺省字段保持不变）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReorderParamsUpdate {
    pub safety_buffer_days: Option<u32>,
    pub target_coverage_days: Option<u32>,
}

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl ConfigApi {
    /// 创建新的ConfigApi实例
    pub fn new(config_manager: Arc<ConfigManager>, action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self {
            config_manager,
            action_log_repo,
        }
    }

    /// 查询当前补货参数
    pub fn get_reorder_params(&self) -> ApiResult<ReorderParams> {
        Ok(self.config_manager.get_reorder_params()?)
    }

    /// 查询所有已写入的配置
    pub fn get_config_snapshot(&self) -> ApiResult<BTreeMap<String, String>> {
        Ok(self.config_manager.get_config_snapshot()?)
    }

    /// 更新补货参数
    ///
    /// # 返回
    /// - Ok(ReorderParams): 更新后的完整参数
    /// - Err(ApiError::InvalidInput): 请求为空
    /// - Err(ApiError::ValidationError): 参数越界
    pub fn update_reorder_params(
        &self,
        update: ReorderParamsUpdate,
        actor: &str,
    ) -> ApiResult<ReorderParams> {
        if update.safety_buffer_days.is_none() && update.target_coverage_days.is_none() {
            return Err(ApiError::InvalidInput("更新内容为空".to_string()));
        }

        let before = self.config_manager.get_reorder_params()?;
        let after = ReorderParams {
            safety_buffer_days: update.safety_buffer_days.unwrap_or(before.safety_buffer_days),
            target_coverage_days: update
                .target_coverage_days
                .unwrap_or(before.target_coverage_days),
        };
        validate_reorder_params(&after)?;

        if let Some(days) = update.safety_buffer_days {
            self.config_manager
                .set_config_value(config_keys::SAFETY_BUFFER_DAYS, &days.to_string())?;
        }
        if let Some(days) = update.target_coverage_days {
            self.config_manager
                .set_config_value(config_keys::TARGET_COVERAGE_DAYS, &days.to_string())?;
        }

        self.action_log_repo.insert_or_warn(&ActionLog::new(
            None,
            ActionType::ConfigUpdate,
            actor,
            Some(json!({ "before": before, "after": after })),
            Some("更新补货参数".to_string()),
        ));

        info!(
            actor,
            safety_buffer_days = after.safety_buffer_days,
            target_coverage_days = after.target_coverage_days,
            "补货参数已更新"
        );
        Ok(after)
    }
}
