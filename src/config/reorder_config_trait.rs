// ==========================================
// 库存补货决策系统 - 补货参数读取 Trait
// ==========================================
// 职责: 定义 API 层构造引擎所需的配置读取接口
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::engine::reorder::ReorderParams;
use crate::repository::error::RepositoryResult;

// ==========================================
// ReorderConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ReorderConfigReader: Send + Sync {
    /// 安全缓冲天数（阈值 = 交货周期 + 缓冲）
    ///
    /// # 默认值
    /// - 5
    fn get_safety_buffer_days(&self) -> RepositoryResult<u32>;

    /// 目标覆盖天数（补货量按该天数的需求计算）
    ///
    /// # 默认值
    /// - 60
    fn get_target_coverage_days(&self) -> RepositoryResult<u32>;

    /// 组合为引擎参数
    fn get_reorder_params(&self) -> RepositoryResult<ReorderParams> {
        Ok(ReorderParams {
            safety_buffer_days: self.get_safety_buffer_days()?,
            target_coverage_days: self.get_target_coverage_days()?,
        })
    }
}
