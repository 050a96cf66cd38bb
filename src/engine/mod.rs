// ==========================================
// 库存补货决策系统 - 引擎层
// ==========================================
// 职责: 补货判定、需求激增预测、分析汇总
// 红线: Engine 不拼 SQL, 不写日志, 无共享可变状态
// ==========================================

pub mod aggregator;
pub mod error;
pub mod numeric;
pub mod reorder;
pub mod spike;

// 重导出核心引擎
pub use aggregator::{compare_urgency, AnalysisAggregator};
pub use error::{EngineError, EngineResult};
pub use reorder::{
    days_of_stock_remaining, estimated_cost, needs_reorder, optimal_reorder_quantity,
    safety_stock_threshold, ReorderEngine, ReorderParams, DEFAULT_SAFETY_BUFFER_DAYS,
    DEFAULT_TARGET_COVERAGE_DAYS,
};
pub use spike::{SpikeForecaster, SPIKE_FORECAST_WINDOW_DAYS};
