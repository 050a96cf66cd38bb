// ==========================================
// 库存补货决策系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、派生结果、值类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod analysis;
pub mod product;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use analysis::{
    CriticalityBreakdown, InventoryOverview, ReorderAnalysis, SpikeDetails, SpikeProjection,
    SpikeSimulation,
};
pub use product::{FieldViolation, NewProduct, Product, ProductPatch};
pub use types::{Criticality, DaysRemaining, StockDepletion};
