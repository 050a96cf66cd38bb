// ==========================================
// 库存补货决策系统 - 引擎层错误类型
// ==========================================
// 引擎为纯计算，只存在参数越界一类错误
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("无效输入: {0}")]
    InvalidInput(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
