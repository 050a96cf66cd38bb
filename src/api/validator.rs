// ==========================================
// 库存补货决策系统 - 请求校验器
// ==========================================
// 职责: API 入参校验，失败时给出逐字段原因
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::product::{FieldViolation, NewProduct, ProductPatch};
use crate::engine::reorder::ReorderParams;

/// 安全缓冲天数上限
pub const MAX_SAFETY_BUFFER_DAYS: u32 = 365;

/// 目标覆盖天数上限
pub const MAX_TARGET_COVERAGE_DAYS: u32 = 3_650;

/// 日志查询条数上限
pub const MAX_ACTION_LIMIT: usize = 500;

/// 日志查询默认条数
pub const DEFAULT_ACTION_LIMIT: usize = 50;

// ==========================================
// ProductValidator
// ==========================================
pub struct ProductValidator;

impl ProductValidator {
    /// 校验新建请求
    pub fn validate_new(new_product: &NewProduct) -> ApiResult<()> {
        let violations = new_product.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::from_violations(violations))
        }
    }

    /// 校验更新请求（空补丁视为无效输入）
    pub fn validate_patch(patch: &ProductPatch) -> ApiResult<()> {
        if patch.is_empty() {
            return Err(ApiError::InvalidInput("更新内容为空".to_string()));
        }
        let violations = patch.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::from_violations(violations))
        }
    }

    /// 校验并规范化 productId
    pub fn validate_product_id(product_id: &str) -> ApiResult<String> {
        let trimmed = product_id.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput("productId 不能为空".to_string()));
        }
        Ok(trimmed.to_string())
    }
}

/// 校验补货参数
pub fn validate_reorder_params(params: &ReorderParams) -> ApiResult<()> {
    let mut violations = Vec::new();
    if params.safety_buffer_days > MAX_SAFETY_BUFFER_DAYS {
        violations.push(FieldViolation {
            field: "safetyBufferDays".to_string(),
            reason: format!("必须在 0..={} 天之间", MAX_SAFETY_BUFFER_DAYS),
        });
    }
    if params.target_coverage_days < 1 || params.target_coverage_days > MAX_TARGET_COVERAGE_DAYS {
        violations.push(FieldViolation {
            field: "targetCoverageDays".to_string(),
            reason: format!("必须在 1..={} 天之间", MAX_TARGET_COVERAGE_DAYS),
        });
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::from_violations(violations))
    }
}

/// 规范化日志查询条数（缺省取默认值，超限截断）
pub fn normalize_limit(limit: Option<usize>) -> ApiResult<usize> {
    match limit {
        None => Ok(DEFAULT_ACTION_LIMIT),
        Some(0) => Err(ApiError::InvalidInput("limit 必须大于 0".to_string())),
        Some(n) => Ok(n.min(MAX_ACTION_LIMIT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_patch() {
        assert!(matches!(
            ProductValidator::validate_patch(&ProductPatch::default()),
            Err(ApiError::InvalidInput(_))
        ));

        let patch = ProductPatch {
            supplier_lead_time: Some(0),
            ..Default::default()
        };
        match ProductValidator::validate_patch(&patch) {
            Err(ApiError::ValidationError { violations, .. }) => {
                assert_eq!(violations[0].field, "supplierLeadTime");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_product_id() {
        assert_eq!(ProductValidator::validate_product_id(" SKU-1 ").unwrap(), "SKU-1");
        assert!(ProductValidator::validate_product_id("   ").is_err());
    }

    #[test]
    fn test_validate_reorder_params() {
        assert!(validate_reorder_params(&ReorderParams::default()).is_ok());
        assert!(validate_reorder_params(&ReorderParams {
            safety_buffer_days: 0,
            target_coverage_days: 1,
        })
        .is_ok());

        let err = validate_reorder_params(&ReorderParams {
            safety_buffer_days: 400,
            target_coverage_days: 0,
        })
        .unwrap_err();
        match err {
            ApiError::ValidationError { violations, .. } => assert_eq!(violations.len(), 2),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_limit() {
        assert_eq!(normalize_limit(None).unwrap(), DEFAULT_ACTION_LIMIT);
        assert_eq!(normalize_limit(Some(10_000)).unwrap(), MAX_ACTION_LIMIT);
        assert!(normalize_limit(Some(0)).is_err());
    }
}
