// ==========================================
// 库存补货决策系统 - 补货判定引擎
// ==========================================
// 职责: 库存可用天数、安全阈值、补货触发、建议补货量、预估成本
// 输入: 产品记录（只读借用）
// 输出: ReorderAnalysis
// ==========================================
// 红线: 纯函数，无副作用，相同输入必得相同输出
// ==========================================

use crate::domain::analysis::ReorderAnalysis;
use crate::domain::product::Product;
use crate::domain::types::DaysRemaining;
use crate::engine::numeric::{
    floor_to_u64, round_half_up, to_decimal, to_f64, MONEY_DECIMAL_PLACES,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 默认安全缓冲天数
pub const DEFAULT_SAFETY_BUFFER_DAYS: u32 = 5;

/// 默认目标覆盖天数（补货后应覆盖的销售天数）
pub const DEFAULT_TARGET_COVERAGE_DAYS: u32 = 60;

// ==========================================
// ReorderParams - 补货参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderParams {
    pub safety_buffer_days: u32,
    pub target_coverage_days: u32,
}

impl Default for ReorderParams {
    fn default() -> Self {
        Self {
            safety_buffer_days: DEFAULT_SAFETY_BUFFER_DAYS,
            target_coverage_days: DEFAULT_TARGET_COVERAGE_DAYS,
        }
    }
}

// ==========================================
// 基础公式
// ==========================================

/// 库存可用天数
///
/// 日均销量为 0 时返回 Unlimited；否则 floor(stock / daily_sales)。
pub fn days_of_stock_remaining(stock: f64, daily_sales: f64) -> DaysRemaining {
    days_remaining_dec(to_decimal(stock), to_decimal(daily_sales))
}

/// 安全库存阈值（天）= 交货周期 + 缓冲天数
pub fn safety_stock_threshold(lead_time_days: u32, buffer_days: u32) -> u32 {
    lead_time_days.saturating_add(buffer_days)
}

/// 是否触发补货
///
/// Unlimited 大于任何有限阈值，永不触发。
pub fn needs_reorder(days_remaining: DaysRemaining, safety_threshold: u32) -> bool {
    match days_remaining {
        DaysRemaining::Finite(days) => days <= u64::from(safety_threshold),
        DaysRemaining::Unlimited => false,
    }
}

/// 建议补货量 = max(0, 日均销量 × 目标天数 − 当前库存)
///
/// 最小起订量的兜底由调用方在触发补货时处理。
pub fn optimal_reorder_quantity(daily_sales: f64, target_days: u32, current_stock: f64) -> f64 {
    to_f64(optimal_quantity_dec(
        to_decimal(daily_sales),
        target_days,
        to_decimal(current_stock),
    ))
}

/// 预估成本 = round(数量 × 单位成本, 2)，四舍五入
pub fn estimated_cost(quantity: f64, cost_per_unit: f64) -> f64 {
    to_f64(estimated_cost_dec(
        to_decimal(quantity),
        to_decimal(cost_per_unit),
    ))
}

pub(crate) fn days_remaining_dec(stock: Decimal, daily_sales: Decimal) -> DaysRemaining {
    if daily_sales <= Decimal::ZERO {
        return DaysRemaining::Unlimited;
    }
    let stock = stock.max(Decimal::ZERO);
    match stock.checked_div(daily_sales) {
        Some(days) => DaysRemaining::Finite(floor_to_u64(days)),
        None => DaysRemaining::Finite(u64::MAX),
    }
}

pub(crate) fn optimal_quantity_dec(
    daily_sales: Decimal,
    target_days: u32,
    current_stock: Decimal,
) -> Decimal {
    (daily_sales * Decimal::from(target_days) - current_stock).max(Decimal::ZERO)
}

pub(crate) fn estimated_cost_dec(quantity: Decimal, cost_per_unit: Decimal) -> Decimal {
    round_half_up(quantity * cost_per_unit, MONEY_DECIMAL_PLACES)
}

// ==========================================
// ReorderDecision - 单次判定的中间结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ReorderDecision {
    pub days_remaining: DaysRemaining,
    pub safety_threshold: u32,
    pub needs_reorder: bool,
    pub optimal_reorder_quantity: Decimal,
    pub estimated_cost: Decimal,
}

// ==========================================
// ReorderEngine - 补货判定引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ReorderEngine {
    params: ReorderParams,
}

impl ReorderEngine {
    pub fn new(params: ReorderParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> ReorderParams {
        self.params
    }

    /// 分析单个产品
    ///
    /// # 返回
    /// 复制产品字段并附带五个派生字段的 ReorderAnalysis
    pub fn analyze(&self, product: &Product) -> ReorderAnalysis {
        let decision = self.decide(
            Decimal::from(product.current_stock),
            to_decimal(product.average_daily_sales),
            product.supplier_lead_time,
            product.minimum_reorder_quantity,
            to_decimal(product.cost_per_unit),
        );

        ReorderAnalysis {
            product: product.clone(),
            days_remaining: decision.days_remaining,
            safety_threshold: decision.safety_threshold,
            needs_reorder: decision.needs_reorder,
            optimal_reorder_quantity: to_f64(decision.optimal_reorder_quantity),
            estimated_cost: to_f64(decision.estimated_cost),
        }
    }

    /// 对任意库存/销量组合执行完整判定（分析与激增预测共用）
    ///
    /// 最小起订量只在触发补货时兜底；不触发时补货量与成本均为 0。
    pub(crate) fn decide(
        &self,
        stock: Decimal,
        daily_sales: Decimal,
        lead_time_days: u32,
        minimum_reorder_quantity: u32,
        cost_per_unit: Decimal,
    ) -> ReorderDecision {
        let days_remaining = days_remaining_dec(stock, daily_sales);
        let safety_threshold =
            safety_stock_threshold(lead_time_days, self.params.safety_buffer_days);
        let needs_reorder = needs_reorder(days_remaining, safety_threshold);

        let optimal_reorder_quantity = if needs_reorder {
            optimal_quantity_dec(daily_sales, self.params.target_coverage_days, stock)
                .max(Decimal::from(minimum_reorder_quantity))
        } else {
            Decimal::ZERO
        };

        ReorderDecision {
            days_remaining,
            safety_threshold,
            needs_reorder,
            optimal_reorder_quantity,
            estimated_cost: estimated_cost_dec(optimal_reorder_quantity, cost_per_unit),
        }
    }
}
