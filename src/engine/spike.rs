// ==========================================
// 库存补货决策系统 - 需求激增预测器
// ==========================================
// 职责: 按假设的激增倍数/持续天数，预测 30 天窗口后的库存状态
// 输入: 产品记录 + 激增倍数 + 持续天数
// 输出: SpikeSimulation (original + afterSpike + spikeDetails)
// ==========================================
// 红线: 库存不得为负（超额消耗截断为 0，不报缺口）
// 红线: 当前库存为 0 时消耗比例为 NotApplicable
// ==========================================

use crate::domain::analysis::{SpikeDetails, SpikeProjection, SpikeSimulation};
use crate::domain::product::Product;
use crate::domain::types::StockDepletion;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::numeric::{round_half_up, to_decimal, to_f64, MONEY_DECIMAL_PLACES};
use crate::engine::reorder::ReorderEngine;
use rust_decimal::Decimal;

/// 预测窗口（天）
pub const SPIKE_FORECAST_WINDOW_DAYS: u32 = 30;

/// 激增倍数上限
pub const MAX_SPIKE_MULTIPLIER: f64 = 1_000.0;

/// 激增持续天数上限
pub const MAX_SPIKE_DURATION_DAYS: u32 = 3_650;

// ==========================================
// SpikeForecaster - 需求激增预测器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct SpikeForecaster {
    engine: ReorderEngine,
}

impl SpikeForecaster {
    pub fn new(engine: ReorderEngine) -> Self {
        Self { engine }
    }

    /// 执行激增模拟
    ///
    /// # 参数
    /// - `product`: 产品记录
    /// - `multiplier`: 激增倍数（>0，有限值）
    /// - `duration_days`: 激增持续天数（>0）
    ///
    /// # 返回
    /// - Ok(SpikeSimulation)
    /// - Err(EngineError::InvalidInput): 参数非正或越界
    pub fn simulate(
        &self,
        product: &Product,
        multiplier: f64,
        duration_days: u32,
    ) -> EngineResult<SpikeSimulation> {
        validate_spike_params(multiplier, duration_days)?;

        let daily_sales = to_decimal(product.average_daily_sales);
        let stock = Decimal::from(product.current_stock);
        let duration = Decimal::from(duration_days);

        // 1-3. 激增销量、总消耗、激增后库存
        let spiked_daily_sales = daily_sales * to_decimal(multiplier);
        let total_consumption = spiked_daily_sales * duration;
        let stock_after_spike = (stock - total_consumption).max(Decimal::ZERO);

        // 4. 窗口内加权日均销量
        let new_average = blended_daily_sales(daily_sales, spiked_daily_sales, duration_days);

        // 5. 以激增后状态重新判定
        let decision = self.engine.decide(
            stock_after_spike,
            new_average,
            product.supplier_lead_time,
            product.minimum_reorder_quantity,
            to_decimal(product.cost_per_unit),
        );

        // 6. 库存消耗比例
        let stock_depletion = if product.current_stock == 0 {
            StockDepletion::NotApplicable
        } else {
            let pct = total_consumption / stock * Decimal::ONE_HUNDRED;
            StockDepletion::Percent(to_f64(round_half_up(pct, MONEY_DECIMAL_PLACES)))
        };

        Ok(SpikeSimulation {
            original: self.engine.analyze(product),
            after_spike: SpikeProjection {
                current_stock: to_f64(stock_after_spike),
                average_daily_sales: to_f64(new_average),
                days_remaining: decision.days_remaining,
                safety_threshold: decision.safety_threshold,
                needs_reorder: decision.needs_reorder,
                optimal_reorder_quantity: to_f64(decision.optimal_reorder_quantity),
                estimated_cost: to_f64(decision.estimated_cost),
            },
            spike_details: SpikeDetails {
                multiplier,
                duration_days,
                forecast_window_days: SPIKE_FORECAST_WINDOW_DAYS,
                spiked_daily_sales: to_f64(spiked_daily_sales),
                total_consumption: to_f64(total_consumption),
                stock_depletion,
            },
        })
    }
}

/// 窗口内加权日均销量
///
/// 持续天数覆盖整个窗口时直接取激增销量；否则按天数加权混合。
fn blended_daily_sales(daily_sales: Decimal, spiked_daily_sales: Decimal, duration_days: u32) -> Decimal {
    if duration_days >= SPIKE_FORECAST_WINDOW_DAYS {
        return spiked_daily_sales;
    }
    let window = Decimal::from(SPIKE_FORECAST_WINDOW_DAYS);
    let duration = Decimal::from(duration_days);
    (daily_sales * (window - duration) + spiked_daily_sales * duration) / window
}

/// 校验激增参数
pub fn validate_spike_params(multiplier: f64, duration_days: u32) -> EngineResult<()> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "激增倍数必须为正数: {}",
            multiplier
        )));
    }
    if multiplier > MAX_SPIKE_MULTIPLIER {
        return Err(EngineError::InvalidInput(format!(
            "激增倍数超出上限 {}: {}",
            MAX_SPIKE_MULTIPLIER, multiplier
        )));
    }
    if duration_days == 0 {
        return Err(EngineError::InvalidInput("激增持续天数必须大于 0".to_string()));
    }
    if duration_days > MAX_SPIKE_DURATION_DAYS {
        return Err(EngineError::InvalidInput(format!(
            "激增持续天数超出上限 {}: {}",
            MAX_SPIKE_DURATION_DAYS, duration_days
        )));
    }
    Ok(())
}
