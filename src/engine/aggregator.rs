// ==========================================
// 库存补货决策系统 - 分析汇总与排序
// ==========================================
// 职责: 对产品集合批量执行补货判定，并按紧迫度排序
// 输入: 产品记录列表
// 输出: 排序后的 ReorderAnalysis 列表 / 驾驶舱概览
// ==========================================

use crate::domain::analysis::{CriticalityBreakdown, InventoryOverview, ReorderAnalysis};
use crate::domain::product::Product;
use crate::domain::types::Criticality;
use crate::engine::numeric::{round_half_up, to_decimal, to_f64, MONEY_DECIMAL_PLACES};
use crate::engine::reorder::ReorderEngine;
use rust_decimal::Decimal;
use std::cmp::Ordering;

// ==========================================
// AnalysisAggregator - 分析汇总器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisAggregator {
    engine: ReorderEngine,
}

impl AnalysisAggregator {
    pub fn new(engine: ReorderEngine) -> Self {
        Self { engine }
    }

    /// 批量分析并排序
    ///
    /// 排序键:
    /// 1) 需要补货的在前
    /// 2) 组内按关键度 high > medium > low
    ///
    /// 其余保持输入顺序（稳定排序）。
    pub fn rank(&self, products: &[Product]) -> Vec<ReorderAnalysis> {
        let mut analyses: Vec<ReorderAnalysis> =
            products.iter().map(|p| self.engine.analyze(p)).collect();
        analyses.sort_by(compare_urgency);
        analyses
    }

    /// 仅返回需要补货的产品（已排序）
    pub fn reorder_list(&self, products: &[Product]) -> Vec<ReorderAnalysis> {
        self.rank(products)
            .into_iter()
            .filter(|a| a.needs_reorder)
            .collect()
    }

    /// 生成驾驶舱概览
    pub fn overview(&self, analyses: &[ReorderAnalysis]) -> InventoryOverview {
        let mut total_cost = Decimal::ZERO;
        let mut needs_reorder_count = 0;
        let mut high_criticality_reorder_count = 0;
        let mut unlimited_stock_count = 0;

        for analysis in analyses {
            if analysis.needs_reorder {
                needs_reorder_count += 1;
                total_cost += to_decimal(analysis.estimated_cost);
                if analysis.product.criticality == Criticality::High {
                    high_criticality_reorder_count += 1;
                }
            }
            if analysis.days_remaining.is_unlimited() {
                unlimited_stock_count += 1;
            }
        }

        let by_criticality = Criticality::ALL
            .iter()
            .map(|&criticality| {
                let group = analyses
                    .iter()
                    .filter(|a| a.product.criticality == criticality);
                CriticalityBreakdown {
                    criticality,
                    total: group.clone().count(),
                    needs_reorder: group.filter(|a| a.needs_reorder).count(),
                }
            })
            .collect();

        InventoryOverview {
            total_products: analyses.len(),
            needs_reorder_count,
            high_criticality_reorder_count,
            unlimited_stock_count,
            total_estimated_cost: to_f64(round_half_up(total_cost, MONEY_DECIMAL_PLACES)),
            by_criticality,
        }
    }
}

/// 紧迫度比较
///
/// Ordering::Less 表示 a 应排在 b 之前
pub fn compare_urgency(a: &ReorderAnalysis, b: &ReorderAnalysis) -> Ordering {
    b.needs_reorder
        .cmp(&a.needs_reorder)
        .then_with(|| a.product.criticality.cmp_urgency(b.product.criticality))
}
