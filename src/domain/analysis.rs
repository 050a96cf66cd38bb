// ==========================================
// 库存补货决策系统 - 派生分析结果
// ==========================================
// 生命周期: 按需计算，不落库
// ==========================================

use crate::domain::product::Product;
use crate::domain::types::{Criticality, DaysRemaining, StockDepletion};
use serde::{Deserialize, Serialize};

// ==========================================
// ReorderAnalysis - 补货分析结果
// ==========================================
// 复制产品全部字段，并追加五个派生字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderAnalysis {
    #[serde(flatten)]
    pub product: Product,

    pub days_remaining: DaysRemaining,
    pub safety_threshold: u32,
    pub needs_reorder: bool,
    pub optimal_reorder_quantity: f64, // 不需补货时为 0
    pub estimated_cost: f64,           // 2 位小数
}

// ==========================================
// SpikeSimulation - 需求激增模拟结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpikeSimulation {
    pub original: ReorderAnalysis,
    pub after_spike: SpikeProjection,
    pub spike_details: SpikeDetails,
}

/// 激增后的预测状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpikeProjection {
    pub current_stock: f64,       // 激增后剩余库存（不小于 0）
    pub average_daily_sales: f64, // 预测窗口内的加权日均销量
    pub days_remaining: DaysRemaining,
    pub safety_threshold: u32,
    pub needs_reorder: bool,
    pub optimal_reorder_quantity: f64,
    pub estimated_cost: f64,
}

/// 激增参数与消耗明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpikeDetails {
    pub multiplier: f64,
    pub duration_days: u32,
    pub forecast_window_days: u32,
    pub spiked_daily_sales: f64,
    pub total_consumption: f64,
    pub stock_depletion: StockDepletion, // 百分比，2 位小数
}

// ==========================================
// InventoryOverview - 驾驶舱概览
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverview {
    pub total_products: usize,
    pub needs_reorder_count: usize,
    pub high_criticality_reorder_count: usize,
    pub unlimited_stock_count: usize,
    pub total_estimated_cost: f64,
    pub by_criticality: Vec<CriticalityBreakdown>,
}

/// 按关键度统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalityBreakdown {
    pub criticality: Criticality,
    pub total: usize,
    pub needs_reorder: usize,
}
