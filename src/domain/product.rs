// ==========================================
// 库存补货决策系统 - 产品领域模型
// ==========================================
// 用途: 仓储层持有，引擎层只读借用
// 对齐: product 表
// ==========================================

use crate::domain::types::Criticality;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Product - 产品记录
// ==========================================
// 红线: product_id 全局唯一，创建后不可修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    // ===== 主键 =====
    pub product_id: String, // 产品唯一标识

    // ===== 基础信息 =====
    pub name: String,

    // ===== 库存与销量 =====
    pub current_stock: u32,       // 当前库存（件）
    pub average_daily_sales: f64, // 日均销量（0 = 无消耗）

    // ===== 供应参数 =====
    pub supplier_lead_time: u32,       // 供应商交货周期（天，≥1）
    pub minimum_reorder_quantity: u32, // 最小起订量（件，≥1）
    pub cost_per_unit: f64,            // 单位成本（>0）

    // ===== 分级 =====
    pub criticality: Criticality,

    // ===== 审计字段 =====
    pub last_updated: DateTime<Utc>, // 创建及每次更新时由仓储层写入
}

// ==========================================
// NewProduct - 创建请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_id: String,
    pub name: String,
    pub current_stock: u32,
    pub average_daily_sales: f64,
    pub supplier_lead_time: u32,
    pub minimum_reorder_quantity: u32,
    pub cost_per_unit: f64,
    pub criticality: Criticality,
}

impl NewProduct {
    /// 生成产品记录（去除标识/名称首尾空白）
    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        Product {
            product_id: self.product_id.trim().to_string(),
            name: self.name.trim().to_string(),
            current_stock: self.current_stock,
            average_daily_sales: self.average_daily_sales,
            supplier_lead_time: self.supplier_lead_time,
            minimum_reorder_quantity: self.minimum_reorder_quantity,
            cost_per_unit: self.cost_per_unit,
            criticality: self.criticality,
            last_updated: now,
        }
    }
}

// ==========================================
// ProductPatch - 局部更新
// ==========================================
// product_id 不在可更新字段之列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub current_stock: Option<u32>,
    pub average_daily_sales: Option<f64>,
    pub supplier_lead_time: Option<u32>,
    pub minimum_reorder_quantity: Option<u32>,
    pub cost_per_unit: Option<f64>,
    pub criticality: Option<Criticality>,
}

impl ProductPatch {
    /// 是否不包含任何字段
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.current_stock.is_none()
            && self.average_daily_sales.is_none()
            && self.supplier_lead_time.is_none()
            && self.minimum_reorder_quantity.is_none()
            && self.cost_per_unit.is_none()
            && self.criticality.is_none()
    }

    /// 将补丁应用到产品记录（last_updated 由调用方设置）
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.trim().to_string();
        }
        if let Some(stock) = self.current_stock {
            product.current_stock = stock;
        }
        if let Some(sales) = self.average_daily_sales {
            product.average_daily_sales = sales;
        }
        if let Some(lead_time) = self.supplier_lead_time {
            product.supplier_lead_time = lead_time;
        }
        if let Some(min_qty) = self.minimum_reorder_quantity {
            product.minimum_reorder_quantity = min_qty;
        }
        if let Some(cost) = self.cost_per_unit {
            product.cost_per_unit = cost;
        }
        if let Some(criticality) = self.criticality {
            product.criticality = criticality;
        }
    }
}

// ==========================================
// 字段校验规则（API 与导入共用）
// ==========================================

pub const MAX_PRODUCT_ID_LEN: usize = 64;
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_AVERAGE_DAILY_SALES: f64 = 1_000_000.0;
pub const MAX_SUPPLIER_LEAD_TIME: u32 = 3_650;
pub const MAX_COST_PER_UNIT: f64 = 1_000_000_000.0;

/// 单个字段的违规说明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

fn check_name(name: &str, out: &mut Vec<FieldViolation>) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        out.push(FieldViolation::new("name", "不能为空"));
    } else if trimmed.chars().count() > MAX_NAME_LEN {
        out.push(FieldViolation::new("name", format!("长度不能超过 {}", MAX_NAME_LEN)));
    }
}

fn check_sales(sales: f64, out: &mut Vec<FieldViolation>) {
    if !sales.is_finite() || sales < 0.0 {
        out.push(FieldViolation::new("averageDailySales", "必须为非负数"));
    } else if sales > MAX_AVERAGE_DAILY_SALES {
        out.push(FieldViolation::new(
            "averageDailySales",
            format!("不能超过 {}", MAX_AVERAGE_DAILY_SALES),
        ));
    }
}

fn check_lead_time(lead_time: u32, out: &mut Vec<FieldViolation>) {
    if lead_time < 1 || lead_time > MAX_SUPPLIER_LEAD_TIME {
        out.push(FieldViolation::new(
            "supplierLeadTime",
            format!("必须在 1..={} 天之间", MAX_SUPPLIER_LEAD_TIME),
        ));
    }
}

fn check_min_qty(min_qty: u32, out: &mut Vec<FieldViolation>) {
    if min_qty < 1 {
        out.push(FieldViolation::new("minimumReorderQuantity", "必须至少为 1"));
    }
}

fn check_cost(cost: f64, out: &mut Vec<FieldViolation>) {
    if !cost.is_finite() || cost <= 0.0 {
        out.push(FieldViolation::new("costPerUnit", "必须为正数"));
    } else if cost > MAX_COST_PER_UNIT {
        out.push(FieldViolation::new(
            "costPerUnit",
            format!("不能超过 {}", MAX_COST_PER_UNIT),
        ));
    }
}

impl NewProduct {
    /// 返回全部字段违规（空 = 合法）
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut out = Vec::new();

        let id = self.product_id.trim();
        if id.is_empty() {
            out.push(FieldViolation::new("productId", "不能为空"));
        } else if id.chars().count() > MAX_PRODUCT_ID_LEN {
            out.push(FieldViolation::new(
                "productId",
                format!("长度不能超过 {}", MAX_PRODUCT_ID_LEN),
            ));
        }
        check_name(&self.name, &mut out);
        check_sales(self.average_daily_sales, &mut out);
        check_lead_time(self.supplier_lead_time, &mut out);
        check_min_qty(self.minimum_reorder_quantity, &mut out);
        check_cost(self.cost_per_unit, &mut out);
        out
    }
}

impl ProductPatch {
    /// 仅校验补丁中出现的字段
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut out);
        }
        if let Some(sales) = self.average_daily_sales {
            check_sales(sales, &mut out);
        }
        if let Some(lead_time) = self.supplier_lead_time {
            check_lead_time(lead_time, &mut out);
        }
        if let Some(min_qty) = self.minimum_reorder_quantity {
            check_min_qty(min_qty, &mut out);
        }
        if let Some(cost) = self.cost_per_unit {
            check_cost(cost, &mut out);
        }
        out
    }
}
