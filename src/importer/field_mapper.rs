// ==========================================
// 库存补货决策系统 - 字段映射
// ==========================================
// 职责: RawRow → NewProduct（类型转换）
// 说明: 取值范围校验由 NewProduct::violations 负责
// ==========================================

use crate::domain::product::NewProduct;
use crate::domain::types::Criticality;
use crate::importer::csv_parser::RawRow;
use std::str::FromStr;

/// 必需列（规范化前的展示名）
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "productId",
    "name",
    "currentStock",
    "averageDailySales",
    "supplierLeadTime",
    "minimumReorderQuantity",
    "costPerUnit",
    "criticality",
];

pub struct ProductFieldMapper;

impl ProductFieldMapper {
    /// 映射单行
    ///
    /// # 返回
    /// - Err(String): 该行的失败原因
    pub fn map_row(&self, row: &RawRow) -> Result<NewProduct, String> {
        Ok(NewProduct {
            product_id: required(row, "productId")?.to_string(),
            name: required(row, "name")?.to_string(),
            current_stock: parse_field(row, "currentStock")?,
            average_daily_sales: parse_field(row, "averageDailySales")?,
            supplier_lead_time: parse_field(row, "supplierLeadTime")?,
            minimum_reorder_quantity: parse_field(row, "minimumReorderQuantity")?,
            cost_per_unit: parse_field(row, "costPerUnit")?,
            criticality: parse_field::<Criticality>(row, "criticality")?,
        })
    }
}

fn required<'a>(row: &'a RawRow, column: &str) -> Result<&'a str, String> {
    row.get(column).ok_or_else(|| format!("字段 {} 为空", column))
}

fn parse_field<T>(row: &RawRow, column: &str) -> Result<T, String>
where
    T: FromStr,
{
    let raw = required(row, column)?;
    raw.parse::<T>()
        .map_err(|_| format!("字段 {} 取值无效: {}", column, raw))
}
