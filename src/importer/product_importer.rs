// ==========================================
// 库存补货决策系统 - 产品批量导入
// ==========================================
// 流程: 解析 → 表头检查 → 逐行映射/校验 → 写入（重复主键跳过）
// 输出: ImportReport
// ==========================================

use crate::importer::csv_parser::{normalize_header, CsvParser};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{ProductFieldMapper, REQUIRED_COLUMNS};
use crate::repository::error::RepositoryError;
use crate::repository::product_repo::ProductRepository;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 单行失败
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    pub row_number: usize,
    pub product_id: Option<String>,
    pub reason: String,
}

/// 导入结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: usize,
    pub duplicates: usize,
    pub failures: Vec<ImportFailure>,
}

// ==========================================
// ProductCsvImporter
// ==========================================
pub struct ProductCsvImporter {
    repo: Arc<dyn ProductRepository>,
    parser: CsvParser,
    mapper: ProductFieldMapper,
}

impl ProductCsvImporter {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            repo,
            parser: CsvParser,
            mapper: ProductFieldMapper,
        }
    }

    /// 从文件导入
    pub fn import_from_path(&self, path: &Path) -> ImportResult<ImportReport> {
        let (headers, rows) = self.parser.parse_file(path)?;
        self.import_rows(&headers, rows)
    }

    /// 从输入流导入
    pub fn import_from_reader<R: Read>(&self, reader: R) -> ImportResult<ImportReport> {
        let (headers, rows) = self.parser.parse_reader(reader)?;
        self.import_rows(&headers, rows)
    }

    fn import_rows(
        &self,
        headers: &[String],
        rows: Vec<crate::importer::csv_parser::RawRow>,
    ) -> ImportResult<ImportReport> {
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|c| !headers.contains(&normalize_header(c)))
        {
            return Err(ImportError::MissingColumn(missing.to_string()));
        }

        let mut report = ImportReport {
            total_rows: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let product_id = row.get("productId").map(str::to_string);
            let fail = |reason: String| ImportFailure {
                row_number: row.row_number,
                product_id: product_id.clone(),
                reason,
            };

            let new_product = match self.mapper.map_row(&row) {
                Ok(p) => p,
                Err(reason) => {
                    report.failures.push(fail(reason));
                    continue;
                }
            };

            let violations = new_product.violations();
            if !violations.is_empty() {
                let reason = violations
                    .iter()
                    .map(|v| format!("{}: {}", v.field, v.reason))
                    .collect::<Vec<_>>()
                    .join("; ");
                report.failures.push(fail(reason));
                continue;
            }

            match self.repo.create(new_product) {
                Ok(_) => report.imported += 1,
                Err(RepositoryError::DuplicateKey { id, .. }) => {
                    debug!(row = row.row_number, product_id = %id, "导入跳过重复产品");
                    report.duplicates += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            total_rows = report.total_rows,
            imported = report.imported,
            duplicates = report.duplicates,
            failed = report.failures.len(),
            "产品导入完成"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;
    use crate::repository::product_repo::ProductRepositoryImpl;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn importer() -> (ProductCsvImporter, Arc<ProductRepositoryImpl>) {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let repo = Arc::new(ProductRepositoryImpl::from_connection(Arc::new(Mutex::new(conn))));
        (ProductCsvImporter::new(repo.clone()), repo)
    }

    #[test]
    fn test_import_mixed_rows() {
        let (importer, repo) = importer();
        let data = "\
product_id,name,current_stock,average_daily_sales,supplier_lead_time,minimum_reorder_quantity,cost_per_unit,criticality
SKU-1,轴承,45,3.2,7,50,12.5,high
SKU-2,齿轮,8,4.1,9,100,2.5,medium
SKU-1,重复,1,1,1,1,1,low
SKU-3,坏行,10,abc,5,1,1,low
SKU-4,零成本,10,1,5,1,0,low
";
        let report = importer.import_from_reader(data.as_bytes()).unwrap();

        assert_eq!(report.total_rows, 5);
        assert_eq!(report.imported, 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].row_number, 5);
        assert_eq!(report.failures[0].product_id.as_deref(), Some("SKU-3"));
        assert!(report.failures[1].reason.contains("costPerUnit"));

        assert_eq!(repo.find_all().unwrap().len(), 2);
        assert_eq!(repo.find_by_id("SKU-1").unwrap().unwrap().name, "轴承");
    }

    #[test]
    fn test_missing_column_rejects_file() {
        let (importer, _) = importer();
        let data = "productId,name\nSKU-1,轴承\n";
        let err = importer.import_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == "currentStock"));
    }
}
