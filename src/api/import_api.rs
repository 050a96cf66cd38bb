// ==========================================
// 库存补货决策系统 - 产品导入 API
// ==========================================
// 职责: 封装 CSV 导入 + 导入审计
// ==========================================

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::api::error::ApiResult;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::importer::{ImportReport, ProductCsvImporter};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::product_repo::ProductRepository;

pub struct ImportApi {
    importer: ProductCsvImporter,
    action_log_repo: Arc<ActionLogRepository>,
}

impl ImportApi {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            importer: ProductCsvImporter::new(product_repo),
            action_log_repo,
        }
    }

    /// 从输入流导入（HTTP 请求体）
    pub fn import_csv<R: Read>(&self, reader: R, actor: &str) -> ApiResult<ImportReport> {
        let start = Instant::now();
        let report = self.importer.import_from_reader(reader)?;
        self.record(&report, actor, None, start);
        Ok(report)
    }

    /// 从本地文件导入
    pub fn import_csv_file(&self, path: &Path, actor: &str) -> ApiResult<ImportReport> {
        let start = Instant::now();
        let report = self.importer.import_from_path(path)?;
        self.record(&report, actor, Some(path), start);
        Ok(report)
    }

    fn record(
        &self,
        report: &ImportReport,
        actor: &str,
        path: Option<&Path>,
        start: Instant,
    ) {
        let elapsed_ms = start.elapsed().as_millis() as u64;
        let detail = path.map(|p| format!("导入文件: {}", p.display()));

        self.action_log_repo.insert_or_warn(&ActionLog::new(
            None,
            ActionType::Import,
            actor,
            serde_json::to_value(report).ok(),
            detail,
        ));

        info!(
            actor,
            imported = report.imported,
            duplicates = report.duplicates,
            failed = report.failures.len(),
            elapsed_ms,
            "CSV 导入完成"
        );
    }
}
