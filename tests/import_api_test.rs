// ==========================================
// ImportApi 集成测试
// ==========================================
// 测试范围:
// 1. CSV 文本导入: import_csv
// 2. CSV 文件导入: import_csv_file
// 3. 行级失败、重复跳过与审计日志
// ==========================================

mod helpers;

use std::io::Write;

use helpers::api_test_helper::*;
use inventory_reorder::api::ApiError;
use inventory_reorder::domain::{ActionType, Criticality};
use tempfile::Builder;

const HEADER: &str = "productId,name,currentStock,averageDailySales,supplierLeadTime,minimumReorderQuantity,costPerUnit,criticality";

#[test]
fn test_import_csv_全部成功() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let data = format!(
        "{}\nSKU-001,轴承 6204,45,3.2,7,50,12.5,high\nSKU-002,齿轮,8,4.1,9,50,12.5,MEDIUM\n",
        HEADER
    );
    let report = env
        .import_api
        .import_csv(data.as_bytes(), "importer")
        .expect("导入失败");

    assert_eq!(report.total_rows, 2);
    assert_eq!(report.imported, 2);
    assert_eq!(report.duplicates, 0);
    assert!(report.failures.is_empty());

    let product = env.product_api.get_product("SKU-002").expect("查询失败");
    assert_eq!(product.criticality, Criticality::Medium);
    assert_eq!(product.average_daily_sales, 4.1);
}

#[test]
fn test_import_csv_行级失败与重复() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed(vec![healthy_product("SKU-001")]);

    let data = format!(
        "{}\nSKU-001,重复产品,1,1,1,1,1,low\nSKU-002,坏数据,abc,1,1,1,1,low\nSKU-003,交期为零,1,1,0,1,1,low\nSKU-004,正常,10,1,3,5,2,high\n",
        HEADER
    );
    let report = env
        .import_api
        .import_csv(data.as_bytes(), "importer")
        .expect("导入失败");

    assert_eq!(report.total_rows, 4);
    assert_eq!(report.imported, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.failures.len(), 2);

    assert_eq!(report.failures[0].row_number, 3);
    assert_eq!(report.failures[0].product_id.as_deref(), Some("SKU-002"));
    assert!(report.failures[1].reason.contains("supplierLeadTime"));

    // 已存在的记录不被覆盖
    let existing = env.product_api.get_product("SKU-001").expect("查询失败");
    assert_eq!(existing.current_stock, 45);
}

#[test]
fn test_import_csv_缺少列() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let data = "productId,name\nSKU-001,轴承\n";
    let result = env.import_api.import_csv(data.as_bytes(), "importer");
    assert!(matches!(result, Err(ApiError::ImportError(_))));
    assert!(env.product_api.list_products().expect("查询失败").is_empty());
}

#[test]
fn test_import_csv_file_成功并记录审计() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let mut file = Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("无法创建临时文件");
    writeln!(file, "{}", HEADER).expect("写入失败");
    writeln!(file, "SKU-010,密封圈,100,2,7,10,4,low").expect("写入失败");
    file.flush().expect("写入失败");

    let report = env
        .import_api
        .import_csv_file(file.path(), "importer")
        .expect("导入失败");
    assert_eq!(report.imported, 1);

    let actions = env
        .product_api
        .list_recent_actions(None)
        .expect("查询失败");
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].action_type, ActionType::Import);
    assert_eq!(actions[0].actor, "importer");
    assert_eq!(
        actions[0]
            .payload_json
            .as_ref()
            .and_then(|p| p.get("imported"))
            .and_then(|v| v.as_u64()),
        Some(1)
    );
}

#[test]
fn test_import_csv_file_文件问题() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let missing = std::path::Path::new("/nonexistent/products.csv");
    assert!(matches!(
        env.import_api.import_csv_file(missing, "importer"),
        Err(ApiError::ImportError(_))
    ));

    let file = Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("无法创建临时文件");
    assert!(matches!(
        env.import_api.import_csv_file(file.path(), "importer"),
        Err(ApiError::ImportError(_))
    ));
}
