// ==========================================
// ProductApi 集成测试
// ==========================================
// 测试范围:
// 1. 产品查询: list_products, get_product
// 2. 产品维护: create_product, update_product, delete_product
// 3. 审计日志: list_product_actions, list_recent_actions
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use inventory_reorder::api::ApiError;
use inventory_reorder::domain::{ActionType, Criticality, ProductPatch};

// ==========================================
// 产品查询测试
// ==========================================

#[test]
fn test_list_products_初始为空() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let products = env.product_api.list_products().expect("查询失败");
    assert!(products.is_empty());
}

#[test]
fn test_get_product_不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let result = env.product_api.get_product("GHOST");
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_get_product_空白ID() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let result = env.product_api.get_product("   ");
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

// ==========================================
// 产品维护测试
// ==========================================

#[test]
fn test_create_product_成功() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let product = env
        .product_api
        .create_product(healthy_product("SKU-001"), "tester")
        .expect("创建失败");
    assert_eq!(product.product_id, "SKU-001");

    let fetched = env.product_api.get_product("SKU-001").expect("查询失败");
    assert_eq!(fetched, product);
}

#[test]
fn test_create_product_重复() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.product_api
        .create_product(healthy_product("SKU-001"), "tester")
        .expect("创建失败");
    let result = env
        .product_api
        .create_product(healthy_product("SKU-001"), "tester");
    assert!(matches!(result, Err(ApiError::DuplicateKey(_))));
}

#[test]
fn test_create_product_校验失败() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let invalid = new_product("SKU-BAD", 10, -1.0, 0, 1, 2.0, Criticality::Low);
    let err = env
        .product_api
        .create_product(invalid, "tester")
        .expect_err("非法数据应被拒绝");

    match err {
        ApiError::ValidationError { violations, .. } => {
            let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
            assert!(fields.contains(&"averageDailySales"));
            assert!(fields.contains(&"supplierLeadTime"));
        }
        other => panic!("错误类型不符: {:?}", other),
    }

    // 校验失败不落库
    assert!(env.product_api.list_products().expect("查询失败").is_empty());
}

#[test]
fn test_update_product_部分字段() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed(vec![healthy_product("SKU-001")]);

    let patch = ProductPatch {
        current_stock: Some(3),
        criticality: Some(Criticality::Low),
        ..Default::default()
    };
    let updated = env
        .product_api
        .update_product("SKU-001", patch, "tester")
        .expect("更新失败");

    assert_eq!(updated.current_stock, 3);
    assert_eq!(updated.criticality, Criticality::Low);
    assert_eq!(updated.average_daily_sales, 3.2);
}

#[test]
fn test_update_product_空更新() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed(vec![healthy_product("SKU-001")]);

    let result = env
        .product_api
        .update_product("SKU-001", ProductPatch::default(), "tester");
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_update_product_不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let patch = ProductPatch {
        current_stock: Some(3),
        ..Default::default()
    };
    let result = env.product_api.update_product("GHOST", patch, "tester");
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_delete_product_成功与重复删除() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed(vec![healthy_product("SKU-001")]);

    env.product_api
        .delete_product("SKU-001", "tester")
        .expect("删除失败");
    assert!(matches!(
        env.product_api.get_product("SKU-001"),
        Err(ApiError::NotFound(_))
    ));
    assert!(matches!(
        env.product_api.delete_product("SKU-001", "tester"),
        Err(ApiError::NotFound(_))
    ));
}

// ==========================================
// 审计日志测试
// ==========================================

#[test]
fn test_actions_记录完整生命周期() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.product_api
        .create_product(healthy_product("SKU-001"), "alice")
        .expect("创建失败");
    env.product_api
        .update_product(
            "SKU-001",
            ProductPatch {
                current_stock: Some(1),
                ..Default::default()
            },
            "bob",
        )
        .expect("更新失败");
    env.product_api
        .delete_product("SKU-001", "alice")
        .expect("删除失败");

    let actions = env
        .product_api
        .list_product_actions("SKU-001", None)
        .expect("查询失败");
    let types: Vec<ActionType> = actions.iter().map(|a| a.action_type).collect();
    assert_eq!(
        types,
        vec![ActionType::Delete, ActionType::Update, ActionType::Create]
    );
    assert_eq!(actions[1].actor, "bob");
    assert_eq!(
        actions[1]
            .payload_json
            .as_ref()
            .and_then(|p| p.get("currentStock"))
            .and_then(|v| v.as_u64()),
        Some(1)
    );
}

#[test]
fn test_list_recent_actions_数量限制() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    for i in 0..3 {
        env.product_api
            .create_product(healthy_product(&format!("SKU-{:03}", i)), "tester")
            .expect("创建失败");
    }

    let limited = env
        .product_api
        .list_recent_actions(Some(2))
        .expect("查询失败");
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].product_id.as_deref(), Some("SKU-002"));

    assert!(matches!(
        env.product_api.list_recent_actions(Some(0)),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_审计写入失败不影响产品写入() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    // 另开连接删除审计表，模拟审计存储不可用
    let conn = rusqlite::Connection::open(&env.db_path).expect("无法打开数据库");
    conn.execute_batch("DROP TABLE action_log").expect("删除审计表失败");

    let created = env
        .product_api
        .create_product(healthy_product("SKU-001"), "tester")
        .expect("审计失败时创建仍应成功");
    assert_eq!(created.product_id, "SKU-001");

    env.product_api
        .update_product(
            "SKU-001",
            ProductPatch {
                current_stock: Some(2),
                ..Default::default()
            },
            "tester",
        )
        .expect("审计失败时更新仍应成功");
    assert_eq!(
        env.product_api.get_product("SKU-001").expect("查询失败").current_stock,
        2
    );

    // 重试创建得到的是真实的主键冲突
    assert!(matches!(
        env.product_api
            .create_product(healthy_product("SKU-001"), "tester"),
        Err(ApiError::DuplicateKey(_))
    ));

    env.product_api
        .delete_product("SKU-001", "tester")
        .expect("审计失败时删除仍应成功");
    assert!(env.product_api.list_products().expect("查询失败").is_empty());
}
