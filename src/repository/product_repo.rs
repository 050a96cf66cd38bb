// ==========================================
// 库存补货决策系统 - 产品记录仓储
// ==========================================
// 职责: product 表的 CRUD
// 红线: Repository 不含业务规则，只做数据映射
// 红线: product_id 唯一，重复创建返回 DuplicateKey
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::product::{NewProduct, Product, ProductPatch};
use crate::domain::types::Criticality;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const ENTITY: &str = "Product";

const SELECT_COLUMNS: &str = r#"
    SELECT product_id, name, current_stock, average_daily_sales,
           supplier_lead_time, minimum_reorder_quantity, cost_per_unit,
           criticality, last_updated
    FROM product
"#;

// ==========================================
// ProductRepository Trait
// ==========================================
// 实现者: ProductRepositoryImpl（使用 rusqlite）
pub trait ProductRepository: Send + Sync {
    /// 新建产品
    ///
    /// # 返回
    /// - Ok(Product): 已写入的记录（last_updated 为写入时间）
    /// - Err(DuplicateKey): product_id 已存在
    fn create(&self, new_product: NewProduct) -> RepositoryResult<Product>;

    /// 查询全部产品（按 product_id 排序）
    fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// 按 product_id 查询
    fn find_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>>;

    /// 局部更新
    ///
    /// # 返回
    /// - Ok(Product): 更新后的记录
    /// - Err(NotFound): product_id 不存在
    fn update(&self, product_id: &str, patch: &ProductPatch) -> RepositoryResult<Product>;

    /// 删除产品
    ///
    /// # 返回
    /// - Err(NotFound): product_id 不存在
    fn delete(&self, product_id: &str) -> RepositoryResult<()>;

    /// 是否存在
    fn exists(&self, product_id: &str) -> RepositoryResult<bool>;
}

// ==========================================
// ProductRepositoryImpl
// ==========================================
pub struct ProductRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepositoryImpl {
    /// 创建新的仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从共享连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn not_found(product_id: &str) -> RepositoryError {
        RepositoryError::NotFound {
            entity: ENTITY.to_string(),
            id: product_id.to_string(),
        }
    }

    fn duplicate(product_id: &str) -> RepositoryError {
        RepositoryError::DuplicateKey {
            entity: ENTITY.to_string(),
            id: product_id.to_string(),
        }
    }

    fn select_one(conn: &Connection, product_id: &str) -> RepositoryResult<Option<Product>> {
        let sql = format!("{} WHERE product_id = ?1", SELECT_COLUMNS);
        let product = conn
            .query_row(&sql, params![product_id], map_row)
            .optional()?;
        Ok(product)
    }

    fn write_all_fields(conn: &Connection, product: &Product) -> RepositoryResult<usize> {
        let rows = conn.execute(
            r#"
            UPDATE product SET
                name = ?2,
                current_stock = ?3,
                average_daily_sales = ?4,
                supplier_lead_time = ?5,
                minimum_reorder_quantity = ?6,
                cost_per_unit = ?7,
                criticality = ?8,
                last_updated = ?9
            WHERE product_id = ?1
            "#,
            params![
                product.product_id,
                product.name,
                product.current_stock,
                product.average_daily_sales,
                product.supplier_lead_time,
                product.minimum_reorder_quantity,
                product.cost_per_unit,
                product.criticality.to_db_str(),
                product.last_updated,
            ],
        )?;
        Ok(rows)
    }
}

impl ProductRepository for ProductRepositoryImpl {
    fn create(&self, new_product: NewProduct) -> RepositoryResult<Product> {
        let product = new_product.into_product(Utc::now());
        let conn = self.get_conn()?;

        if Self::select_one(&conn, &product.product_id)?.is_some() {
            return Err(Self::duplicate(&product.product_id));
        }

        conn.execute(
            r#"
            INSERT INTO product (
                product_id, name, current_stock, average_daily_sales,
                supplier_lead_time, minimum_reorder_quantity, cost_per_unit,
                criticality, last_updated
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                product.product_id,
                product.name,
                product.current_stock,
                product.average_daily_sales,
                product.supplier_lead_time,
                product.minimum_reorder_quantity,
                product.cost_per_unit,
                product.criticality.to_db_str(),
                product.last_updated,
            ],
        )
        .map_err(|e| match RepositoryError::from(e) {
            // 其他连接并发写入同一主键
            RepositoryError::UniqueConstraintViolation(_) => Self::duplicate(&product.product_id),
            other => other,
        })?;

        Ok(product)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY product_id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map([], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(products)
    }

    fn find_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        Self::select_one(&conn, product_id)
    }

    fn update(&self, product_id: &str, patch: &ProductPatch) -> RepositoryResult<Product> {
        let conn = self.get_conn()?;

        let mut product =
            Self::select_one(&conn, product_id)?.ok_or_else(|| Self::not_found(product_id))?;
        patch.apply_to(&mut product);
        product.last_updated = Utc::now();

        if Self::write_all_fields(&conn, &product)? == 0 {
            return Err(Self::not_found(product_id));
        }
        Ok(product)
    }

    fn delete(&self, product_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM product WHERE product_id = ?1", params![product_id])?;
        if rows == 0 {
            return Err(Self::not_found(product_id));
        }
        Ok(())
    }

    fn exists(&self, product_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM product WHERE product_id = ?1 LIMIT 1",
                params![product_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

/// 行映射
fn map_row(row: &Row) -> SqliteResult<Product> {
    let criticality_raw: String = row.get(7)?;
    let criticality = criticality_raw
        .parse::<Criticality>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, e.into()))?;
    let last_updated: DateTime<Utc> = row.get(8)?;

    Ok(Product {
        product_id: row.get(0)?,
        name: row.get(1)?,
        current_stock: row.get(2)?,
        average_daily_sales: row.get(3)?,
        supplier_lead_time: row.get(4)?,
        minimum_reorder_quantity: row.get(5)?,
        cost_per_unit: row.get(6)?,
        criticality,
        last_updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    fn repo() -> ProductRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ProductRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn new_product(id: &str) -> NewProduct {
        NewProduct {
            product_id: id.to_string(),
            name: format!("产品 {}", id),
            current_stock: 45,
            average_daily_sales: 3.2,
            supplier_lead_time: 7,
            minimum_reorder_quantity: 50,
            cost_per_unit: 12.5,
            criticality: Criticality::Medium,
        }
    }

    #[test]
    fn test_create_and_find() {
        let repo = repo();
        let created = repo.create(new_product("SKU-1")).unwrap();

        let found = repo.find_by_id("SKU-1").unwrap().unwrap();
        assert_eq!(found.product_id, created.product_id);
        assert_eq!(found.average_daily_sales, 3.2);
        assert_eq!(found.criticality, Criticality::Medium);
        assert_eq!(found.last_updated, created.last_updated);
        assert!(repo.exists("SKU-1").unwrap());
        assert!(repo.find_by_id("SKU-X").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let repo = repo();
        repo.create(new_product("SKU-1")).unwrap();
        let err = repo.create(new_product("SKU-1")).unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateKey { .. }));
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let repo = repo();
        let created = repo.create(new_product("SKU-1")).unwrap();

        let patch = ProductPatch {
            current_stock: Some(8),
            ..Default::default()
        };
        let updated = repo.update("SKU-1", &patch).unwrap();
        assert_eq!(updated.current_stock, 8);
        assert!(updated.last_updated >= created.last_updated);

        let err = repo.update("SKU-X", &patch).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_delete() {
        let repo = repo();
        repo.create(new_product("SKU-1")).unwrap();
        repo.delete("SKU-1").unwrap();
        assert!(!repo.exists("SKU-1").unwrap());

        let err = repo.delete("SKU-1").unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_find_all_ordered_by_id() {
        let repo = repo();
        for id in ["C", "A", "B"] {
            repo.create(new_product(id)).unwrap();
        }
        let ids: Vec<String> = repo
            .find_all()
            .unwrap()
            .into_iter()
            .map(|p| p.product_id)
            .collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }
}
