// ==========================================
// 库存补货决策系统 - 配置管理器
// ==========================================
// 职责: 补货参数的加载、查询、覆写
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::config::reorder_config_trait::ReorderConfigReader;
use crate::engine::reorder::{DEFAULT_SAFETY_BUFFER_DAYS, DEFAULT_TARGET_COVERAGE_DAYS};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// 配置键
pub mod config_keys {
    pub const SAFETY_BUFFER_DAYS: &str = "safety_buffer_days";
    pub const TARGET_COVERAGE_DAYS: &str = "target_coverage_days";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 所有配置快照（按键排序）
    pub fn get_config_snapshot(&self) -> RepositoryResult<BTreeMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut snapshot = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            snapshot.insert(key, value);
        }
        Ok(snapshot)
    }

    /// 读取非负整数配置，缺省或无法解析时使用默认值
    fn get_u32_or_default(&self, key: &str, default: u32) -> RepositoryResult<u32> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    tracing::warn!(key, value = %raw, default, "配置值无法解析，使用默认值");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }
}

impl ReorderConfigReader for ConfigManager {
    fn get_safety_buffer_days(&self) -> RepositoryResult<u32> {
        self.get_u32_or_default(config_keys::SAFETY_BUFFER_DAYS, DEFAULT_SAFETY_BUFFER_DAYS)
    }

    fn get_target_coverage_days(&self) -> RepositoryResult<u32> {
        self.get_u32_or_default(config_keys::TARGET_COVERAGE_DAYS, DEFAULT_TARGET_COVERAGE_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;
    use crate::engine::reorder::ReorderParams;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_defaults_when_missing() {
        let m = manager();
        assert_eq!(m.get_reorder_params().unwrap(), ReorderParams::default());
    }

    #[test]
    fn test_set_and_override() {
        let m = manager();
        m.set_config_value(config_keys::SAFETY_BUFFER_DAYS, "7").unwrap();
        m.set_config_value(config_keys::SAFETY_BUFFER_DAYS, "9").unwrap();
        assert_eq!(m.get_safety_buffer_days().unwrap(), 9);

        let snapshot = m.get_config_snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[config_keys::SAFETY_BUFFER_DAYS], "9");
    }

    #[test]
    fn test_unparsable_value_falls_back() {
        let m = manager();
        m.set_config_value(config_keys::TARGET_COVERAGE_DAYS, "abc").unwrap();
        assert_eq!(m.get_target_coverage_days().unwrap(), DEFAULT_TARGET_COVERAGE_DAYS);
    }
}
