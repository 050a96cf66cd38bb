// ==========================================
// 库存补货决策系统 - 操作日志数据仓储
// ==========================================
// 对齐: action_log 表
// 红线: 所有写入必须记录
// ==========================================

use crate::domain::action_log::{ActionLog, ActionType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT action_id, product_id, action_type, action_ts, actor,
           payload_json, detail
    FROM action_log
"#;

// ==========================================
// ActionLogRepository - 操作日志仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct ActionLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ActionLogRepository {
    /// 创建新的操作日志仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入操作日志
    ///
    /// # 返回
    /// - `Ok(action_id)`: 成功插入,返回action_id
    pub fn insert(&self, log: &ActionLog) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO action_log (
                action_id, product_id, action_type, action_ts, actor,
                payload_json, detail
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                log.action_id,
                log.product_id,
                log.action_type.to_db_str(),
                log.action_ts,
                log.actor,
                log.payload_json.as_ref().map(|v| v.to_string()),
                log.detail,
            ],
        )?;

        Ok(log.action_id.clone())
    }

    /// 插入操作日志，失败只记告警
    ///
    /// 业务写入已提交后调用；审计失败不影响请求结果。
    pub fn insert_or_warn(&self, log: &ActionLog) -> Option<String> {
        match self.insert(log) {
            Ok(action_id) => Some(action_id),
            Err(e) => {
                tracing::warn!(
                    action_type = log.action_type.to_db_str(),
                    product_id = ?log.product_id,
                    actor = %log.actor,
                    error = %e,
                    "操作日志写入失败"
                );
                None
            }
        }
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 查询指定产品的操作日志（最新在前）
    pub fn find_by_product_id(
        &self,
        product_id: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE product_id = ?1 ORDER BY action_ts DESC, rowid DESC LIMIT ?2",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![product_id, limit as i64], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(logs)
    }

    /// 查询最近的操作日志（最新在前）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} ORDER BY action_ts DESC, rowid DESC LIMIT ?1",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![limit as i64], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(logs)
    }
}

fn map_row(row: &Row) -> SqliteResult<ActionLog> {
    let action_type_raw: String = row.get(2)?;
    let action_type = ActionType::from_str(&action_type_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("未知操作类型: {}", action_type_raw).into(),
        )
    })?;
    let action_ts: DateTime<Utc> = row.get(3)?;
    let payload_raw: Option<String> = row.get(5)?;
    let payload_json = payload_raw
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(ActionLog {
        action_id: row.get(0)?,
        product_id: row.get(1)?,
        action_type,
        action_ts,
        actor: row.get(4)?,
        payload_json,
        detail: row.get(6)?,
    })
}
