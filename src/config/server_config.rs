// ==========================================
// 库存补货决策系统 - 服务启动配置
// ==========================================
// 来源: 环境变量（进程启动时读取一次）
// ==========================================

use std::env;
use std::net::SocketAddr;

pub const ENV_BIND_ADDRESS: &str = "INVENTORY_BIND_ADDRESS";
pub const ENV_DB_PATH: &str = "INVENTORY_DB_PATH";
pub const ENV_LOCALE: &str = "INVENTORY_LOCALE";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// 监听地址（如 "127.0.0.1:8080"）
    pub bind_address: SocketAddr,

    /// 数据库文件路径（None 时使用默认数据目录）
    pub db_path: Option<String>,

    /// 错误消息语言
    pub locale: String,
}

impl ServerConfig {
    /// 从环境变量加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源加载
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(ENV_BIND_ADDRESS)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into());
        let bind_address = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: ENV_BIND_ADDRESS,
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let db_path = lookup(ENV_DB_PATH)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let locale = match lookup(ENV_LOCALE).filter(|v| !v.trim().is_empty()) {
            Some(raw) => crate::i18n::normalize_locale(&raw)
                .ok_or_else(|| ConfigError::Invalid {
                    key: ENV_LOCALE,
                    value: raw.clone(),
                    reason: format!("支持: {}", crate::i18n::SUPPORTED_LOCALES.join(", ")),
                })?
                .to_string(),
            None => crate::i18n::DEFAULT_LOCALE.to_string(),
        };

        Ok(Self {
            bind_address,
            db_path,
            locale,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("环境变量 {key} 取值无效 ({value}): {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert_eq!(cfg.db_path, None);
        assert_eq!(cfg.locale, "zh-CN");
    }

    #[test]
    fn test_overrides() {
        let cfg = load(&[
            (ENV_BIND_ADDRESS, "0.0.0.0:9000"),
            (ENV_DB_PATH, " /tmp/inventory.db "),
            (ENV_LOCALE, "en-US"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_address.port(), 9000);
        assert_eq!(cfg.db_path.as_deref(), Some("/tmp/inventory.db"));
        assert_eq!(cfg.locale, "en");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[(ENV_BIND_ADDRESS, "not-an-address")]),
            Err(ConfigError::Invalid { key: ENV_BIND_ADDRESS, .. })
        ));
        assert!(matches!(
            load(&[(ENV_LOCALE, "fr")]),
            Err(ConfigError::Invalid { key: ENV_LOCALE, .. })
        ));
    }
}
