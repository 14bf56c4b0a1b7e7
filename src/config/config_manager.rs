// ==========================================
// 血库记录管理控制台 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::config_reader_trait::EngineConfigReader;
use crate::config::engine_config::{
    DEFAULT_EXPIRY_CRITICAL_DAYS, DEFAULT_EXPIRY_WARNING_DAYS, DEFAULT_LOW_STOCK_THRESHOLD_ML,
};
use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::info!(config_key = key, config_value = value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照
    pub fn get_config_snapshot(&self) -> RepositoryResult<BTreeMap<String, String>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(config_map)
    }

    /// 读取数值配置,缺失时使用默认值
    ///
    /// 红线: 存在但无法解析的值直接报错,不回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> RepositoryResult<T>
    where
        T: FromStr,
    {
        match self.get_global_config_value(key)? {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map_err(|_| RepositoryError::InvalidConfigValue {
                    key: key.to_string(),
                    message: format!("无法解析配置值: {:?}", raw),
                }),
        }
    }
}

// ==========================================
// EngineConfigReader Trait 实现
// ==========================================
impl EngineConfigReader for ConfigManager {
    fn get_low_stock_threshold_ml(&self) -> RepositoryResult<u64> {
        self.get_parsed_or_default(
            config_keys::LOW_STOCK_THRESHOLD_ML,
            DEFAULT_LOW_STOCK_THRESHOLD_ML,
        )
    }

    fn get_expiry_critical_days(&self) -> RepositoryResult<i64> {
        self.get_parsed_or_default(
            config_keys::EXPIRY_CRITICAL_DAYS,
            DEFAULT_EXPIRY_CRITICAL_DAYS,
        )
    }

    fn get_expiry_warning_days(&self) -> RepositoryResult<i64> {
        self.get_parsed_or_default(config_keys::EXPIRY_WARNING_DAYS, DEFAULT_EXPIRY_WARNING_DAYS)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 库存
    pub const LOW_STOCK_THRESHOLD_ML: &str = "low_stock_threshold_ml";

    // 效期分级
    pub const EXPIRY_CRITICAL_DAYS: &str = "expiry_critical_days";
    pub const EXPIRY_WARNING_DAYS: &str = "expiry_warning_days";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::db::init_schema;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_missing() {
        let config = manager().load_engine_config().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_override_and_snapshot() {
        let mgr = manager();
        mgr.set_global_config_value(config_keys::LOW_STOCK_THRESHOLD_ML, "3500")
            .unwrap();
        mgr.set_global_config_value(config_keys::LOW_STOCK_THRESHOLD_ML, "4000")
            .unwrap();

        assert_eq!(mgr.get_low_stock_threshold_ml().unwrap(), 4000);

        let snapshot = mgr.get_config_snapshot().unwrap();
        assert_eq!(
            snapshot.get(config_keys::LOW_STOCK_THRESHOLD_ML).map(String::as_str),
            Some("4000")
        );
    }

    #[test]
    fn test_unparsable_value_is_rejected() {
        let mgr = manager();
        mgr.set_global_config_value(config_keys::EXPIRY_CRITICAL_DAYS, "seven")
            .unwrap();

        let err = mgr.load_engine_config().unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::InvalidConfigValue { ref key, .. }
                if key == config_keys::EXPIRY_CRITICAL_DAYS
        ));
    }

    #[test]
    fn test_inconsistent_thresholds_are_rejected() {
        let mgr = manager();
        mgr.set_global_config_value(config_keys::EXPIRY_CRITICAL_DAYS, "21")
            .unwrap();

        assert!(matches!(
            mgr.load_engine_config(),
            Err(RepositoryError::InvalidConfigValue { .. })
        ));
    }
}
