// ==========================================
// 血库记录管理控制台 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义引擎阈值的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// EngineConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait EngineConfigReader: Send + Sync {
    /// 低库存阈值（ml）,默认 2000
    fn get_low_stock_threshold_ml(&self) -> RepositoryResult<u64>;

    /// 效期紧急阈值（天）,默认 7
    fn get_expiry_critical_days(&self) -> RepositoryResult<i64>;

    /// 效期关注阈值（天）,默认 14
    fn get_expiry_warning_days(&self) -> RepositoryResult<i64>;

    /// 读取并校验完整的引擎配置
    fn load_engine_config(&self) -> RepositoryResult<EngineConfig> {
        let config = EngineConfig {
            low_stock_threshold_ml: self.get_low_stock_threshold_ml()?,
            expiry_critical_days: self.get_expiry_critical_days()?,
            expiry_warning_days: self.get_expiry_warning_days()?,
        };

        config
            .validate()
            .map_err(|(key, message)| RepositoryError::InvalidConfigValue {
                key: key.to_string(),
                message,
            })?;

        Ok(config)
    }
}
