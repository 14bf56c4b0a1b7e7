// ==========================================
// 血库记录管理控制台 - 配置管理 API
// ==========================================
// 职责: 引擎阈值配置查询与更新
// 红线: 写入前先校验合成后的完整配置,不合法的值不落库
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{config_keys, ConfigManager, EngineConfig, EngineConfigReader};
use crate::repository::RepositoryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{instrument, warn};

/// 配置视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigView {
    /// 生效配置（缺失键取默认值）;存储值无效时为 None
    pub effective: Option<EngineConfig>,
    /// 存储值无效的原因
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
    /// config_kv 中显式存储的值
    pub stored: BTreeMap<String, String>,
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> ApiResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ApiError::InvalidInput(format!("配置{}的值无法解析: {:?}", key, value)))
}

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    /// 创建新的ConfigApi实例
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 当前生效的引擎配置
    pub fn effective_config(&self) -> ApiResult<EngineConfig> {
        Ok(self.config_manager.load_engine_config()?)
    }

    /// 查询配置
    ///
    /// 存储值无效时仍返回原始存储值,便于定位并用 set 修复
    #[instrument(skip(self))]
    pub fn show(&self) -> ApiResult<ConfigView> {
        let stored = self.config_manager.get_config_snapshot()?;

        let (effective, invalid_reason) = match self.config_manager.load_engine_config() {
            Ok(config) => (Some(config), None),
            Err(e @ RepositoryError::InvalidConfigValue { .. }) => {
                warn!(error = %e, "存储的配置无效");
                (None, Some(e.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(ConfigView {
            effective,
            invalid_reason,
            stored,
        })
    }

    /// 更新单个配置项
    ///
    /// # 返回
    /// - Ok(EngineConfig): 更新后的生效配置
    /// - Err(ApiError::InvalidInput): 未知键、无法解析、或与其他阈值冲突
    #[instrument(skip(self))]
    pub fn set(&self, key: &str, value: &str) -> ApiResult<EngineConfig> {
        let mut candidate = match self.config_manager.load_engine_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "现有配置无效,以默认值为基础校验");
                EngineConfig::default()
            }
        };

        match key {
            config_keys::LOW_STOCK_THRESHOLD_ML => {
                candidate.low_stock_threshold_ml = parse_value(key, value)?;
            }
            config_keys::EXPIRY_CRITICAL_DAYS => {
                candidate.expiry_critical_days = parse_value(key, value)?;
            }
            config_keys::EXPIRY_WARNING_DAYS => {
                candidate.expiry_warning_days = parse_value(key, value)?;
            }
            _ => return Err(ApiError::InvalidInput(format!("未知配置键: {}", key))),
        }

        candidate
            .validate()
            .map_err(|(field, message)| ApiError::InvalidInput(format!("{}: {}", field, message)))?;

        self.config_manager
            .set_global_config_value(key, value.trim())?;
        Ok(candidate)
    }
}
