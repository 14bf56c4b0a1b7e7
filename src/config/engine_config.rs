// ==========================================
// 血库记录管理控制台 - 引擎阈值配置
// ==========================================
// 职责: 承载低库存阈值与效期分级阈值,供各引擎共享
// ==========================================

use serde::{Deserialize, Serialize};

/// 低库存阈值默认值（ml）
pub const DEFAULT_LOW_STOCK_THRESHOLD_ML: u64 = 2_000;
/// 效期紧急阈值默认值（天,含）
pub const DEFAULT_EXPIRY_CRITICAL_DAYS: i64 = 7;
/// 效期关注阈值默认值（天,含）
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub low_stock_threshold_ml: u64,
    pub expiry_critical_days: i64,
    pub expiry_warning_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold_ml: DEFAULT_LOW_STOCK_THRESHOLD_ML,
            expiry_critical_days: DEFAULT_EXPIRY_CRITICAL_DAYS,
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
        }
    }
}

impl EngineConfig {
    /// 校验阈值一致性
    ///
    /// 返回第一个不合法的配置键及原因
    pub fn validate(&self) -> Result<(), (&'static str, String)> {
        if self.low_stock_threshold_ml == 0 {
            return Err((
                "low_stock_threshold_ml",
                "低库存阈值必须大于 0".to_string(),
            ));
        }
        if self.expiry_critical_days > self.expiry_warning_days {
            return Err((
                "expiry_critical_days",
                format!(
                    "紧急阈值 {} 天不能大于关注阈值 {} 天",
                    self.expiry_critical_days, self.expiry_warning_days
                ),
            ));
        }
        Ok(())
    }
}
