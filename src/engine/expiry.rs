// ==========================================
// 血库记录管理控制台 - 效期分级引擎
// ==========================================
// 红线: 效期是"等级制",不是评分制
// 红线: 已过期单元仍判定为 Critical,不隐藏、不剔除（过滤是调用方策略）
// ==========================================
// 职责: 按失效日期临近程度判定效期等级
// 输入: BloodUnit + 参考时刻
// 输出: ExpiryClassification (tier, days_left)
// ==========================================

use crate::config::EngineConfig;
use crate::domain::types::ExpiryTier;
use crate::domain::BloodUnit;
use crate::engine::time_math::{date_start, days_until};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 单个血液单元的效期判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryClassification {
    pub tier: ExpiryTier,
    pub days_left: i64,
}

// ==========================================
// ExpiryClassifier - 效期分级引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ExpiryClassifier {
    critical_days: i64,
    warning_days: i64,
}

impl Default for ExpiryClassifier {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ExpiryClassifier {
    /// 使用默认阈值（7 / 14 天）创建
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置阈值创建
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            critical_days: config.expiry_critical_days,
            warning_days: config.expiry_warning_days,
        }
    }

    /// 按剩余天数判定等级
    ///
    /// 规则（顺序执行，命中即返回，阈值均含端点）:
    /// 1) days_left ≤ critical_days → Critical（含已过期的负数）
    /// 2) days_left ≤ warning_days → Warning
    /// 3) 其他 → Good
    pub fn tier_for_days(&self, days_left: i64) -> ExpiryTier {
        if days_left <= self.critical_days {
            ExpiryTier::Critical
        } else if days_left <= self.warning_days {
            ExpiryTier::Warning
        } else {
            ExpiryTier::Good
        }
    }

    /// 判定单个血液单元
    ///
    /// days_left 以失效日期当天零点为目标时刻
    pub fn classify(&self, unit: &BloodUnit, reference: NaiveDateTime) -> ExpiryClassification {
        let days_left = days_until(date_start(unit.expiry_date), reference);
        ExpiryClassification {
            tier: self.tier_for_days(days_left),
            days_left,
        }
    }

    /// 批量判定,保持输入顺序
    #[instrument(skip(self, units), fields(count = units.len()))]
    pub fn classify_batch<'a>(
        &self,
        units: &'a [BloodUnit],
        reference: NaiveDateTime,
    ) -> Vec<(&'a BloodUnit, ExpiryClassification)> {
        units
            .iter()
            .map(|unit| (unit, self.classify(unit, reference)))
            .collect()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BloodType;
    use chrono::{Duration, NaiveDate};

    /// 基准时刻: 2025-06-01 00:00
    fn reference() -> NaiveDateTime {
        date_start(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn unit_expiring_in(days: i64) -> BloodUnit {
        let expiry = reference().date() + Duration::days(days);
        BloodUnit {
            id: format!("U{}", days),
            blood_type: BloodType::OPos,
            quantity_ml: 450,
            collection_date: expiry - Duration::days(42),
            expiry_date: expiry,
            status: "available".to_string(),
        }
    }

    #[test]
    fn test_boundary_days() {
        let classifier = ExpiryClassifier::new();
        let cases = [
            (7, ExpiryTier::Critical),
            (8, ExpiryTier::Warning),
            (14, ExpiryTier::Warning),
            (15, ExpiryTier::Good),
        ];

        for (days, expected) in cases {
            let result = classifier.classify(&unit_expiring_in(days), reference());
            assert_eq!(result.days_left, days);
            assert_eq!(result.tier, expected, "days_left={}", days);
        }
    }

    #[test]
    fn test_expired_unit_is_critical() {
        let classifier = ExpiryClassifier::new();
        let result = classifier.classify(&unit_expiring_in(-3), reference());
        assert_eq!(result.days_left, -3);
        assert_eq!(result.tier, ExpiryTier::Critical);
    }

    #[test]
    fn test_reference_inside_day_truncates() {
        // 参考时刻为当天 18:00, 距 8 天后零点不足 8 整天 → 7 → Critical
        let classifier = ExpiryClassifier::new();
        let late_reference = reference() + Duration::hours(18);
        let result = classifier.classify(&unit_expiring_in(8), late_reference);
        assert_eq!(result.days_left, 7);
        assert_eq!(result.tier, ExpiryTier::Critical);
    }

    #[test]
    fn test_configured_thresholds() {
        let config = EngineConfig {
            expiry_critical_days: 3,
            expiry_warning_days: 5,
            ..EngineConfig::default()
        };
        let classifier = ExpiryClassifier::from_config(&config);
        assert_eq!(classifier.tier_for_days(3), ExpiryTier::Critical);
        assert_eq!(classifier.tier_for_days(5), ExpiryTier::Warning);
        assert_eq!(classifier.tier_for_days(6), ExpiryTier::Good);
    }

    #[test]
    fn test_monotone_in_days_left() {
        let classifier = ExpiryClassifier::new();
        for days in -30..60 {
            assert!(classifier.tier_for_days(days) >= classifier.tier_for_days(days + 1));
        }
    }

    #[test]
    fn test_batch_preserves_order_and_is_idempotent() {
        let classifier = ExpiryClassifier::new();
        let units = vec![unit_expiring_in(20), unit_expiring_in(1), unit_expiring_in(10)];

        let first = classifier.classify_batch(&units, reference());
        let second = classifier.classify_batch(&units, reference());

        let tiers: Vec<ExpiryTier> = first.iter().map(|(_, c)| c.tier).collect();
        assert_eq!(
            tiers,
            vec![ExpiryTier::Good, ExpiryTier::Critical, ExpiryTier::Warning]
        );
        assert_eq!(first, second);
    }
}
