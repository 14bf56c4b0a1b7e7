// ==========================================
// 血库记录管理控制台 - 库存汇总与低库存监控
// ==========================================
// 职责:
// - StockAggregator: 可用单元按血型汇总毫升数
// - StockThresholdMonitor: 低库存判定
// 红线: 驾驶舱的低库存计数与库存页的低库存标记必须一致,
//       两者共用同一个 is_low 比较
// ==========================================

use crate::config::EngineConfig;
use crate::domain::types::BloodType;
use crate::domain::BloodUnit;
use std::collections::{BTreeMap, BTreeSet};
use tracing::instrument;

/// 血型 → 可用总量（ml）
///
/// 没有可用单元的血型不出现在结果中
pub type StockTotals = BTreeMap<BloodType, u64>;

// ==========================================
// StockAggregator - 库存汇总
// ==========================================
pub struct StockAggregator;

impl StockAggregator {
    /// 按血型汇总可用单元
    ///
    /// 只统计 status == "available" 的单元,单次折叠完成
    #[instrument(skip(units), fields(count = units.len()))]
    pub fn aggregate(units: &[BloodUnit]) -> StockTotals {
        units
            .iter()
            .filter(|unit| unit.is_available())
            .fold(StockTotals::new(), |mut totals, unit| {
                *totals.entry(unit.blood_type).or_insert(0) += u64::from(unit.quantity_ml);
                totals
            })
    }

    /// 汇总总量（ml）
    pub fn total_ml(totals: &StockTotals) -> u64 {
        totals.values().sum()
    }
}

// ==========================================
// StockThresholdMonitor - 低库存监控
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct StockThresholdMonitor {
    threshold_ml: u64,
}

impl Default for StockThresholdMonitor {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl StockThresholdMonitor {
    /// 使用默认阈值（2000 ml）创建
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold_ml: u64) -> Self {
        Self { threshold_ml }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_threshold(config.low_stock_threshold_ml)
    }

    pub fn threshold_ml(&self) -> u64 {
        self.threshold_ml
    }

    /// 单值判定: 严格小于阈值即为低库存
    pub fn is_low(&self, quantity_ml: u64) -> bool {
        quantity_ml < self.threshold_ml
    }

    /// 汇总结果中的低库存血型集合
    pub fn low_stock_types(&self, totals: &StockTotals) -> BTreeSet<BloodType> {
        totals
            .iter()
            .filter(|(_, quantity)| self.is_low(**quantity))
            .map(|(blood_type, _)| *blood_type)
            .collect()
    }
}
