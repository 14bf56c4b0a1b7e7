// ==========================================
// 血库记录管理控制台 - 库存 API
// ==========================================
// 职责: 血液单元列表（附效期等级）、血型库存卡片、CSV 导入
// 架构: API 层 → 记录存储快照 → engine::snapshot 校验 → 引擎计算
// ==========================================

use crate::api::error::ApiResult;
use crate::config::EngineConfig;
use crate::domain::types::{BloodType, ExpiryTier};
use crate::domain::BloodUnit;
use crate::engine::snapshot;
use crate::engine::{ExpiryClassifier, StockAggregator, StockThresholdMonitor, StockTotals};
use crate::importer::{ImportSummary, InventoryImporter};
use crate::repository::RecordStore;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// 血液单元 + 效期判定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedUnit {
    #[serde(flatten)]
    pub unit: BloodUnit,
    pub tier: ExpiryTier,
    pub days_left: i64,
}

/// 单个血型的库存卡片
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCard {
    pub blood_type: BloodType,
    pub quantity_ml: u64,
    pub is_low: bool,
}

/// 汇总结果 → 库存卡片（按血型标签字典序）
///
/// is_low 与驾驶舱低库存计数使用同一个监控器
pub fn build_stock_cards(totals: &StockTotals, monitor: &StockThresholdMonitor) -> Vec<StockCard> {
    let mut cards: Vec<StockCard> = totals
        .iter()
        .map(|(blood_type, quantity_ml)| StockCard {
            blood_type: *blood_type,
            quantity_ml: *quantity_ml,
            is_low: monitor.is_low(*quantity_ml),
        })
        .collect();
    cards.sort_by(|a, b| a.blood_type.as_str().cmp(b.blood_type.as_str()));
    cards
}

// ==========================================
// InventoryApi - 库存 API
// ==========================================
pub struct InventoryApi {
    store: Arc<dyn RecordStore>,
    classifier: ExpiryClassifier,
    monitor: StockThresholdMonitor,
}

impl InventoryApi {
    /// 创建新的InventoryApi实例
    pub fn new(store: Arc<dyn RecordStore>, config: EngineConfig) -> Self {
        Self {
            store,
            classifier: ExpiryClassifier::from_config(&config),
            monitor: StockThresholdMonitor::from_config(&config),
        }
    }

    /// 读取并校验血液单元快照
    fn load_units(&self) -> ApiResult<Vec<BloodUnit>> {
        let raws = self.store.list_blood_units()?;
        Ok(snapshot::blood_units(raws)?)
    }

    /// 全部血液单元及效期等级（按失效日期升序）
    ///
    /// # 参数
    /// - reference: 效期计算的参考时刻
    #[instrument(skip(self))]
    pub fn list_units(&self, reference: NaiveDateTime) -> ApiResult<Vec<ClassifiedUnit>> {
        let mut units = self.load_units()?;
        units.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date));

        let classified = self
            .classifier
            .classify_batch(&units, reference)
            .into_iter()
            .map(|(unit, result)| ClassifiedUnit {
                unit: unit.clone(),
                tier: result.tier,
                days_left: result.days_left,
            })
            .collect();

        Ok(classified)
    }

    /// 各血型可用总量
    #[instrument(skip(self))]
    pub fn stock_levels(&self) -> ApiResult<StockTotals> {
        let units = self.load_units()?;
        Ok(StockAggregator::aggregate(&units))
    }

    /// 血型库存卡片（附低库存标记）
    #[instrument(skip(self))]
    pub fn stock_cards(&self) -> ApiResult<Vec<StockCard>> {
        let totals = self.stock_levels()?;
        Ok(build_stock_cards(&totals, &self.monitor))
    }

    /// 从 CSV 文件导入血液单元
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn import_csv(&self, path: &Path) -> ApiResult<ImportSummary> {
        let importer = InventoryImporter::new(Arc::clone(&self.store));
        Ok(importer.import_file(path)?)
    }
}
