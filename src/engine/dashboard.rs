// ==========================================
// 血库记录管理控制台 - 驾驶舱指标汇总
// ==========================================
// 职责: 献血者总数 + 待处理申请数 + 库存汇总 → 顶层指标
// 说明: donor_count / pending_request_count 由记录存储做全表计数后传入,
//       这里原样透传,不基于快照重算
// ==========================================

use crate::domain::BloodUnit;
use crate::engine::stock::{StockAggregator, StockThresholdMonitor, StockTotals};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 每升毫升数
const ML_PER_LITER: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_liters_available: u64, // 向下取整的整升数
    pub total_donors: u64,
    pub pending_requests: u64,
    pub low_stock_type_count: usize,
}

// ==========================================
// DashboardSummarizer - 驾驶舱指标汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardSummarizer {
    monitor: StockThresholdMonitor,
}

impl DashboardSummarizer {
    pub fn new(monitor: StockThresholdMonitor) -> Self {
        Self { monitor }
    }

    /// 从血液单元快照汇总
    #[instrument(skip(self, units), fields(count = units.len()))]
    pub fn summarize(
        &self,
        units: &[BloodUnit],
        donor_count: u64,
        pending_request_count: u64,
    ) -> DashboardSummary {
        let totals = StockAggregator::aggregate(units);
        self.summarize_totals(&totals, donor_count, pending_request_count)
    }

    /// 从已汇总的库存计算（与库存卡片共用同一份汇总时使用）
    pub fn summarize_totals(
        &self,
        totals: &StockTotals,
        donor_count: u64,
        pending_request_count: u64,
    ) -> DashboardSummary {
        DashboardSummary {
            total_liters_available: StockAggregator::total_ml(totals) / ML_PER_LITER,
            total_donors: donor_count,
            pending_requests: pending_request_count,
            low_stock_type_count: self.monitor.low_stock_types(totals).len(),
        }
    }
}
