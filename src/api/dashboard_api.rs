// ==========================================
// 血库记录管理控制台 - 驾驶舱 API
// ==========================================
// 职责: 顶层指标（库存总升数、献血者数、待处理申请数、低库存血型数）
//       + 血型库存卡片
// 红线: 低库存计数与库存卡片共用同一份汇总和同一个监控器
// ==========================================

use crate::api::error::ApiResult;
use crate::api::inventory_api::{build_stock_cards, StockCard};
use crate::config::EngineConfig;
use crate::domain::types::RequestStatus;
use crate::engine::snapshot;
use crate::engine::{DashboardSummarizer, DashboardSummary, StockAggregator, StockThresholdMonitor};
use crate::repository::RecordStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// 驾驶舱视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub stock_cards: Vec<StockCard>,
}

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
pub struct DashboardApi {
    store: Arc<dyn RecordStore>,
    monitor: StockThresholdMonitor,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - store: 记录存储
    /// - config: 引擎阈值配置
    pub fn new(store: Arc<dyn RecordStore>, config: EngineConfig) -> Self {
        Self {
            store,
            monitor: StockThresholdMonitor::from_config(&config),
        }
    }

    /// 查询驾驶舱
    ///
    /// 献血者数与待处理申请数来自记录存储的全表计数
    #[instrument(skip(self))]
    pub fn get_dashboard(&self) -> ApiResult<DashboardView> {
        let units = snapshot::blood_units(self.store.list_blood_units()?)?;
        let donor_count = self.store.count_donors()?;
        let pending_count = self.store.count_blood_requests(RequestStatus::Pending)?;

        let totals = StockAggregator::aggregate(&units);
        let summary = DashboardSummarizer::new(self.monitor).summarize_totals(
            &totals,
            donor_count,
            pending_count,
        );
        debug!(?summary, "驾驶舱指标已汇总");

        Ok(DashboardView {
            summary,
            stock_cards: build_stock_cards(&totals, &self.monitor),
        })
    }
}
