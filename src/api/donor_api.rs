// ==========================================
// 血库记录管理控制台 - 献血者 API
// ==========================================
// 职责: 献血者列表查询（检索 + 可预约过滤）
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::Donor;
use crate::engine::{search, snapshot, EligibilityGate};
use crate::repository::RecordStore;
use std::sync::Arc;
use tracing::instrument;

pub struct DonorApi {
    store: Arc<dyn RecordStore>,
}

impl DonorApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// 读取并校验献血者快照（按姓名升序）
    pub(crate) fn load_donors(store: &dyn RecordStore) -> ApiResult<Vec<Donor>> {
        let mut donors = snapshot::donors(store.list_donors()?)?;
        donors.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(donors)
    }

    /// 查询献血者
    ///
    /// # 参数
    /// - term: 检索词（姓名 / 血型 / 电话）,None 或空串返回全部
    /// - eligible_only: 只返回可预约献血者
    #[instrument(skip(self))]
    pub fn list(&self, term: Option<&str>, eligible_only: bool) -> ApiResult<Vec<Donor>> {
        let donors = Self::load_donors(self.store.as_ref())?;

        let matched: Vec<&Donor> = search::filter_donors(&donors, term.unwrap_or(""));
        let result = matched
            .into_iter()
            .filter(|d| !eligible_only || EligibilityGate::is_schedulable(d))
            .cloned()
            .collect();

        Ok(result)
    }
}
