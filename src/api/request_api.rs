// ==========================================
// 血库记录管理控制台 - 用血申请 API
// ==========================================
// 职责: 用血申请列表、状态流转
// 流转: pending → approved → fulfilled / pending → rejected
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::RequestStatus;
use crate::domain::BloodRequest;
use crate::engine::lifecycle::check_request_transition;
use crate::engine::snapshot;
use crate::repository::RecordStore;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct RequestApi {
    store: Arc<dyn RecordStore>,
}

impl RequestApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// 查询用血申请（按创建时间降序）
    #[instrument(skip(self))]
    pub fn list(&self, status: Option<RequestStatus>) -> ApiResult<Vec<BloodRequest>> {
        let requests = snapshot::blood_requests(self.store.list_blood_requests()?)?;
        Ok(requests
            .into_iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .collect())
    }

    /// 更新申请状态
    ///
    /// 终态（fulfilled / rejected）不可再变更
    #[instrument(skip(self))]
    pub fn set_status(&self, id: &str, next: RequestStatus) -> ApiResult<BloodRequest> {
        let raw = self
            .store
            .find_blood_request(id)?
            .ok_or_else(|| ApiError::NotFound(format!("blood_requests(id={})不存在", id)))?;
        let mut request = snapshot::blood_request(raw)?;

        check_request_transition(request.status, next)?;
        self.store.update_blood_request_status(id, next)?;

        info!(id, from = %request.status, to = %next, "用血申请状态已更新");
        request.status = next;
        Ok(request)
    }
}
