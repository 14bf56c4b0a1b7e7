// ==========================================
// 血库记录管理控制台 - 预约 API
// ==========================================
// 职责: 预约创建、预约列表、可预约献血者候选
// 红线: 创建预约前必须对选定献血者重新做资格校验,
//       候选列表只是界面辅助,不是准入依据
// ==========================================

use crate::api::donor_api::DonorApi;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::AppointmentStatus;
use crate::domain::{AppointmentView, Donor};
use crate::engine::{search, snapshot, AppointmentComposer, AppointmentForm, EligibilityGate};
use crate::repository::RecordStore;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct AppointmentApi {
    store: Arc<dyn RecordStore>,
}

impl AppointmentApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// 可预约献血者（按姓名升序）
    #[instrument(skip(self))]
    pub fn schedulable_donors(&self) -> ApiResult<Vec<Donor>> {
        let donors = DonorApi::load_donors(self.store.as_ref())?;
        Ok(EligibilityGate::schedulable(&donors)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 创建预约
    ///
    /// 流程:
    /// 1) 表单合成预约草稿
    /// 2) 重新读取选定献血者并校验资格
    /// 3) 写入记录存储
    #[instrument(skip(self, form), fields(donor_id = ?form.donor_id))]
    pub fn schedule(&self, form: &AppointmentForm) -> ApiResult<AppointmentView> {
        let draft = AppointmentComposer::compose(form)?;

        let raw_donor = self
            .store
            .find_donor(&draft.donor_id)?
            .ok_or_else(|| ApiError::NotFound(format!("donors(id={})不存在", draft.donor_id)))?;
        let donor = snapshot::donor(raw_donor)?;
        EligibilityGate::ensure_schedulable(&donor)?;

        let saved = self.store.insert_appointment(&draft)?;
        let view = snapshot::appointment(saved)?;

        info!(
            appointment_id = %view.appointment.id,
            donor_id = %donor.id,
            appointment_date = %view.appointment.appointment_date,
            "预约已创建"
        );
        Ok(view)
    }

    /// 查询预约（按预约时间降序）
    ///
    /// # 参数
    /// - term: 献血者姓名 / 电话检索词
    /// - status: 状态过滤
    #[instrument(skip(self))]
    pub fn list(
        &self,
        term: Option<&str>,
        status: Option<AppointmentStatus>,
    ) -> ApiResult<Vec<AppointmentView>> {
        let mut views = snapshot::appointments(self.store.list_appointments()?)?;
        views.sort_by(|a, b| {
            b.appointment
                .appointment_date
                .cmp(&a.appointment.appointment_date)
        });

        Ok(search::filter_appointments(&views, term.unwrap_or(""), status)
            .into_iter()
            .cloned()
            .collect())
    }
}
