// ==========================================
// 血库记录管理控制台 - 患者 API
// ==========================================
// 职责: 患者登记与列表查询
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::Patient;
use crate::engine::{search, snapshot, PatientComposer, PatientForm};
use crate::repository::RecordStore;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct PatientApi {
    store: Arc<dyn RecordStore>,
}

impl PatientApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// 登记患者
    ///
    /// 患者编号重复时返回业务规则错误（唯一约束）
    #[instrument(skip(self, form), fields(patient_id = ?form.patient_id))]
    pub fn register(&self, form: &PatientForm) -> ApiResult<Patient> {
        let draft = PatientComposer::compose(form)?;
        let saved = snapshot::patient(self.store.insert_patient(&draft)?)?;
        info!(id = %saved.id, patient_id = %saved.patient_id, "患者已登记");
        Ok(saved)
    }

    /// 查询患者（按姓名升序）
    #[instrument(skip(self))]
    pub fn list(&self, term: Option<&str>) -> ApiResult<Vec<Patient>> {
        let mut patients = snapshot::patients(self.store.list_patients()?)?;
        patients.sort_by(|a, b| a.full_name.cmp(&b.full_name));

        Ok(search::filter_patients(&patients, term.unwrap_or(""))
            .into_iter()
            .cloned()
            .collect())
    }
}
