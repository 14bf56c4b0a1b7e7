// ==========================================
// 血库记录管理控制台 - 表单草稿合成
// ==========================================
// 职责:
// - AppointmentComposer: 预约表单 → 待写入预约草稿
// - PatientComposer: 患者表单 → 待登记患者草稿
// 说明: 不校验预约日期是否早于今天。日历禁选过去日期属于界面策略,
//       程序化调用方可能需要补录历史预约
// ==========================================

use crate::domain::types::{AppointmentStatus, AppointmentType, BloodType, PatientStatus};
use crate::domain::{NewAppointment, NewPatient};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::time_math::combine_date_and_time;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 空白字符串视为缺失
fn required_text(value: Option<&str>, field: &'static str) -> EngineResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(EngineError::MissingRequiredField(field)),
    }
}

fn required<T: Copy>(value: Option<T>, field: &'static str) -> EngineResult<T> {
    value.ok_or(EngineError::MissingRequiredField(field))
}

/// 可选文本: 空白 → None
fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ==========================================
// AppointmentComposer - 预约草稿合成
// ==========================================

/// 预约表单输入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentForm {
    pub donor_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>, // "HH:MM"
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
}

pub struct AppointmentComposer;

impl AppointmentComposer {
    /// 合成预约草稿
    ///
    /// 规则:
    /// 1) donor_id / date / time 缺失或空白 → MissingRequiredField
    /// 2) appointment_date = date + time（时刻格式错误 → InvalidTimeFormat）
    /// 3) status 固定为 scheduled
    pub fn compose(form: &AppointmentForm) -> EngineResult<NewAppointment> {
        let donor_id = required_text(form.donor_id.as_deref(), "donor_id")?;
        let date = required(form.date, "date")?;
        let time = required_text(form.time.as_deref(), "time")?;

        let appointment_date = combine_date_and_time(date, &time)?;

        Ok(NewAppointment {
            donor_id,
            appointment_date,
            appointment_type: form.appointment_type,
            status: AppointmentStatus::Scheduled,
            notes: optional_text(form.notes.as_deref()),
        })
    }
}

// ==========================================
// PatientComposer - 患者草稿合成
// ==========================================

/// 患者表单输入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientForm {
    pub full_name: Option<String>,
    pub patient_id: Option<String>,
    pub blood_type: Option<BloodType>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub medical_notes: Option<String>,
}

pub struct PatientComposer;

impl PatientComposer {
    /// 合成患者草稿
    ///
    /// 必填: full_name / patient_id / blood_type / phone / date_of_birth
    /// 新登记患者状态固定为 active
    pub fn compose(form: &PatientForm) -> EngineResult<NewPatient> {
        let full_name = required_text(form.full_name.as_deref(), "full_name")?;
        let patient_id = required_text(form.patient_id.as_deref(), "patient_id")?;
        let blood_type = required(form.blood_type, "blood_type")?;
        let phone = required_text(form.phone.as_deref(), "phone")?;
        let date_of_birth = required(form.date_of_birth, "date_of_birth")?;

        Ok(NewPatient {
            patient_id,
            full_name,
            blood_type,
            phone,
            email: optional_text(form.email.as_deref()),
            address: optional_text(form.address.as_deref()),
            date_of_birth,
            medical_notes: optional_text(form.medical_notes.as_deref()),
            status: PatientStatus::Active,
        })
    }
}
