// ==========================================
// 血库记录管理控制台 - 患者领域模型
// ==========================================
// 对齐: patients 表
// ==========================================

use crate::domain::types::{BloodType, PatientStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub patient_id: String, // 对外患者编号
    pub full_name: String,
    pub blood_type: BloodType,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: NaiveDate,
    pub medical_notes: Option<String>,
    pub status: PatientStatus,
}

/// 待登记患者草稿（由 PatientComposer 生成）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub patient_id: String,
    pub full_name: String,
    pub blood_type: BloodType,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: NaiveDate,
    pub medical_notes: Option<String>,
    pub status: PatientStatus,
}
