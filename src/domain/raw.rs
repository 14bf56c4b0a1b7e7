// ==========================================
// 血库记录管理控制台 - 原始记录结构体
// ==========================================
// 用途: 记录存储返回的快照行
//       枚举、数量、日期列一律保留存储中的原始文本
// 生命周期: 仅在 存储读取 → engine::snapshot 校验 之间
// 红线: 原始取值只能由 engine::snapshot 解释,其他模块不得直接使用
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBloodUnit {
    pub id: String,
    pub blood_type: String,
    pub quantity_ml: String,
    pub collection_date: String,
    pub expiry_date: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDonor {
    pub id: String,
    pub full_name: String,
    pub blood_type: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: String,
    pub last_donation_date: Option<String>,
    pub eligibility: String,
    pub medical_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPatient {
    pub id: String,
    pub patient_id: String,
    pub full_name: String,
    pub blood_type: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: String,
    pub medical_notes: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBloodRequest {
    pub id: String,
    pub hospital_name: String,
    pub requester_name: String,
    pub blood_type: String,
    pub quantity_ml: String,
    pub urgency: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// 预约原始行（附带关联献血者的姓名/电话）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAppointment {
    pub id: String,
    pub donor_id: Option<String>,
    pub appointment_date: String,
    pub appointment_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub donor_full_name: Option<String>,
    pub donor_phone: Option<String>,
}
