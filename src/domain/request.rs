// ==========================================
// 血库记录管理控制台 - 用血申请领域模型
// ==========================================
// 对齐: blood_requests 表
// ==========================================

use crate::domain::types::{BloodType, RequestStatus, RequestUrgency};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: String,
    pub hospital_name: String,
    pub requester_name: String,
    pub blood_type: BloodType,
    pub quantity_ml: u32,
    pub urgency: RequestUrgency,
    pub status: RequestStatus,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
