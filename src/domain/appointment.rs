// ==========================================
// 血库记录管理控制台 - 预约领域模型
// ==========================================
// 对齐: appointments 表
// appointment_date 为本地挂钟时间 (日期 + 时分合成的单一时刻)
// ==========================================

use crate::domain::donor::DonorContact;
use crate::domain::types::{AppointmentStatus, AppointmentType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub donor_id: Option<String>,
    pub appointment_date: NaiveDateTime,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// 待写入的预约草稿（由 AppointmentComposer 生成）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub donor_id: String,
    pub appointment_date: NaiveDateTime,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// 预约 + 关联献血者（列表展示/检索用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub donor: Option<DonorContact>,
}
