// ==========================================
// 血库记录管理控制台 - 献血者领域模型
// ==========================================
// 对齐: donors 表
// ==========================================

use crate::domain::types::{BloodType, DonorEligibility};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    pub id: String,
    pub full_name: String,
    pub blood_type: BloodType,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: NaiveDate,
    pub last_donation_date: Option<NaiveDate>,
    pub eligibility: DonorEligibility,
    pub medical_notes: Option<String>,
}

/// 预约列表中关联展示的献血者联系方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorContact {
    pub full_name: String,
    pub phone: String,
}

impl From<&Donor> for DonorContact {
    fn from(donor: &Donor) -> Self {
        Self {
            full_name: donor.full_name.clone(),
            phone: donor.phone.clone(),
        }
    }
}
