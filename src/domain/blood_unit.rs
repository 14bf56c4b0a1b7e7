// ==========================================
// 血库记录管理控制台 - 血液单元领域模型
// ==========================================
// 用途: 记录存储写入,引擎层只读
// 对齐: blood_inventory 表
// ==========================================

use crate::domain::types::BloodType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 参与库存汇总的状态标签
pub const AVAILABLE_STATUS: &str = "available";

// ==========================================
// BloodUnit - 血液单元
// ==========================================
// 红线: expiry_date 严格晚于 collection_date (由 engine::snapshot 校验)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodUnit {
    pub id: String,
    pub blood_type: BloodType,
    pub quantity_ml: u32,
    pub collection_date: NaiveDate, // 采集日期
    pub expiry_date: NaiveDate,     // 失效日期
    pub status: String,             // 自由标签,仅 "available" 参与汇总
}

impl BloodUnit {
    /// 是否为可用单元
    pub fn is_available(&self) -> bool {
        self.status == AVAILABLE_STATUS
    }
}

// ==========================================
// NewBloodUnit - 待入库血液单元草稿
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBloodUnit {
    pub blood_type: BloodType,
    pub quantity_ml: u32,
    pub collection_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: String,
}
