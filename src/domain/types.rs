// ==========================================
// 血库记录管理控制台 - 领域类型定义
// ==========================================
// 红线: 枚举是封闭集合,未知取值属于数据完整性错误,不允许静默兜底
// 序列化格式: 与记录存储的原始取值保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 原始取值不在枚举范围内
///
/// 只描述"哪个枚举、什么值",记录上下文由 engine::snapshot 补充
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("未知的{kind}取值: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ==========================================
// 血型 (Blood Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

impl BloodType {
    /// 全部 8 种血型
    pub const ALL: [BloodType; 8] = [
        BloodType::APos,
        BloodType::ANeg,
        BloodType::BPos,
        BloodType::BNeg,
        BloodType::AbPos,
        BloodType::AbNeg,
        BloodType::OPos,
        BloodType::ONeg,
    ];

    /// 转换为存储层的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APos => "A+",
            BloodType::ANeg => "A-",
            BloodType::BPos => "B+",
            BloodType::BNeg => "B-",
            BloodType::AbPos => "AB+",
            BloodType::AbNeg => "AB-",
            BloodType::OPos => "O+",
            BloodType::ONeg => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(BloodType::APos),
            "A-" => Ok(BloodType::ANeg),
            "B+" => Ok(BloodType::BPos),
            "B-" => Ok(BloodType::BNeg),
            "AB+" => Ok(BloodType::AbPos),
            "AB-" => Ok(BloodType::AbNeg),
            "O+" => Ok(BloodType::OPos),
            "O-" => Ok(BloodType::ONeg),
            _ => Err(UnknownVariant::new("blood_type", s)),
        }
    }
}

// ==========================================
// 献血者资格 (Donor Eligibility)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonorEligibility {
    Eligible,              // 可献血
    TemporarilyIneligible, // 暂缓献血
    PermanentlyIneligible, // 永久屏蔽
}

impl DonorEligibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonorEligibility::Eligible => "eligible",
            DonorEligibility::TemporarilyIneligible => "temporarily_ineligible",
            DonorEligibility::PermanentlyIneligible => "permanently_ineligible",
        }
    }
}

impl fmt::Display for DonorEligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonorEligibility {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eligible" => Ok(DonorEligibility::Eligible),
            "temporarily_ineligible" => Ok(DonorEligibility::TemporarilyIneligible),
            "permanently_ineligible" => Ok(DonorEligibility::PermanentlyIneligible),
            _ => Err(UnknownVariant::new("eligibility", s)),
        }
    }
}

// ==========================================
// 患者状态 (Patient Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Active,
    Inactive,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PatientStatus::Active),
            "inactive" => Ok(PatientStatus::Inactive),
            _ => Err(UnknownVariant::new("patient_status", s)),
        }
    }
}

// ==========================================
// 用血申请紧急程度 (Request Urgency)
// ==========================================
// 顺序: Normal < High < Urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestUrgency {
    Normal,
    High,
    Urgent,
}

impl RequestUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestUrgency::Normal => "normal",
            RequestUrgency::High => "high",
            RequestUrgency::Urgent => "urgent",
        }
    }
}

impl fmt::Display for RequestUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestUrgency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(RequestUrgency::Normal),
            "high" => Ok(RequestUrgency::High),
            "urgent" => Ok(RequestUrgency::Urgent),
            _ => Err(UnknownVariant::new("urgency", s)),
        }
    }
}

// ==========================================
// 用血申请状态 (Request Status)
// ==========================================
// 流转: pending → approved → fulfilled
//       pending → rejected
// fulfilled / rejected 为终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Fulfilled,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// 是否终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Fulfilled | RequestStatus::Rejected)
    }

    /// 是否允许流转到 next
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
                | (RequestStatus::Approved, RequestStatus::Fulfilled)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(UnknownVariant::new("request_status", s)),
        }
    }
}

// ==========================================
// 预约类型 (Appointment Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Donation,  // 献血
    Screening, // 筛查
    FollowUp,  // 随访
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Donation => "donation",
            AppointmentType::Screening => "screening",
            AppointmentType::FollowUp => "follow-up",
        }
    }
}

impl Default for AppointmentType {
    fn default() -> Self {
        AppointmentType::Donation
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donation" => Ok(AppointmentType::Donation),
            "screening" => Ok(AppointmentType::Screening),
            "follow-up" => Ok(AppointmentType::FollowUp),
            _ => Err(UnknownVariant::new("appointment_type", s)),
        }
    }
}

// ==========================================
// 预约状态 (Appointment Status)
// ==========================================
// 流转: scheduled → completed | cancelled | no-show (均为终态)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no-show" => Ok(AppointmentStatus::NoShow),
            _ => Err(UnknownVariant::new("appointment_status", s)),
        }
    }
}

// ==========================================
// 应用角色 (App Role)
// ==========================================
// 仅用于引擎之外的访问控制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    Admin,
    Staff,
}

impl AppRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
            AppRole::Staff => "staff",
        }
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AppRole::Admin),
            "staff" => Ok(AppRole::Staff),
            _ => Err(UnknownVariant::new("app_role", s)),
        }
    }
}

// ==========================================
// 效期等级 (Expiry Tier)
// ==========================================
// 顺序按严重程度: Good < Warning < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryTier {
    Good,     // 效期充足
    Warning,  // 临期关注
    Critical, // 临期紧急(含已过期)
}

impl fmt::Display for ExpiryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryTier::Good => write!(f, "GOOD"),
            ExpiryTier::Warning => write!(f, "WARNING"),
            ExpiryTier::Critical => write!(f, "CRITICAL"),
        }
    }
}
