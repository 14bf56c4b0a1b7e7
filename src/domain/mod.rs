// ==========================================
// 血库记录管理控制台 - 领域模型层
// ==========================================
// 职责: 定义领域实体与封闭枚举类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod appointment;
pub mod blood_unit;
pub mod donor;
pub mod patient;
pub mod raw;
pub mod request;
pub mod types;

// 重导出核心类型
pub use appointment::{Appointment, AppointmentView, NewAppointment};
pub use blood_unit::{BloodUnit, NewBloodUnit, AVAILABLE_STATUS};
pub use donor::{Donor, DonorContact};
pub use patient::{NewPatient, Patient};
pub use raw::{RawAppointment, RawBloodRequest, RawBloodUnit, RawDonor, RawPatient};
pub use request::BloodRequest;
pub use types::{
    AppRole, AppointmentStatus, AppointmentType, BloodType, DonorEligibility, ExpiryTier,
    PatientStatus, RequestStatus, RequestUrgency, UnknownVariant,
};
