// ==========================================
// 血库记录管理控制台 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行调用
// 架构: API 层 → 记录存储快照 → engine::snapshot → 引擎
// ==========================================

pub mod appointment_api;
pub mod config_api;
pub mod dashboard_api;
pub mod donor_api;
pub mod error;
pub mod inventory_api;
pub mod patient_api;
pub mod request_api;

// 重导出核心类型
pub use appointment_api::AppointmentApi;
pub use config_api::{ConfigApi, ConfigView};
pub use dashboard_api::{DashboardApi, DashboardView};
pub use donor_api::DonorApi;
pub use error::{ApiError, ApiResult};
pub use inventory_api::{ClassifiedUnit, InventoryApi, StockCard};
pub use patient_api::PatientApi;
pub use request_api::RequestApi;
