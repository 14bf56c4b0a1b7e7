// ==========================================
// 血库记录管理控制台 - 引擎层
// ==========================================
// 职责: 库存与资格计算规则
// 红线: 引擎是纯函数,只接收快照数据,不引用记录存储,不跨调用保存状态
// ==========================================

pub mod composer;
pub mod dashboard;
pub mod eligibility;
pub mod error;
pub mod expiry;
pub mod lifecycle;
pub mod search;
pub mod snapshot;
pub mod stock;
pub mod time_math;

// 重导出核心引擎
pub use composer::{AppointmentComposer, AppointmentForm, PatientComposer, PatientForm};
pub use dashboard::{DashboardSummarizer, DashboardSummary};
pub use eligibility::EligibilityGate;
pub use error::{EngineError, EngineResult};
pub use expiry::{ExpiryClassification, ExpiryClassifier};
pub use stock::{StockAggregator, StockThresholdMonitor, StockTotals};
