// ==========================================
// 血库记录管理控制台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 血液库存与献血资格的记录管理（人工最终控制权）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 库存与资格规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎阈值
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AppointmentStatus, AppointmentType, BloodType, DonorEligibility, ExpiryTier, PatientStatus,
    RequestStatus, RequestUrgency,
};

// 领域实体
pub use domain::{Appointment, AppointmentView, BloodRequest, BloodUnit, Donor, Patient};

// 引擎
pub use engine::{
    AppointmentComposer, DashboardSummarizer, EligibilityGate, ExpiryClassifier,
    PatientComposer, StockAggregator, StockThresholdMonitor,
};

// API
pub use api::{ApiError, ApiResult, AppointmentApi, DashboardApi, InventoryApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "血库记录管理控制台";
