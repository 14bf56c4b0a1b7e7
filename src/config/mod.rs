// ==========================================
// 血库记录管理控制台 - 配置层
// ==========================================
// 职责: 引擎阈值配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod config_reader_trait;
pub mod engine_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use config_reader_trait::EngineConfigReader;
pub use engine_config::EngineConfig;
