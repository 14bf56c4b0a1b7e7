// ==========================================
// 血库记录管理控制台 - 应用层
// ==========================================
// 职责: 组装记录存储、配置与各 API,供命令行入口使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
