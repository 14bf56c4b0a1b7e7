// ==========================================
// 血库记录管理控制台 - 导入层
// ==========================================
// 职责: 外部库存文件导入,生成血液单元记录
// 支持: CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod inventory_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::CsvParser;
pub use inventory_importer::{ImportSummary, InventoryImporter};
