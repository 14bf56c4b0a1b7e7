// ==========================================
// 血库记录管理控制台 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 行号约定: 表头为第 1 行,数据行从第 2 行起
// ==========================================

use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("缺少必需列: {0}")]
    MissingColumn(String),

    // ===== 数据映射错误 =====
    #[error("必填字段为空 (行 {row}, 字段 {field})")]
    EmptyField { row: usize, field: String },

    // ===== 数据质量错误 =====
    #[error("记录校验失败 (行 {row}): {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: EngineError,
    },

    // ===== 数据库错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ImportError {
    /// 出错的数据行号（文件级错误返回 None）
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::EmptyField { row, .. } | ImportError::InvalidRecord { row, .. } => {
                Some(*row)
            }
            _ => None,
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
