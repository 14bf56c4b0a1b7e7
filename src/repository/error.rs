// ==========================================
// 血库记录管理控制台 - 记录存储错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 存储只报告访问层面的失败;
//       记录内容是否合法由 engine::snapshot 判定
// ==========================================

use thiserror::Error;

/// 记录存储错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    /// 如重复的患者编号
    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    /// 如为不存在的献血者写入预约
    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    /// config_kv 中的阈值无法解析或相互冲突
    #[error("配置值无效 (key={key}): {message}")]
    InvalidConfigValue { key: String, message: String },
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("UNIQUE") => {
                RepositoryError::UniqueConstraintViolation(msg)
            }
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("FOREIGN KEY") => {
                RepositoryError::ForeignKeyViolation(msg)
            }
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                RepositoryError::DatabaseQueryError(msg)
            }
            other => RepositoryError::DatabaseQueryError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
