// ==========================================
// 血库记录管理控制台 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把引擎/仓储/导入错误转换为用户可读的错误消息
// 红线: 所有错误信息必须包含显式原因
// ==========================================

use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("缺少必填字段: {0}")]
    MissingRequiredField(String),

    #[error("时间格式无效: {0:?}（期望 HH:MM）")]
    InvalidTimeFormat(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("献血者不可预约: donor_id={donor_id}, eligibility={eligibility}")]
    DonorNotSchedulable { donor_id: String, eligibility: String },

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 数据完整性错误
    // ==========================================
    #[error("数据完整性违反: {entity}(id={id}) 字段 {field} 取值 {value:?} 无效")]
    DataIntegrityViolation {
        entity: String,
        id: String,
        field: String,
        value: String,
    },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::InvalidConfigValue { key, message } => {
                ApiError::InvalidInput(format!("配置{}无效: {}", key, message))
            }
        }
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidTimeFormat(raw) => ApiError::InvalidTimeFormat(raw),
            EngineError::MissingRequiredField(field) => {
                ApiError::MissingRequiredField(field.to_string())
            }
            EngineError::DataIntegrityViolation {
                entity,
                id,
                field,
                value,
            } => ApiError::DataIntegrityViolation {
                entity: entity.to_string(),
                id,
                field: field.to_string(),
                value,
            },
            EngineError::DonorNotSchedulable {
                donor_id,
                eligibility,
            } => ApiError::DonorNotSchedulable {
                donor_id,
                eligibility,
            },
            EngineError::InvalidStateTransition { from, to } => {
                ApiError::InvalidStateTransition { from, to }
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Repository(inner) => ApiError::from(inner),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_keep_structure() {
        let err = ApiError::from(EngineError::DonorNotSchedulable {
            donor_id: "D1".to_string(),
            eligibility: "permanently_ineligible".to_string(),
        });
        match err {
            ApiError::DonorNotSchedulable {
                donor_id,
                eligibility,
            } => {
                assert_eq!(donor_id, "D1");
                assert_eq!(eligibility, "permanently_ineligible");
            }
            other => panic!("Expected DonorNotSchedulable, got {:?}", other),
        }

        assert!(matches!(
            ApiError::from(EngineError::MissingRequiredField("time")),
            ApiError::MissingRequiredField(ref f) if f == "time"
        ));
    }

    #[test]
    fn test_repository_not_found_message() {
        let err = ApiError::from(RepositoryError::NotFound {
            entity: "blood_requests".to_string(),
            id: "R9".to_string(),
        });
        assert_eq!(err.to_string(), "资源未找到: blood_requests(id=R9)不存在");
    }

    #[test]
    fn test_store_failures_map_to_database_or_input_errors() {
        let err = ApiError::from(RepositoryError::LockError("poisoned".to_string()));
        assert!(matches!(err, ApiError::DatabaseError(ref m) if m.contains("poisoned")));

        let err = ApiError::from(RepositoryError::InvalidConfigValue {
            key: "expiry_critical_days".to_string(),
            message: "无法解析配置值: \"seven\"".to_string(),
        });
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m.contains("expiry_critical_days")));
    }
}
