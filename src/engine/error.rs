// ==========================================
// 血库记录管理控制台 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 引擎是纯计算,所有错误直接结构化返回,不做重试
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ===== 输入校验错误 =====
    #[error("时间格式无效: {0:?}（期望 HH:MM）")]
    InvalidTimeFormat(String),

    #[error("缺少必填字段: {0}")]
    MissingRequiredField(&'static str),

    // ===== 数据完整性错误 =====
    #[error("数据完整性违反: {entity}(id={id}) 字段 {field} 取值 {value:?} 无效")]
    DataIntegrityViolation {
        entity: &'static str,
        id: String,
        field: &'static str,
        value: String,
    },

    // ===== 业务规则错误 =====
    #[error("献血者不可预约: donor_id={donor_id}, eligibility={eligibility}")]
    DonorNotSchedulable { donor_id: String, eligibility: String },

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
