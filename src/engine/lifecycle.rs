// ==========================================
// 血库记录管理控制台 - 状态流转校验
// ==========================================
// 用血申请: pending → approved → fulfilled / pending → rejected
// ==========================================

use crate::domain::types::RequestStatus;
use crate::engine::error::{EngineError, EngineResult};

/// 校验用血申请状态流转
pub fn check_request_transition(from: RequestStatus, to: RequestStatus) -> EngineResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(EngineError::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
