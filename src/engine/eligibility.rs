// ==========================================
// 血库记录管理控制台 - 献血资格闸门
// ==========================================
// 红线: 不可献血者不得进入预约创建流程
// ==========================================
// 职责: 过滤可预约献血者 + 选定献血者的准入校验
// 说明: 过滤结果用于候选列表;ensure_schedulable 必须在选定献血者时调用,
//       候选列表之外没有其他环节会拦截不可献血者
// ==========================================

use crate::domain::types::DonorEligibility;
use crate::domain::Donor;
use crate::engine::error::{EngineError, EngineResult};
use tracing::instrument;

// ==========================================
// EligibilityGate - 献血资格闸门
// ==========================================
pub struct EligibilityGate;

impl EligibilityGate {
    /// 单个献血者是否可预约
    pub fn is_schedulable(donor: &Donor) -> bool {
        match donor.eligibility {
            DonorEligibility::Eligible => true,
            DonorEligibility::TemporarilyIneligible | DonorEligibility::PermanentlyIneligible => {
                false
            }
        }
    }

    /// 过滤可预约献血者,保持输入相对顺序
    #[instrument(skip(donors), fields(count = donors.len()))]
    pub fn schedulable(donors: &[Donor]) -> Vec<&Donor> {
        donors.iter().filter(|d| Self::is_schedulable(d)).collect()
    }

    /// 选定献血者的准入校验
    pub fn ensure_schedulable(donor: &Donor) -> EngineResult<()> {
        if Self::is_schedulable(donor) {
            Ok(())
        } else {
            Err(EngineError::DonorNotSchedulable {
                donor_id: donor.id.clone(),
                eligibility: donor.eligibility.to_string(),
            })
        }
    }
}
