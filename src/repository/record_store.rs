// ==========================================
// 血库记录管理控制台 - 记录存储接口
// ==========================================
// 职责: 引擎调用方与记录存储之间的显式接口（依赖注入,不使用全局单例）
// 红线: 只返回原始快照行,取值解释交给 engine::snapshot
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::raw::{RawAppointment, RawBloodRequest, RawBloodUnit, RawDonor, RawPatient};
use crate::domain::types::RequestStatus;
use crate::domain::{NewAppointment, NewBloodUnit, NewPatient};
use crate::repository::error::RepositoryResult;

// ==========================================
// RecordStore Trait
// ==========================================
// 实现者: SqliteRecordStore
pub trait RecordStore: Send + Sync {
    // ===== 快照读取 =====

    /// 全部血液单元（按失效日期升序）
    fn list_blood_units(&self) -> RepositoryResult<Vec<RawBloodUnit>>;

    /// 全部献血者（按姓名升序）
    fn list_donors(&self) -> RepositoryResult<Vec<RawDonor>>;

    /// 按 id 查询献血者
    fn find_donor(&self, id: &str) -> RepositoryResult<Option<RawDonor>>;

    /// 全部患者（按姓名升序）
    fn list_patients(&self) -> RepositoryResult<Vec<RawPatient>>;

    /// 全部用血申请（按创建时间降序）
    fn list_blood_requests(&self) -> RepositoryResult<Vec<RawBloodRequest>>;

    /// 按 id 查询用血申请
    fn find_blood_request(&self, id: &str) -> RepositoryResult<Option<RawBloodRequest>>;

    /// 全部预约,附带献血者姓名/电话（按预约时间降序）
    fn list_appointments(&self) -> RepositoryResult<Vec<RawAppointment>>;

    // ===== 全表计数 =====

    fn count_donors(&self) -> RepositoryResult<u64>;

    fn count_blood_requests(&self, status: RequestStatus) -> RepositoryResult<u64>;

    // ===== 写入 =====

    /// 写入血液单元,返回持久化后的记录
    fn insert_blood_unit(&self, draft: &NewBloodUnit) -> RepositoryResult<RawBloodUnit>;

    /// 写入患者,返回持久化后的记录
    fn insert_patient(&self, draft: &NewPatient) -> RepositoryResult<RawPatient>;

    /// 写入预约,返回持久化后的记录
    fn insert_appointment(&self, draft: &NewAppointment) -> RepositoryResult<RawAppointment>;

    /// 更新用血申请状态
    fn update_blood_request_status(&self, id: &str, status: RequestStatus) -> RepositoryResult<()>;
}
