// ==========================================
// 血库记录管理控制台 - 记录检索
// ==========================================
// 规则: 文本字段不区分大小写的子串匹配,电话按原样子串匹配;
//       空检索词匹配全部记录
// ==========================================

use crate::domain::types::AppointmentStatus;
use crate::domain::{AppointmentView, Donor, Patient};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// 献血者检索: 姓名 / 血型 / 电话
pub fn filter_donors<'a>(donors: &'a [Donor], term: &str) -> Vec<&'a Donor> {
    let needle = term.to_lowercase();
    donors
        .iter()
        .filter(|d| {
            contains_ci(&d.full_name, &needle)
                || contains_ci(d.blood_type.as_str(), &needle)
                || d.phone.contains(term)
        })
        .collect()
}

/// 患者检索: 姓名 / 患者编号 / 电话
pub fn filter_patients<'a>(patients: &'a [Patient], term: &str) -> Vec<&'a Patient> {
    let needle = term.to_lowercase();
    patients
        .iter()
        .filter(|p| {
            contains_ci(&p.full_name, &needle)
                || contains_ci(&p.patient_id, &needle)
                || p.phone.contains(term)
        })
        .collect()
}

/// 预约检索: 关联献血者姓名 / 电话,可选状态过滤
///
/// 检索词非空时,没有关联献血者的预约不会命中
pub fn filter_appointments<'a>(
    appointments: &'a [AppointmentView],
    term: &str,
    status: Option<AppointmentStatus>,
) -> Vec<&'a AppointmentView> {
    let needle = term.to_lowercase();
    appointments
        .iter()
        .filter(|view| {
            term.is_empty()
                || view.donor.as_ref().map_or(false, |donor| {
                    contains_ci(&donor.full_name, &needle) || donor.phone.contains(term)
                })
        })
        .filter(|view| status.map_or(true, |s| view.appointment.status == s))
        .collect()
}
