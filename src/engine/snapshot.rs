// ==========================================
// 血库记录管理控制台 - 快照校验
// ==========================================
// 职责: 原始快照行 → 类型化领域实体
// 策略: 拒绝 (reject)。任一记录的枚举取值越界、数量非整数或为负、
//       日期无法解析、失效日期不晚于采集日期,整个快照转换失败并指明该记录
// 格式: 日期 YYYY-MM-DD;时间 YYYY-MM-DD HH:MM[:SS[.f]]（分隔符可为 T）
// 红线: 不做默认值兜底,不跳过坏记录
// ==========================================

use crate::domain::raw::{RawAppointment, RawBloodRequest, RawBloodUnit, RawDonor, RawPatient};
use crate::domain::types::UnknownVariant;
use crate::domain::{
    Appointment, AppointmentView, BloodRequest, BloodUnit, Donor, DonorContact, Patient,
};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;
use tracing::{instrument, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

fn violation(entity: &'static str, id: &str, field: &'static str, value: String) -> EngineError {
    warn!(entity, id, field, value = %value, "快照记录违反数据完整性");
    EngineError::DataIntegrityViolation {
        entity,
        id: id.to_string(),
        field,
        value,
    }
}

fn parse_enum<T>(
    entity: &'static str,
    id: &str,
    field: &'static str,
    raw: &str,
) -> EngineResult<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    raw.parse::<T>()
        .map_err(|e| violation(entity, id, field, e.value))
}

fn parse_quantity(entity: &'static str, id: &str, raw: &str) -> EngineResult<u32> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| violation(entity, id, "quantity_ml", raw.to_string()))
}

fn parse_date(
    entity: &'static str,
    id: &str,
    field: &'static str,
    raw: &str,
) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| violation(entity, id, field, raw.to_string()))
}

fn parse_datetime(
    entity: &'static str,
    id: &str,
    field: &'static str,
    raw: &str,
) -> EngineResult<NaiveDateTime> {
    let text = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| violation(entity, id, field, raw.to_string()))
}

// ==========================================
// 单条记录转换
// ==========================================

pub fn blood_unit(raw: RawBloodUnit) -> EngineResult<BloodUnit> {
    const ENTITY: &str = "blood_inventory";

    let blood_type = parse_enum(ENTITY, &raw.id, "blood_type", &raw.blood_type)?;
    let quantity_ml = parse_quantity(ENTITY, &raw.id, &raw.quantity_ml)?;
    let collection_date = parse_date(ENTITY, &raw.id, "collection_date", &raw.collection_date)?;
    let expiry_date = parse_date(ENTITY, &raw.id, "expiry_date", &raw.expiry_date)?;

    if expiry_date <= collection_date {
        return Err(violation(
            ENTITY,
            &raw.id,
            "expiry_date",
            format!("{} (collection_date={})", expiry_date, collection_date),
        ));
    }

    Ok(BloodUnit {
        id: raw.id,
        blood_type,
        quantity_ml,
        collection_date,
        expiry_date,
        status: raw.status,
    })
}

pub fn donor(raw: RawDonor) -> EngineResult<Donor> {
    const ENTITY: &str = "donors";

    let blood_type = parse_enum(ENTITY, &raw.id, "blood_type", &raw.blood_type)?;
    let eligibility = parse_enum(ENTITY, &raw.id, "eligibility", &raw.eligibility)?;
    let date_of_birth = parse_date(ENTITY, &raw.id, "date_of_birth", &raw.date_of_birth)?;
    let last_donation_date = raw
        .last_donation_date
        .as_deref()
        .map(|value| parse_date(ENTITY, &raw.id, "last_donation_date", value))
        .transpose()?;

    Ok(Donor {
        id: raw.id,
        full_name: raw.full_name,
        blood_type,
        phone: raw.phone,
        email: raw.email,
        address: raw.address,
        date_of_birth,
        last_donation_date,
        eligibility,
        medical_notes: raw.medical_notes,
    })
}

pub fn patient(raw: RawPatient) -> EngineResult<Patient> {
    const ENTITY: &str = "patients";

    let blood_type = parse_enum(ENTITY, &raw.id, "blood_type", &raw.blood_type)?;
    let status = parse_enum(ENTITY, &raw.id, "status", &raw.status)?;
    let date_of_birth = parse_date(ENTITY, &raw.id, "date_of_birth", &raw.date_of_birth)?;

    Ok(Patient {
        id: raw.id,
        patient_id: raw.patient_id,
        full_name: raw.full_name,
        blood_type,
        phone: raw.phone,
        email: raw.email,
        address: raw.address,
        date_of_birth,
        medical_notes: raw.medical_notes,
        status,
    })
}

pub fn blood_request(raw: RawBloodRequest) -> EngineResult<BloodRequest> {
    const ENTITY: &str = "blood_requests";

    let blood_type = parse_enum(ENTITY, &raw.id, "blood_type", &raw.blood_type)?;
    let quantity_ml = parse_quantity(ENTITY, &raw.id, &raw.quantity_ml)?;
    let urgency = parse_enum(ENTITY, &raw.id, "urgency", &raw.urgency)?;
    let status = parse_enum(ENTITY, &raw.id, "status", &raw.status)?;
    let created_at = raw
        .created_at
        .as_deref()
        .map(|value| parse_datetime(ENTITY, &raw.id, "created_at", value))
        .transpose()?;

    Ok(BloodRequest {
        id: raw.id,
        hospital_name: raw.hospital_name,
        requester_name: raw.requester_name,
        blood_type,
        quantity_ml,
        urgency,
        status,
        notes: raw.notes,
        created_at,
    })
}

pub fn appointment(raw: RawAppointment) -> EngineResult<AppointmentView> {
    const ENTITY: &str = "appointments";

    let appointment_type =
        parse_enum(ENTITY, &raw.id, "appointment_type", &raw.appointment_type)?;
    let status = parse_enum(ENTITY, &raw.id, "status", &raw.status)?;
    let appointment_date =
        parse_datetime(ENTITY, &raw.id, "appointment_date", &raw.appointment_date)?;

    let donor = match (raw.donor_full_name, raw.donor_phone) {
        (Some(full_name), Some(phone)) => Some(DonorContact { full_name, phone }),
        _ => None,
    };

    Ok(AppointmentView {
        appointment: Appointment {
            id: raw.id,
            donor_id: raw.donor_id,
            appointment_date,
            appointment_type,
            status,
            notes: raw.notes,
        },
        donor,
    })
}

// ==========================================
// 整批快照转换
// ==========================================

#[instrument(skip(raws), fields(count = raws.len()))]
pub fn blood_units(raws: Vec<RawBloodUnit>) -> EngineResult<Vec<BloodUnit>> {
    raws.into_iter().map(blood_unit).collect()
}

#[instrument(skip(raws), fields(count = raws.len()))]
pub fn donors(raws: Vec<RawDonor>) -> EngineResult<Vec<Donor>> {
    raws.into_iter().map(donor).collect()
}

#[instrument(skip(raws), fields(count = raws.len()))]
pub fn patients(raws: Vec<RawPatient>) -> EngineResult<Vec<Patient>> {
    raws.into_iter().map(patient).collect()
}

#[instrument(skip(raws), fields(count = raws.len()))]
pub fn blood_requests(raws: Vec<RawBloodRequest>) -> EngineResult<Vec<BloodRequest>> {
    raws.into_iter().map(blood_request).collect()
}

#[instrument(skip(raws), fields(count = raws.len()))]
pub fn appointments(raws: Vec<RawAppointment>) -> EngineResult<Vec<AppointmentView>> {
    raws.into_iter().map(appointment).collect()
}
