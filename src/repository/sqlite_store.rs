// ==========================================
// 血库记录管理控制台 - SQLite 记录存储
// ==========================================
// 职责: RecordStore 的本地实现（blood_inventory / donors / patients /
//       blood_requests / appointments 五张表）
// 红线: Repository 不含业务逻辑，只负责数据访问
// 约束: 所有查询使用参数化
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::raw::{RawAppointment, RawBloodRequest, RawBloodUnit, RawDonor, RawPatient};
use crate::domain::types::RequestStatus;
use crate::domain::{NewAppointment, NewBloodUnit, NewPatient};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::record_store::RecordStore;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const BLOOD_UNIT_COLUMNS: &str =
    "id, blood_type, quantity_ml, collection_date, expiry_date, status";

const DONOR_COLUMNS: &str = "id, full_name, blood_type, phone, email, address, date_of_birth, \
     last_donation_date, eligibility, medical_notes";

const PATIENT_COLUMNS: &str = "id, patient_id, full_name, blood_type, phone, email, address, \
     date_of_birth, medical_notes, status";

const REQUEST_COLUMNS: &str = "id, hospital_name, requester_name, blood_type, quantity_ml, \
     urgency, status, notes, created_at";

const APPOINTMENT_SELECT: &str = r#"
    SELECT
        a.id, a.donor_id, a.appointment_date, a.appointment_type, a.status, a.notes,
        d.full_name AS donor_full_name, d.phone AS donor_phone
    FROM appointments a
    LEFT JOIN donors d ON d.id = a.donor_id
"#;

// ==========================================
// 行映射
// ==========================================
// 数量与日期列按原始文本读取,任何存储类型都不在此处报错

fn raw_opt_text(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<String>> {
    let text = match row.get::<_, Value>(column)? {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    };
    Ok(text)
}

fn raw_text(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(raw_opt_text(row, column)?.unwrap_or_default())
}

fn map_blood_unit(row: &Row<'_>) -> rusqlite::Result<RawBloodUnit> {
    Ok(RawBloodUnit {
        id: row.get("id")?,
        blood_type: row.get("blood_type")?,
        quantity_ml: raw_text(row, "quantity_ml")?,
        collection_date: raw_text(row, "collection_date")?,
        expiry_date: raw_text(row, "expiry_date")?,
        status: row.get("status")?,
    })
}

fn map_donor(row: &Row<'_>) -> rusqlite::Result<RawDonor> {
    Ok(RawDonor {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        blood_type: row.get("blood_type")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        date_of_birth: raw_text(row, "date_of_birth")?,
        last_donation_date: raw_opt_text(row, "last_donation_date")?,
        eligibility: row.get("eligibility")?,
        medical_notes: row.get("medical_notes")?,
    })
}

fn map_patient(row: &Row<'_>) -> rusqlite::Result<RawPatient> {
    Ok(RawPatient {
        id: row.get("id")?,
        patient_id: row.get("patient_id")?,
        full_name: row.get("full_name")?,
        blood_type: row.get("blood_type")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        date_of_birth: raw_text(row, "date_of_birth")?,
        medical_notes: row.get("medical_notes")?,
        status: row.get("status")?,
    })
}

fn map_blood_request(row: &Row<'_>) -> rusqlite::Result<RawBloodRequest> {
    Ok(RawBloodRequest {
        id: row.get("id")?,
        hospital_name: row.get("hospital_name")?,
        requester_name: row.get("requester_name")?,
        blood_type: row.get("blood_type")?,
        quantity_ml: raw_text(row, "quantity_ml")?,
        urgency: row.get("urgency")?,
        status: row.get("status")?,
        notes: row.get("notes")?,
        created_at: raw_opt_text(row, "created_at")?,
    })
}

fn map_appointment(row: &Row<'_>) -> rusqlite::Result<RawAppointment> {
    Ok(RawAppointment {
        id: row.get("id")?,
        donor_id: row.get("donor_id")?,
        appointment_date: raw_text(row, "appointment_date")?,
        appointment_type: row.get("appointment_type")?,
        status: row.get("status")?,
        notes: row.get("notes")?,
        donor_full_name: row.get("donor_full_name")?,
        donor_phone: row.get("donor_phone")?,
    })
}

// ==========================================
// 按主键回读（调用方已持有连接锁）
// ==========================================

fn select_blood_unit(conn: &Connection, id: &str) -> RepositoryResult<RawBloodUnit> {
    let sql = format!("SELECT {} FROM blood_inventory WHERE id = ?1", BLOOD_UNIT_COLUMNS);
    conn.query_row(&sql, params![id], map_blood_unit)
        .optional()?
        .ok_or_else(|| not_found("blood_inventory", id))
}

fn select_patient(conn: &Connection, id: &str) -> RepositoryResult<RawPatient> {
    let sql = format!("SELECT {} FROM patients WHERE id = ?1", PATIENT_COLUMNS);
    conn.query_row(&sql, params![id], map_patient)
        .optional()?
        .ok_or_else(|| not_found("patients", id))
}

fn select_appointment(conn: &Connection, id: &str) -> RepositoryResult<RawAppointment> {
    let sql = format!("{} WHERE a.id = ?1", APPOINTMENT_SELECT);
    conn.query_row(&sql, params![id], map_appointment)
        .optional()?
        .ok_or_else(|| not_found("appointments", id))
}

fn not_found(entity: &str, id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity: entity.to_string(),
        id: id.to_string(),
    }
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

// ==========================================
// SqliteRecordStore - SQLite 记录存储
// ==========================================
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    /// 创建新的 SqliteRecordStore 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 建表（幂等）
    pub fn initialize_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        init_schema(&conn)?;
        Ok(())
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl RecordStore for SqliteRecordStore {
    fn list_blood_units(&self) -> RepositoryResult<Vec<RawBloodUnit>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM blood_inventory ORDER BY expiry_date ASC, id ASC",
            BLOOD_UNIT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let units = stmt
            .query_map([], map_blood_unit)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(units)
    }

    fn list_donors(&self) -> RepositoryResult<Vec<RawDonor>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM donors ORDER BY full_name ASC, id ASC", DONOR_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let donors = stmt
            .query_map([], map_donor)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(donors)
    }

    fn find_donor(&self, id: &str) -> RepositoryResult<Option<RawDonor>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM donors WHERE id = ?1", DONOR_COLUMNS);
        let donor = conn.query_row(&sql, params![id], map_donor).optional()?;
        Ok(donor)
    }

    fn list_patients(&self) -> RepositoryResult<Vec<RawPatient>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM patients ORDER BY full_name ASC, id ASC",
            PATIENT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let patients = stmt
            .query_map([], map_patient)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(patients)
    }

    fn list_blood_requests(&self) -> RepositoryResult<Vec<RawBloodRequest>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM blood_requests ORDER BY created_at DESC, id ASC",
            REQUEST_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let requests = stmt
            .query_map([], map_blood_request)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(requests)
    }

    fn find_blood_request(&self, id: &str) -> RepositoryResult<Option<RawBloodRequest>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM blood_requests WHERE id = ?1", REQUEST_COLUMNS);
        let request = conn
            .query_row(&sql, params![id], map_blood_request)
            .optional()?;
        Ok(request)
    }

    fn list_appointments(&self) -> RepositoryResult<Vec<RawAppointment>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} ORDER BY a.appointment_date DESC, a.id ASC",
            APPOINTMENT_SELECT
        );
        let mut stmt = conn.prepare(&sql)?;
        let appointments = stmt
            .query_map([], map_appointment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(appointments)
    }

    fn count_donors(&self) -> RepositoryResult<u64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM donors", [], |row| row.get(0))?;
        Ok(to_count(count))
    }

    fn count_blood_requests(&self, status: RequestStatus) -> RepositoryResult<u64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM blood_requests WHERE status = ?1",
            params![status.as_str()],
            |row| row.get(0),
        )?;
        Ok(to_count(count))
    }

    fn insert_blood_unit(&self, draft: &NewBloodUnit) -> RepositoryResult<RawBloodUnit> {
        let conn = self.get_conn()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO blood_inventory (
                id, blood_type, quantity_ml, collection_date, expiry_date, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                id,
                draft.blood_type.as_str(),
                draft.quantity_ml,
                draft.collection_date,
                draft.expiry_date,
                draft.status,
            ],
        )?;

        select_blood_unit(&conn, &id)
    }

    fn insert_patient(&self, draft: &NewPatient) -> RepositoryResult<RawPatient> {
        let conn = self.get_conn()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO patients (
                id, patient_id, full_name, blood_type, phone, email, address,
                date_of_birth, medical_notes, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                id,
                draft.patient_id,
                draft.full_name,
                draft.blood_type.as_str(),
                draft.phone,
                draft.email,
                draft.address,
                draft.date_of_birth,
                draft.medical_notes,
                draft.status.as_str(),
            ],
        )?;

        select_patient(&conn, &id)
    }

    fn insert_appointment(&self, draft: &NewAppointment) -> RepositoryResult<RawAppointment> {
        let conn = self.get_conn()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO appointments (
                id, donor_id, appointment_date, appointment_type, status, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                id,
                draft.donor_id,
                draft.appointment_date,
                draft.appointment_type.as_str(),
                draft.status.as_str(),
                draft.notes,
            ],
        )?;

        select_appointment(&conn, &id)
    }

    fn update_blood_request_status(&self, id: &str, status: RequestStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE blood_requests SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;

        if affected == 0 {
            return Err(not_found("blood_requests", id));
        }
        Ok(())
    }
}
