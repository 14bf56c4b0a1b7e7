// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据写入等功能
// 说明: 献血者与用血申请没有写入接口,测试直接用 SQL 写入
// ==========================================

#![allow(dead_code)]

use blood_bank_console::db::{init_schema, open_sqlite_connection};
use blood_bank_console::repository::{RecordStore, SqliteRecordStore};
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开共享连接与记录存储
pub fn open_store(db_path: &str) -> (Arc<Mutex<Connection>>, Arc<dyn RecordStore>) {
    let conn = Arc::new(Mutex::new(open_sqlite_connection(db_path).unwrap()));
    let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::from_connection(conn.clone()));
    (conn, store)
}

pub fn seed_donor(
    conn: &Arc<Mutex<Connection>>,
    id: &str,
    full_name: &str,
    blood_type: &str,
    phone: &str,
    eligibility: &str,
) {
    conn.lock()
        .unwrap()
        .execute(
            r#"
            INSERT INTO donors (id, full_name, blood_type, phone, date_of_birth, eligibility)
            VALUES (?1, ?2, ?3, ?4, '1990-01-01', ?5)
            "#,
            params![id, full_name, blood_type, phone, eligibility],
        )
        .unwrap();
}

pub fn seed_request(conn: &Arc<Mutex<Connection>>, id: &str, status: &str, created_at: &str) {
    conn.lock()
        .unwrap()
        .execute(
            r#"
            INSERT INTO blood_requests (
                id, hospital_name, requester_name, blood_type, quantity_ml, urgency, status,
                created_at
            ) VALUES (?1, 'City General', 'Dr. Bello', 'O-', 900, 'urgent', ?2, ?3)
            "#,
            params![id, status, created_at],
        )
        .unwrap();
}

/// 直接写入血液单元（可写入越界取值,用于完整性测试）
pub fn seed_unit(
    conn: &Arc<Mutex<Connection>>,
    id: &str,
    blood_type: &str,
    quantity_ml: i64,
    expiry_date: &str,
    status: &str,
) {
    conn.lock()
        .unwrap()
        .execute(
            r#"
            INSERT INTO blood_inventory (
                id, blood_type, quantity_ml, collection_date, expiry_date, status
            )
            VALUES (?1, ?2, ?3, '2025-05-01', ?4, ?5)
            "#,
            params![id, blood_type, quantity_ml, expiry_date, status],
        )
        .unwrap();
}
