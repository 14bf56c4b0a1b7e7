// ==========================================
// API 层集成测试
// ==========================================
// 测试目标: 记录存储 → 快照校验 → 引擎 → API 的完整链路
// ==========================================

mod test_helpers;

use blood_bank_console::api::{
    ApiError, AppointmentApi, ConfigApi, DashboardApi, DonorApi, InventoryApi, PatientApi,
    RequestApi,
};
use blood_bank_console::app::AppState;
use blood_bank_console::config::{config_keys, ConfigManager, EngineConfig};
use blood_bank_console::engine::time_math::date_start;
use blood_bank_console::engine::{AppointmentForm, PatientForm};
use blood_bank_console::logging;
use blood_bank_console::{
    AppointmentStatus, AppointmentType, BloodType, ExpiryTier, RequestStatus,
};
use chrono::NaiveDate;
use std::io::Write;
use std::sync::Arc;
use test_helpers::{create_test_db, open_store, seed_donor, seed_request, seed_unit};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn schedule_form(donor_id: &str) -> AppointmentForm {
    AppointmentForm {
        donor_id: Some(donor_id.to_string()),
        date: Some(ymd(2025, 6, 1)),
        time: Some("14:30".to_string()),
        appointment_type: AppointmentType::Donation,
        notes: None,
    }
}

// ==========================================
// 驾驶舱
// ==========================================

#[test]
fn test_dashboard_counts_and_low_stock() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, store) = open_store(&db_path);

    seed_unit(&conn, "U1", "A+", 2500, "2025-06-20", "available");
    seed_unit(&conn, "U2", "A+", 500, "2025-06-21", "available");
    seed_unit(&conn, "U3", "O-", 1500, "2025-06-22", "available");
    seed_unit(&conn, "U4", "O-", 5000, "2025-06-22", "reserved");
    seed_donor(&conn, "D1", "Ada Obi", "O-", "0800", "eligible");
    seed_donor(&conn, "D2", "Bola Ade", "A+", "0801", "permanently_ineligible");
    seed_request(&conn, "R1", "pending", "2025-05-01 08:00:00");
    seed_request(&conn, "R2", "pending", "2025-05-02 08:00:00");
    seed_request(&conn, "R3", "fulfilled", "2025-05-03 08:00:00");

    let api = DashboardApi::new(store, EngineConfig::default());
    let view = api.get_dashboard().unwrap();

    // 3000 + 1500 = 4500 ml → 4 L
    assert_eq!(view.summary.total_liters_available, 4);
    assert_eq!(view.summary.total_donors, 2);
    assert_eq!(view.summary.pending_requests, 2);
    assert_eq!(view.summary.low_stock_type_count, 1);

    let low_cards: Vec<BloodType> = view
        .stock_cards
        .iter()
        .filter(|c| c.is_low)
        .map(|c| c.blood_type)
        .collect();
    assert_eq!(low_cards, vec![BloodType::ONeg]);
    assert_eq!(low_cards.len(), view.summary.low_stock_type_count);
}

#[test]
fn test_dashboard_on_empty_database() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (_conn, store) = open_store(&db_path);

    let view = DashboardApi::new(store, EngineConfig::default())
        .get_dashboard()
        .unwrap();
    assert_eq!(view.summary.total_liters_available, 0);
    assert_eq!(view.summary.low_stock_type_count, 0);
    assert!(view.stock_cards.is_empty());
}

#[test]
fn test_corrupt_row_fails_whole_snapshot() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, store) = open_store(&db_path);

    seed_unit(&conn, "U1", "A+", 450, "2025-06-20", "available");
    seed_unit(&conn, "U2", "A", 450, "2025-06-21", "available");

    let err = DashboardApi::new(store.clone(), EngineConfig::default())
        .get_dashboard()
        .unwrap_err();
    match err {
        ApiError::DataIntegrityViolation { id, field, value, .. } => {
            assert_eq!(id, "U2");
            assert_eq!(field, "blood_type");
            assert_eq!(value, "A");
        }
        other => panic!("Expected DataIntegrityViolation, got {:?}", other),
    }

    assert!(InventoryApi::new(store, EngineConfig::default())
        .stock_cards()
        .is_err());
}

#[test]
fn test_unreadable_stored_values_are_integrity_violations() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, store) = open_store(&db_path);
    let dashboard = DashboardApi::new(store.clone(), EngineConfig::default());

    seed_unit(&conn, "U1", "A+", 450, "2025-13-45", "available");
    match dashboard.get_dashboard().unwrap_err() {
        ApiError::DataIntegrityViolation {
            entity,
            id,
            field,
            value,
        } => {
            assert_eq!(entity, "blood_inventory");
            assert_eq!(id, "U1");
            assert_eq!(field, "expiry_date");
            assert_eq!(value, "2025-13-45");
        }
        other => panic!("Expected DataIntegrityViolation, got {:?}", other),
    }

    conn.lock()
        .unwrap()
        .execute(
            "UPDATE blood_inventory SET expiry_date = '2025-06-20', quantity_ml = 'lots' \
             WHERE id = 'U1'",
            [],
        )
        .unwrap();
    assert!(matches!(
        dashboard.get_dashboard().unwrap_err(),
        ApiError::DataIntegrityViolation { ref field, ref value, .. }
            if field == "quantity_ml" && value == "lots"
    ));

    seed_donor(&conn, "D1", "Ada Obi", "O-", "0800", "eligible");
    conn.lock()
        .unwrap()
        .execute(
            "INSERT INTO appointments (id, donor_id, appointment_date) \
             VALUES ('AP1', 'D1', 'soon')",
            [],
        )
        .unwrap();
    assert!(matches!(
        AppointmentApi::new(store.clone()).list(None, None).unwrap_err(),
        ApiError::DataIntegrityViolation { ref id, ref field, .. }
            if id == "AP1" && field == "appointment_date"
    ));

    conn.lock()
        .unwrap()
        .execute("UPDATE donors SET date_of_birth = 19900101 WHERE id = 'D1'", [])
        .unwrap();
    assert!(matches!(
        DonorApi::new(store).list(None, false).unwrap_err(),
        ApiError::DataIntegrityViolation { ref field, ref value, .. }
            if field == "date_of_birth" && value == "19900101"
    ));
}

// ==========================================
// 库存
// ==========================================

#[test]
fn test_inventory_list_classifies_and_orders_by_expiry() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, store) = open_store(&db_path);

    seed_unit(&conn, "U-good", "B+", 450, "2025-06-30", "available");
    seed_unit(&conn, "U-expired", "B+", 450, "2025-05-30", "expired");
    seed_unit(&conn, "U-warn", "B+", 450, "2025-06-12", "available");

    let api = InventoryApi::new(store, EngineConfig::default());
    let units = api.list_units(date_start(ymd(2025, 6, 1))).unwrap();

    let ids: Vec<&str> = units.iter().map(|u| u.unit.id.as_str()).collect();
    assert_eq!(ids, vec!["U-expired", "U-warn", "U-good"]);

    let tiers: Vec<ExpiryTier> = units.iter().map(|u| u.tier).collect();
    assert_eq!(
        tiers,
        vec![ExpiryTier::Critical, ExpiryTier::Warning, ExpiryTier::Good]
    );
    assert_eq!(units[0].days_left, -2);
}

#[test]
fn test_inventory_csv_import() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (_conn, store) = open_store(&db_path);
    let api = InventoryApi::new(store, EngineConfig::default());

    let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv, "blood_type,quantity_ml,collection_date,expiry_date,status").unwrap();
    writeln!(csv, "AB-,450,2025-05-01,2025-06-12,").unwrap();
    writeln!(csv, "AB-,300,2025-05-02,2025-06-13,available").unwrap();
    writeln!(csv, "O+,450,2025-05-02,2025-06-13,quarantine").unwrap();
    csv.flush().unwrap();

    let summary = api.import_csv(csv.path()).unwrap();
    assert_eq!(summary.imported, 3);
    assert_eq!(summary.total_quantity_ml, 1200);
    assert_eq!(summary.unit_ids.len(), 3);

    let levels = api.stock_levels().unwrap();
    assert_eq!(levels.get(&BloodType::AbNeg), Some(&750));
    assert!(!levels.contains_key(&BloodType::OPos));
}

#[test]
fn test_invalid_csv_imports_nothing() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (_conn, store) = open_store(&db_path);
    let api = InventoryApi::new(store, EngineConfig::default());

    let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv, "blood_type,quantity_ml,collection_date,expiry_date").unwrap();
    writeln!(csv, "A+,450,2025-05-01,2025-06-12").unwrap();
    writeln!(csv, "A+,-450,2025-05-01,2025-06-12").unwrap();
    csv.flush().unwrap();

    let err = api.import_csv(csv.path()).unwrap_err();
    assert!(matches!(err, ApiError::ImportError(ref msg) if msg.contains("行 3")));
    assert!(api.stock_levels().unwrap().is_empty());
}

// ==========================================
// 献血者与预约
// ==========================================

#[test]
fn test_donor_search_and_eligible_filter() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, store) = open_store(&db_path);

    seed_donor(&conn, "D1", "Zainab Musa", "O-", "0800-111", "eligible");
    seed_donor(&conn, "D2", "Ada Obi", "O+", "0800-222", "temporarily_ineligible");
    seed_donor(&conn, "D3", "Chike Obi", "A+", "0900-333", "eligible");

    let api = DonorApi::new(store);

    let all: Vec<String> = api
        .list(None, false)
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(all, vec!["D2", "D3", "D1"]);

    let obi: Vec<String> = api
        .list(Some("OBI"), true)
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(obi, vec!["D3"]);

    let by_phone = api.list(Some("0800"), false).unwrap();
    assert_eq!(by_phone.len(), 2);

    let by_type = api.list(Some("o-"), false).unwrap();
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].id, "D1");
}

#[test]
fn test_schedule_appointment_flow() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, store) = open_store(&db_path);
    seed_donor(&conn, "D1", "Ada Obi", "O-", "0800", "eligible");

    let api = AppointmentApi::new(store);
    let candidates = api.schedulable_donors().unwrap();
    assert_eq!(candidates.len(), 1);

    let view = api.schedule(&schedule_form("D1")).unwrap();
    assert_eq!(view.appointment.donor_id.as_deref(), Some("D1"));
    assert_eq!(view.appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(
        view.appointment.appointment_date,
        ymd(2025, 6, 1).and_hms_opt(14, 30, 0).unwrap()
    );
    assert_eq!(view.donor.as_ref().map(|d| d.full_name.as_str()), Some("Ada Obi"));

    let listed = api.list(Some("ada"), Some(AppointmentStatus::Scheduled)).unwrap();
    assert_eq!(listed, vec![view]);
    assert!(api
        .list(None, Some(AppointmentStatus::Completed))
        .unwrap()
        .is_empty());
}

#[test]
fn test_schedule_rejects_ineligible_and_unknown_donors() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, store) = open_store(&db_path);
    seed_donor(&conn, "D2", "Bola Ade", "A+", "0801", "permanently_ineligible");

    let api = AppointmentApi::new(store);

    match api.schedule(&schedule_form("D2")).unwrap_err() {
        ApiError::DonorNotSchedulable { donor_id, eligibility } => {
            assert_eq!(donor_id, "D2");
            assert_eq!(eligibility, "permanently_ineligible");
        }
        other => panic!("Expected DonorNotSchedulable, got {:?}", other),
    }

    assert!(matches!(
        api.schedule(&schedule_form("ghost")),
        Err(ApiError::NotFound(_))
    ));

    let bad_time = AppointmentForm {
        time: Some("25:99".to_string()),
        ..schedule_form("D2")
    };
    assert!(matches!(
        api.schedule(&bad_time),
        Err(ApiError::InvalidTimeFormat(ref t)) if t == "25:99"
    ));

    assert!(api.list(None, None).unwrap().is_empty());
}

// ==========================================
// 患者
// ==========================================

#[test]
fn test_register_and_search_patients() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (_conn, store) = open_store(&db_path);
    let api = PatientApi::new(store);

    let form = PatientForm {
        full_name: Some("Chidi Eze".to_string()),
        patient_id: Some("P-0042".to_string()),
        blood_type: Some(BloodType::BNeg),
        phone: Some("0803".to_string()),
        email: Some("  ".to_string()),
        address: None,
        date_of_birth: Some(ymd(1985, 3, 14)),
        medical_notes: None,
    };

    let patient = api.register(&form).unwrap();
    assert_eq!(patient.email, None);

    assert!(matches!(
        api.register(&form),
        Err(ApiError::BusinessRuleViolation(_))
    ));
    assert!(matches!(
        api.register(&PatientForm {
            phone: None,
            ..form.clone()
        }),
        Err(ApiError::MissingRequiredField(ref f)) if f == "phone"
    ));

    assert_eq!(api.list(Some("p-00")).unwrap(), vec![patient]);
    assert!(api.list(Some("nobody")).unwrap().is_empty());
}

// ==========================================
// 用血申请
// ==========================================

#[test]
fn test_request_status_transitions() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, store) = open_store(&db_path);
    seed_request(&conn, "R1", "pending", "2025-05-01 08:00:00");
    seed_request(&conn, "R2", "pending", "2025-05-03 08:00:00");

    let api = RequestApi::new(store);

    let ids: Vec<String> = api.list(None).unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["R2", "R1"]);

    assert_eq!(
        api.set_status("R1", RequestStatus::Approved).unwrap().status,
        RequestStatus::Approved
    );
    api.set_status("R1", RequestStatus::Fulfilled).unwrap();

    assert!(matches!(
        api.set_status("R1", RequestStatus::Pending),
        Err(ApiError::InvalidStateTransition { .. })
    ));
    assert!(matches!(
        api.set_status("R2", RequestStatus::Fulfilled),
        Err(ApiError::InvalidStateTransition { .. })
    ));
    assert!(matches!(
        api.set_status("R9", RequestStatus::Approved),
        Err(ApiError::NotFound(_))
    ));

    let pending = api.list(Some(RequestStatus::Pending)).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "R2");
}

// ==========================================
// 配置
// ==========================================

#[test]
fn test_config_changes_flow_into_app_state() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let (conn, _store) = open_store(&db_path);
    seed_unit(&conn, "U1", "A+", 2500, "2025-06-20", "available");

    let config_api = ConfigApi::new(Arc::new(ConfigManager::new(&db_path).unwrap()));

    assert!(matches!(
        config_api.set(config_keys::EXPIRY_CRITICAL_DAYS, "30"),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        config_api.set("unknown_key", "1"),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        config_api.set(config_keys::LOW_STOCK_THRESHOLD_ML, "lots"),
        Err(ApiError::InvalidInput(_))
    ));

    let updated = config_api
        .set(config_keys::LOW_STOCK_THRESHOLD_ML, "3000")
        .unwrap();
    assert_eq!(updated.low_stock_threshold_ml, 3000);

    let shown = config_api.show().unwrap();
    assert_eq!(shown.stored.len(), 1);
    assert_eq!(shown.effective, Some(updated));
    assert!(shown.invalid_reason.is_none());

    let state = AppState::new(db_path.clone()).unwrap();
    assert_eq!(state.engine_config.low_stock_threshold_ml, 3000);
    let view = state.dashboard_api.get_dashboard().unwrap();
    assert_eq!(view.summary.low_stock_type_count, 1);
}

#[test]
fn test_config_show_survives_invalid_stored_value() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = Arc::new(ConfigManager::new(&db_path).unwrap());
    manager
        .set_global_config_value(config_keys::EXPIRY_CRITICAL_DAYS, "seven")
        .unwrap();

    let config_api = ConfigApi::new(manager);
    let shown = config_api.show().unwrap();
    assert!(shown.effective.is_none());
    assert!(shown
        .invalid_reason
        .as_deref()
        .is_some_and(|reason| reason.contains(config_keys::EXPIRY_CRITICAL_DAYS)));
    assert_eq!(
        shown.stored.get(config_keys::EXPIRY_CRITICAL_DAYS).map(String::as_str),
        Some("seven")
    );

    assert!(matches!(
        AppState::new(db_path.clone()),
        Err(ApiError::InvalidInput(_))
    ));

    let repaired = config_api
        .set(config_keys::EXPIRY_CRITICAL_DAYS, "5")
        .unwrap();
    assert_eq!(repaired.expiry_critical_days, 5);
    assert_eq!(config_api.show().unwrap().effective, Some(repaired));
    assert!(AppState::new(db_path).is_ok());
}
