// ==========================================
// 血库记录管理控制台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享连接和API实例
// 说明: 记录存储与配置管理器共用同一个 SQLite 连接
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{
    ApiResult, AppointmentApi, ConfigApi, DashboardApi, DonorApi, InventoryApi, PatientApi,
    RequestApi,
};
use crate::config::{ConfigManager, EngineConfig};
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{RecordStore, RepositoryError, SqliteRecordStore};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "BLOOD_BANK_DB_PATH";

const DB_FILE_NAME: &str = "blood_bank.db";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 生效的引擎配置（启动时读取一次）
    pub engine_config: EngineConfig,

    pub dashboard_api: Arc<DashboardApi>,
    pub inventory_api: Arc<InventoryApi>,
    pub donor_api: Arc<DonorApi>,
    pub patient_api: Arc<PatientApi>,
    pub appointment_api: Arc<AppointmentApi>,
    pub request_api: Arc<RequestApi>,
    pub config_api: Arc<ConfigApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表（幂等）
    /// 2. 读取并校验引擎配置
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(RepositoryError::from)?;
        init_schema(&conn).map_err(RepositoryError::from)?;
        let conn = Arc::new(Mutex::new(conn));

        let store: Arc<dyn RecordStore> =
            Arc::new(SqliteRecordStore::from_connection(conn.clone()));
        let config_api = Arc::new(ConfigApi::new(Arc::new(ConfigManager::from_connection(
            conn,
        )?)));
        let engine_config = config_api.effective_config()?;
        tracing::debug!(?engine_config, "引擎配置已加载");

        Ok(Self {
            db_path,
            engine_config,
            dashboard_api: Arc::new(DashboardApi::new(store.clone(), engine_config)),
            inventory_api: Arc::new(InventoryApi::new(store.clone(), engine_config)),
            donor_api: Arc::new(DonorApi::new(store.clone())),
            patient_api: Arc::new(PatientApi::new(store.clone())),
            appointment_api: Arc::new(AppointmentApi::new(store.clone())),
            request_api: Arc::new(RequestApi::new(store)),
            config_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 BLOOD_BANK_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(".").join(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        let dir = data_dir.join("blood-bank-console-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("blood-bank-console");

        // 确保目录存在
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}
