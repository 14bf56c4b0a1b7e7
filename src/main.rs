// ==========================================
// 血库记录管理控制台 - 命令行入口
// ==========================================
// 输出: 命令结果以 JSON 写入 stdout,日志写入 stderr
// 数据库路径: --db → BLOOD_BANK_DB_PATH → 用户数据目录
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;

use blood_bank_console::api::ConfigApi;
use blood_bank_console::app::{get_default_db_path, AppState};
use blood_bank_console::config::ConfigManager;
use blood_bank_console::db::{init_schema, open_sqlite_connection, read_schema_version};
use blood_bank_console::engine::time_math::date_start;
use blood_bank_console::engine::{AppointmentForm, PatientForm};
use blood_bank_console::{
    logging, AppointmentStatus, AppointmentType, BloodType, RequestStatus, APP_NAME, VERSION,
};

#[derive(Parser)]
#[command(name = "blood-bank-console", version)]
#[command(about = "血库记录管理控制台 - 库存与献血资格管理")]
struct Cli {
    /// 数据库文件路径
    #[arg(long, global = true, env = "BLOOD_BANK_DB_PATH")]
    db: Option<String>,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 引擎阈值配置
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    #[command(flatten)]
    Records(RecordCommands),
}

/// 需要完整 AppState 的命令
#[derive(Subcommand)]
enum RecordCommands {
    /// 初始化数据库（幂等）
    Init,
    /// 驾驶舱指标与血型库存卡片
    Dashboard,
    /// 血液单元列表（附效期等级）
    Inventory {
        /// 只输出血型库存卡片
        #[arg(long)]
        cards: bool,
        /// 效期参考日期（默认当前时刻）
        #[arg(long)]
        at: Option<NaiveDate>,
    },
    /// 献血者列表
    Donors {
        /// 只列出可预约献血者
        #[arg(long)]
        eligible: bool,
        /// 检索词（姓名 / 血型 / 电话）
        #[arg(long)]
        search: Option<String>,
    },
    /// 患者列表
    Patients {
        /// 检索词（姓名 / 患者编号 / 电话）
        #[arg(long)]
        search: Option<String>,
    },
    /// 登记患者
    RegisterPatient {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        patient_id: Option<String>,
        #[arg(long)]
        blood_type: Option<BloodType>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// 出生日期 (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// 预约列表
    Appointments {
        /// 检索词（献血者姓名 / 电话）
        #[arg(long)]
        search: Option<String>,
        /// 状态过滤
        #[arg(long)]
        status: Option<AppointmentStatus>,
    },
    /// 创建预约
    Schedule {
        #[arg(long)]
        donor_id: Option<String>,
        /// 预约日期 (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// 预约时刻 (HH:MM)
        #[arg(long)]
        time: Option<String>,
        #[arg(long = "type", default_value = "donation")]
        appointment_type: AppointmentType,
        #[arg(long)]
        notes: Option<String>,
    },
    /// 用血申请列表
    Requests {
        /// 状态过滤
        #[arg(long)]
        status: Option<RequestStatus>,
    },
    /// 更新用血申请状态
    #[command(name = "request-status")]
    SetRequestStatus {
        id: String,
        status: RequestStatus,
    },
    /// 从 CSV 导入血液单元
    ImportInventory {
        /// CSV 文件路径
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// 查看配置
    Show,
    /// 更新配置
    Set { key: String, value: String },
}

#[derive(Serialize)]
struct InitReport {
    db_path: String,
    schema_version: Option<i64>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_config_api(db_path: &str) -> anyhow::Result<ConfigApi> {
    let conn = open_sqlite_connection(db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    init_schema(&conn)?;
    let manager = ConfigManager::from_connection(Arc::new(Mutex::new(conn)))?;
    Ok(ConfigApi::new(Arc::new(manager)))
}

fn run_config(db_path: &str, command: ConfigCommands) -> anyhow::Result<()> {
    let config_api = open_config_api(db_path)?;
    match command {
        ConfigCommands::Show => print_json(&config_api.show()?),
        ConfigCommands::Set { key, value } => print_json(&config_api.set(&key, &value)?),
    }
}

fn run(state: &AppState, command: RecordCommands) -> anyhow::Result<()> {
    match command {
        RecordCommands::Init => {
            let conn = open_sqlite_connection(&state.db_path)?;
            print_json(&InitReport {
                db_path: state.db_path.clone(),
                schema_version: read_schema_version(&conn)?,
            })
        }
        RecordCommands::Dashboard => print_json(&state.dashboard_api.get_dashboard()?),
        RecordCommands::Inventory { cards, at } => {
            if cards {
                print_json(&state.inventory_api.stock_cards()?)
            } else {
                let reference = at
                    .map(date_start)
                    .unwrap_or_else(|| Local::now().naive_local());
                print_json(&state.inventory_api.list_units(reference)?)
            }
        }
        RecordCommands::Donors { eligible, search } => {
            print_json(&state.donor_api.list(search.as_deref(), eligible)?)
        }
        RecordCommands::Patients { search } => {
            print_json(&state.patient_api.list(search.as_deref())?)
        }
        RecordCommands::RegisterPatient {
            full_name,
            patient_id,
            blood_type,
            phone,
            email,
            address,
            date_of_birth,
            notes,
        } => {
            let form = PatientForm {
                full_name,
                patient_id,
                blood_type,
                phone,
                email,
                address,
                date_of_birth,
                medical_notes: notes,
            };
            print_json(&state.patient_api.register(&form)?)
        }
        RecordCommands::Appointments { search, status } => {
            print_json(&state.appointment_api.list(search.as_deref(), status)?)
        }
        RecordCommands::Schedule {
            donor_id,
            date,
            time,
            appointment_type,
            notes,
        } => {
            let form = AppointmentForm {
                donor_id,
                date,
                time,
                appointment_type,
                notes,
            };
            print_json(&state.appointment_api.schedule(&form)?)
        }
        RecordCommands::Requests { status } => print_json(&state.request_api.list(status)?),
        RecordCommands::SetRequestStatus { id, status } => {
            print_json(&state.request_api.set_status(&id, status)?)
        }
        RecordCommands::ImportInventory { path } => {
            print_json(&state.inventory_api.import_csv(&path)?)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    let db_path = cli.db.unwrap_or_else(get_default_db_path);
    tracing::debug!("{} v{} 使用数据库: {}", APP_NAME, VERSION, db_path);

    match cli.command {
        // 配置命令不依赖 AppState,现有配置无效时仍可修正
        Commands::Config { command } => run_config(&db_path, command),
        Commands::Records(command) => {
            let state = AppState::new(db_path.clone())
                .with_context(|| format!("无法初始化应用状态: {}", db_path))?;
            run(&state, command)
        }
    }
}
