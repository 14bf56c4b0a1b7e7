// ==========================================
// 血库记录管理控制台 - 库存 CSV 导入器
// ==========================================
// 列: blood_type, quantity_ml, collection_date, expiry_date[, status]
// 流程: 解析 → 逐行映射校验 → 全部通过后逐条写入
// 红线: 任一行校验失败,整个文件拒绝导入,不写入任何记录
// 说明: 行校验复用快照转换规则（血型枚举、整数非负数量、
//       YYYY-MM-DD 日期、失效晚于采集）
// ==========================================

use crate::domain::raw::RawBloodUnit;
use crate::domain::{NewBloodUnit, AVAILABLE_STATUS};
use crate::engine::snapshot;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, RawRow};
use crate::repository::RecordStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// 必需列
pub const REQUIRED_COLUMNS: [&str; 4] =
    ["blood_type", "quantity_ml", "collection_date", "expiry_date"];

/// 导入结果汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub source: String,
    pub imported: usize,
    pub total_quantity_ml: u64,
    pub unit_ids: Vec<String>,
}

// ==========================================
// 行映射
// ==========================================

fn cell<'a>(
    row: usize,
    values: &'a HashMap<String, String>,
    field: &str,
) -> ImportResult<&'a str> {
    match values.get(field).map(String::as_str) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ImportError::EmptyField {
            row,
            field: field.to_string(),
        }),
    }
}

/// 单行 → 血液单元草稿
pub fn map_row(row: usize, values: &HashMap<String, String>) -> ImportResult<NewBloodUnit> {
    let raw = RawBloodUnit {
        id: format!("row-{}", row),
        blood_type: cell(row, values, "blood_type")?.to_string(),
        quantity_ml: cell(row, values, "quantity_ml")?.to_string(),
        collection_date: cell(row, values, "collection_date")?.to_string(),
        expiry_date: cell(row, values, "expiry_date")?.to_string(),
        status: values
            .get("status")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| AVAILABLE_STATUS.to_string()),
    };

    let checked =
        snapshot::blood_unit(raw).map_err(|source| ImportError::InvalidRecord { row, source })?;

    Ok(NewBloodUnit {
        blood_type: checked.blood_type,
        quantity_ml: checked.quantity_ml,
        collection_date: checked.collection_date,
        expiry_date: checked.expiry_date,
        status: checked.status,
    })
}

/// 全部行映射,遇到第一条失败即返回
pub fn map_rows(headers: &[String], rows: &[RawRow]) -> ImportResult<Vec<NewBloodUnit>> {
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == *col))
    {
        return Err(ImportError::MissingColumn(missing.to_string()));
    }

    rows.iter().map(|(row, values)| map_row(*row, values)).collect()
}

// ==========================================
// InventoryImporter - 库存导入器
// ==========================================
pub struct InventoryImporter {
    store: Arc<dyn RecordStore>,
    parser: CsvParser,
}

impl InventoryImporter {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            parser: CsvParser,
        }
    }

    /// 导入 CSV 文件
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn import_file(&self, path: &Path) -> ImportResult<ImportSummary> {
        let (headers, rows) = self.parser.parse_file(path)?;
        let drafts = map_rows(&headers, &rows)?;
        self.persist(path.display().to_string(), &drafts)
    }

    fn persist(&self, source: String, drafts: &[NewBloodUnit]) -> ImportResult<ImportSummary> {
        let mut unit_ids = Vec::with_capacity(drafts.len());
        let mut total_quantity_ml = 0u64;

        for draft in drafts {
            let saved = self.store.insert_blood_unit(draft)?;
            total_quantity_ml += u64::from(draft.quantity_ml);
            unit_ids.push(saved.id);
        }

        info!(
            source = %source,
            imported = unit_ids.len(),
            total_quantity_ml,
            "库存导入完成"
        );

        Ok(ImportSummary {
            source,
            imported: unit_ids.len(),
            total_quantity_ml,
            unit_ids,
        })
    }
}
