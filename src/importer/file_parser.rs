// ==========================================
// 血库记录管理控制台 - 文件解析器
// ==========================================
// 支持: CSV (.csv)
// 输出: 带行号的 表头 → 单元格 映射（已去除首尾空白）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 一行原始记录: (文件行号, 表头 → 值)
pub type RawRow = (usize, HashMap<String, String>);

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文件
    pub fn parse_file(&self, path: &Path) -> ImportResult<(Vec<String>, Vec<RawRow>)> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }

    /// 从任意输入流解析
    pub fn parse_reader<R: Read>(&self, input: R) -> ImportResult<(Vec<String>, Vec<RawRow>)> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(input);

        // 读取表头（统一小写）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_idx + 2);

            let mut row_map = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push((line, row_map));
        }

        Ok((headers, rows))
    }
}
