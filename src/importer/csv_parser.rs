// ==========================================
// 库存补货决策系统 - CSV 解析器
// ==========================================
// 输出: 按规范化列名索引的原始行
// 列名规范化: 小写，去掉 '_' '-' 空格（productId / product_id 等价）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 原始数据行
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 源文件行号（表头为第 1 行）
    pub row_number: usize,
    /// 规范化列名 → 去空白后的值
    pub values: HashMap<String, String>,
}

impl RawRow {
    /// 取非空值
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .get(&normalize_header(column))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// 列名规范化
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析文件
    pub fn parse_file(&self, path: &Path) -> ImportResult<(Vec<String>, Vec<RawRow>)> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
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

    /// 解析任意输入流
    ///
    /// # 返回
    /// - (规范化表头, 数据行)；完全空白的行被跳过
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<(Vec<String>, Vec<RawRow>)> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(rows.len() + 2);

            let values: HashMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();

            if values.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(RawRow { row_number, values });
        }

        Ok((headers, rows))
    }
}
