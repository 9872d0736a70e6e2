// ==========================================
// 光伏安装分组引擎 - 文件解析器
// ==========================================
// 支持: CSV (.csv) / JSON 对象数组 (.json)
// 输出: 表头 → 值 的行映射（值已去除首尾空白）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub type RawRow = HashMap<String, String>;

#[derive(Debug, Clone, Copy, Default)]
pub struct FileParser;

impl FileParser {
    /// 按扩展名解析文件
    pub fn parse_file(&self, path: &Path) -> ImportResult<Vec<RawRow>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => self.parse_csv(std::fs::File::open(path)?),
            "json" => self.parse_json(&std::fs::read_to_string(path)?),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    /// 解析 CSV（首行为表头）
    pub fn parse_csv<R: Read>(&self, reader: R) -> ImportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), value.trim().to_string()))
                .collect();

            // 跳过完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }

    /// 解析 JSON 对象数组; 数值/布尔转为字符串, null 视为缺失
    pub fn parse_json(&self, content: &str) -> ImportResult<Vec<RawRow>> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Array(items) = value else {
            return Err(ImportError::JsonParseError("顶层必须是对象数组".to_string()));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => Ok(map
                    .into_iter()
                    .filter_map(|(key, value)| {
                        let text = match value {
                            Value::Null => return None,
                            Value::String(s) => s.trim().to_string(),
                            other => other.to_string(),
                        };
                        Some((key.trim().to_string(), text))
                    })
                    .collect()),
                _ => Err(ImportError::JsonParseError(format!(
                    "第 {} 个元素不是对象",
                    idx + 1
                ))),
            })
            .collect()
    }
}
