// ==========================================
// 光伏安装分组引擎 - 字段映射器
// ==========================================
// 职责: 源字段 → 标准字段映射 + 类型转换
// 说明: 列名比较忽略大小写,支持别名
// ==========================================

use crate::domain::project::RawProjectRecord;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use std::collections::HashMap;

/// 标准字段及其可接受的列名别名
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("project_id", &["project_id", "id", "project_no"]),
    ("name", &["name", "customer_name", "project_name"]),
    ("service", &["service", "service_type", "services"]),
    ("capacity_kw", &["capacity_kw", "capacity", "system_size", "kw"]),
    ("installation_cost", &["installation_cost", "cost", "install_cost"]),
    ("district", &["district", "district_name", "location"]),
    ("category", &["category", "project_category"]),
    ("sub_type", &["sub_type", "subtype", "sub_category"]),
    ("due_date", &["due_date", "installation_date", "deadline"]),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper;

impl FieldMapper {
    pub fn map_to_raw_project(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawProjectRecord> {
        let row = normalize_headers(row);

        Ok(RawProjectRecord {
            project_id: self.get_string(&row, "project_id"),
            name: self.get_string(&row, "name"),
            service: self.get_string(&row, "service"),
            capacity_kw: self.parse_f64(&row, "capacity_kw", row_number)?,
            installation_cost: self.parse_f64(&row, "installation_cost", row_number)?,
            district: self.get_string(&row, "district"),
            category: self.get_string(&row, "category"),
            sub_type: self.get_string(&row, "sub_type"),
            due_date: self.parse_date(&row, "due_date", row_number)?,
            row_number,
        })
    }

    /// 提取字符串字段,依次尝试别名,空白视为缺失
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases = FIELD_ALIASES
            .iter()
            .find(|(field, _)| *field == key)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[]);

        aliases
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 解析浮点数（允许千分位逗号,如 "1,25,000"）
    fn parse_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value
                .replace(',', "")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为数值: {}", value),
                }),
        }
    }

    /// 解析日期（YYYY-MM-DD 或 YYYYMMDD）
    fn parse_date(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(&value, "%Y%m%d"))
                .map(Some)
                .map_err(|_| ImportError::DateFormatError {
                    row: row_number,
                    field: key.to_string(),
                    value: value.clone(),
                }),
        }
    }
}

fn normalize_headers(row: &HashMap<String, String>) -> HashMap<String, String> {
    row.iter()
        .map(|(k, v)| (k.trim().to_lowercase(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_field_mapper_basic() {
        let row = row(&[
            ("Project_ID", "SOL-001"),
            ("Service", "Residential Rooftop"),
            ("System_Size", "4.5"),
            ("Cost", "1,80,000"),
            ("District", " Pune "),
            ("Due_Date", "20260315"),
        ]);

        let record = FieldMapper.map_to_raw_project(&row, 2).unwrap();
        assert_eq!(record.project_id.as_deref(), Some("SOL-001"));
        assert_eq!(record.capacity_kw, Some(4.5));
        assert_eq!(record.installation_cost, Some(180_000.0));
        assert_eq!(record.district.as_deref(), Some("Pune"));
        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2026, 3, 15));
        assert_eq!(record.category, None);
        assert_eq!(record.row_number, 2);
    }

    #[test]
    fn test_field_mapper_type_errors() {
        let err = FieldMapper
            .map_to_raw_project(&row(&[("capacity_kw", "five")]), 7)
            .unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 7, .. }));

        let err = FieldMapper
            .map_to_raw_project(&row(&[("due_date", "15/03/2026")]), 8)
            .unwrap_err();
        assert!(matches!(err, ImportError::DateFormatError { row: 8, .. }));
    }
}
