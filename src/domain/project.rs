// ==========================================
// 光伏安装分组引擎 - 项目领域模型
// ==========================================
// 职责: 已签约、未安装的光伏项目（只读）
// 红线: 核心引擎只读取项目,不修改项目
// ==========================================

use crate::domain::types::Classification;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// ProjectId - 项目标识
// ==========================================
// 不透明的稳定标识,替代按名称反复扫描定位项目
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ==========================================
// Project - 光伏项目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    // ===== 主键 =====
    pub id: ProjectId,

    // ===== 约束维度 =====
    pub capacity_kw: f64,                 // 装机容量 (kW), > 0
    pub classification: Classification,   // 住宅/商业

    // ===== 筛选维度（不参与约束） =====
    pub district: String,                 // 所在区县
    pub category: Option<String>,         // 项目类别
    pub sub_type: Option<String>,         // 子类型

    // ===== 时间 / 费用 =====
    pub due_date: NaiveDate,              // 约定安装日期
    pub installation_cost: f64,           // 安装费用, >= 0

    // ===== 展示信息 =====
    pub name: Option<String>,             // 客户/项目名称
    pub service: Option<String>,          // 原始服务描述
}

impl Project {
    /// 是否逾期（仅比较日期,不含时刻）
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }

    pub fn is_commercial(&self) -> bool {
        self.classification.is_commercial()
    }

    pub fn is_residential(&self) -> bool {
        self.classification.is_residential()
    }
}

// ==========================================
// District - 区县（外部提供的地理信息）
// ==========================================
// 区县身份对核心引擎而言是不透明键
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
}

// ==========================================
// RawProjectRecord - 原始项目记录（加载边界）
// ==========================================
// 分类尚未派生,所有字段均可能缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProjectRecord {
    pub project_id: Option<String>,
    pub name: Option<String>,
    pub service: Option<String>, // 自由文本,需包含 Residential 或 Commercial
    pub capacity_kw: Option<f64>,
    pub installation_cost: Option<f64>,
    pub district: Option<String>,
    pub category: Option<String>,
    pub sub_type: Option<String>,
    pub due_date: Option<NaiveDate>,

    // 元信息
    pub row_number: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(due_date: NaiveDate) -> Project {
        Project {
            id: ProjectId::new("P-001"),
            capacity_kw: 5.0,
            classification: Classification::Residential,
            district: "Pune".to_string(),
            category: None,
            sub_type: None,
            due_date,
            installation_cost: 250_000.0,
            name: None,
            service: None,
        }
    }

    #[test]
    fn test_is_overdue_is_date_only() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        assert!(sample(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()).is_overdue(today));
        // 当天到期不算逾期
        assert!(!sample(today).is_overdue(today));
        assert!(!sample(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap()).is_overdue(today));
    }

    #[test]
    fn test_project_id_display() {
        let id = ProjectId::from("SOL-42");
        assert_eq!(id.to_string(), "SOL-42");
        assert_eq!(id.as_str(), "SOL-42");
    }
}
