// ==========================================
// 光伏安装分组引擎 - 选择汇总
// ==========================================
// 职责: 聚合器输出（随选择变化实时重算）
// ==========================================

use serde::{Deserialize, Serialize};

/// 当前选择的汇总统计
///
/// 一致性: total_capacity_kw = residential_capacity_kw + commercial_capacity_kw,
/// total_projects = residential_count + commercial_count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub total_projects: usize,
    pub total_capacity_kw: f64,
    pub total_installation_cost: f64,

    pub residential_count: usize,
    pub residential_capacity_kw: f64,

    pub commercial_count: usize,
    pub commercial_capacity_kw: f64,

    /// 已逾期项目数
    pub overdue_count: usize,
}

impl SelectionSummary {
    pub fn is_empty(&self) -> bool {
        self.total_projects == 0
    }
}
