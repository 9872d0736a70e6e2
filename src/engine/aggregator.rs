// ==========================================
// 光伏安装分组引擎 - 选择聚合器
// ==========================================
// 职责: 由当前选择推导汇总统计
// 红线: 无状态、纯函数; 空选择输出全零汇总
// ==========================================

use crate::domain::capacity::{kw_to_watts, watts_to_kw};
use crate::domain::catalog::ProjectCatalog;
use crate::domain::project::ProjectId;
use crate::domain::summary::SelectionSummary;
use crate::domain::types::Classification;
use crate::engine::selection::{lookup, SelectionStateMachine};
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionAggregator;

impl SelectionAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 汇总当前选择（逾期判断使用本地当天日期）
    pub fn summarize(
        &self,
        selection: &SelectionStateMachine,
        catalog: &ProjectCatalog,
    ) -> SelectionSummary {
        self.summarize_as_of(selection, catalog, Local::now().date_naive())
    }

    /// 汇总当前选择,逾期以 `today` 为基准
    pub fn summarize_as_of(
        &self,
        selection: &SelectionStateMachine,
        catalog: &ProjectCatalog,
        today: NaiveDate,
    ) -> SelectionSummary {
        self.summarize_ids(selection.selected_ids(), catalog, today)
    }

    /// 汇总任意 id 列表（分组工厂复核时使用）
    ///
    /// # Panics
    /// id 不在目录中
    pub fn summarize_ids(
        &self,
        ids: &[ProjectId],
        catalog: &ProjectCatalog,
        today: NaiveDate,
    ) -> SelectionSummary {
        let mut summary = SelectionSummary::default();
        // 容量按瓦特累加
        let mut residential_w = 0i64;
        let mut commercial_w = 0i64;

        for id in ids {
            let project = lookup(catalog, id);

            summary.total_projects += 1;
            summary.total_installation_cost += project.installation_cost;

            match project.classification {
                Classification::Residential => {
                    summary.residential_count += 1;
                    residential_w += kw_to_watts(project.capacity_kw);
                }
                Classification::Commercial => {
                    summary.commercial_count += 1;
                    commercial_w += kw_to_watts(project.capacity_kw);
                }
            }

            if project.is_overdue(today) {
                summary.overdue_count += 1;
            }
        }

        summary.residential_capacity_kw = watts_to_kw(residential_w);
        summary.commercial_capacity_kw = watts_to_kw(commercial_w);
        summary.total_capacity_kw = watts_to_kw(residential_w + commercial_w);
        summary
    }
}
