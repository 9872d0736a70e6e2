// ==========================================
// 光伏安装分组引擎 - 分组工厂
// ==========================================
// 职责: 按完整约束集校验命名分组,通过后产出不可变安装组
// 输入: 组名 + 当前选择 + 项目目录
// 输出: InstallationGroup 或 GroupValidationError
// 红线: 不信任调用方状态,重新推导汇总后复核全部约束
// ==========================================

use crate::domain::capacity::{CapacityConstraint, ResidentialCapacityPool};
use crate::domain::catalog::ProjectCatalog;
use crate::domain::group::InstallationGroup;
use crate::domain::project::{Project, ProjectId};
use crate::domain::types::Classification;
use crate::engine::aggregator::SelectionAggregator;
use crate::engine::error::{GroupResult, GroupValidationError};
use crate::engine::selection::{lookup, SelectionStateMachine};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct GroupFactory {
    aggregator: SelectionAggregator,
}

impl GroupFactory {
    pub fn new() -> Self {
        Self {
            aggregator: SelectionAggregator::new(),
        }
    }

    /// 校验并创建安装组（不修改选择）
    ///
    /// 返回 Ok 时,调用方必须把选择重置为初始状态;
    /// [`GroupFactory::commit`] 会代为完成重置
    pub fn create_group(
        &self,
        name: &str,
        selection: &SelectionStateMachine,
        catalog: &ProjectCatalog,
    ) -> GroupResult<InstallationGroup> {
        self.build(
            name,
            selection.selected_ids(),
            catalog,
            selection.ceiling_kw(),
            Utc::now(),
        )
    }

    /// 校验并创建安装组,成功后重置选择; 失败时选择保持不变
    pub fn commit(
        &self,
        name: &str,
        selection: &mut SelectionStateMachine,
        catalog: &ProjectCatalog,
    ) -> GroupResult<InstallationGroup> {
        let group = self.create_group(name, selection, catalog)?;
        selection.reset();
        Ok(group)
    }

    /// 按 id 列表构建安装组
    ///
    /// # 校验顺序
    /// 1. 组名去空白后非空 → EmptyName
    /// 2. 选择非空 → EmptySelection
    /// 3. 商业项目 <= 1 → TooManyCommercial
    /// 4. 住宅与商业不混选 → MixedClassification
    /// 5. 纯住宅容量 <= 上限 → CapacityExceeded
    ///
    /// # Panics
    /// id 不在目录中
    #[instrument(skip(self, ids, catalog), fields(selected = ids.len()))]
    pub fn build(
        &self,
        name: &str,
        ids: &[ProjectId],
        catalog: &ProjectCatalog,
        ceiling_kw: f64,
        created_at: DateTime<Utc>,
    ) -> GroupResult<InstallationGroup> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.fail(GroupValidationError::EmptyName));
        }

        if ids.is_empty() {
            return Err(self.fail(GroupValidationError::EmptySelection));
        }

        let summary = self
            .aggregator
            .summarize_ids(ids, catalog, created_at.date_naive());

        if summary.commercial_count > 1 {
            return Err(self.fail(GroupValidationError::TooManyCommercial {
                count: summary.commercial_count,
            }));
        }

        if summary.commercial_count > 0 && summary.residential_count > 0 {
            return Err(self.fail(GroupValidationError::MixedClassification {
                residential_count: summary.residential_count,
                commercial_count: summary.commercial_count,
            }));
        }

        let pool = ResidentialCapacityPool::new(ceiling_kw, summary.residential_capacity_kw);
        if summary.residential_count > 0 && pool.is_overflow() {
            return Err(self.fail(GroupValidationError::CapacityExceeded {
                total_kw: summary.residential_capacity_kw,
                ceiling_kw,
            }));
        }

        let projects: Vec<Project> = ids.iter().map(|id| lookup(catalog, id).clone()).collect();

        let mut districts: Vec<String> = Vec::new();
        for project in &projects {
            if !districts.contains(&project.district) {
                districts.push(project.district.clone());
            }
        }

        let classification = if summary.commercial_count > 0 {
            Classification::Commercial
        } else {
            Classification::Residential
        };

        let group = InstallationGroup {
            group_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            projects,
            classification,
            total_capacity_kw: summary.total_capacity_kw,
            total_installation_cost: summary.total_installation_cost,
            districts,
            created_at,
        };

        tracing::info!(
            group_id = %group.group_id,
            name = %group.name,
            classification = %group.classification,
            projects = group.projects.len(),
            total_capacity_kw = group.total_capacity_kw,
            "安装组已创建"
        );

        Ok(group)
    }

    fn fail(&self, error: GroupValidationError) -> GroupValidationError {
        tracing::debug!(code = error.code(), reason = %error, "安装组校验失败");
        error
    }
}
