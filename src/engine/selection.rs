// ==========================================
// 光伏安装分组引擎 - 选择状态机
// ==========================================
// 职责: 维护当前选中项目集合,在每次 toggle 时强制约束
// 红线A: 住宅与商业互斥
// 红线B: 商业项目最多 1 个
// 红线C: 纯住宅选择的总容量 <= 上限（默认 25 kW）
// 说明: 拒绝是普通返回值,被拒绝时状态不变
// ==========================================

use crate::domain::capacity::{
    kw_to_watts, watts_to_kw, CapacityConstraint, ResidentialCapacityPool,
    DEFAULT_RESIDENTIAL_CEILING_KW,
};
use crate::domain::catalog::ProjectCatalog;
use crate::domain::project::{Project, ProjectId};
use crate::domain::types::Classification;
use crate::engine::error::{SelectionRejection, SelectionResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// toggle 成功后的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleOutcome {
    /// 新增选中
    Selected(ProjectId),
    /// 取消选中
    Deselected(ProjectId),
    /// 商业项目替换: 原选择被整体替换为仅含新项目的单元素集合
    Replaced {
        selected: ProjectId,
        previous: Vec<ProjectId>,
    },
}

// ==========================================
// SelectionStateMachine - 选择状态机
// ==========================================
// 只能序列化; 从快照恢复必须经过 `restore` 重放校验
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionStateMachine {
    selected: Vec<ProjectId>, // 保持选择顺序
    has_commercial_selected: bool,
    has_residential_selected: bool,
    ceiling_kw: f64,
}

impl Default for SelectionStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_RESIDENTIAL_CEILING_KW)
    }
}

impl SelectionStateMachine {
    /// 创建空选择
    ///
    /// # 参数
    /// - `ceiling_kw`: 纯住宅选择的容量上限
    pub fn new(ceiling_kw: f64) -> Self {
        Self {
            selected: Vec::new(),
            has_commercial_selected: false,
            has_residential_selected: false,
            ceiling_kw,
        }
    }

    /// 从已保存的选中 id 列表恢复选择
    ///
    /// 按顺序重放 toggle,每一步都必须是新增选中;
    /// 重复 id、未知 id、第二个商业项目（toggle 会替换）均视为无效快照
    pub fn restore(
        ids: &[ProjectId],
        catalog: &ProjectCatalog,
        ceiling_kw: f64,
    ) -> SelectionResult<Self> {
        let mut machine = Self::new(ceiling_kw);

        for id in ids {
            if !catalog.contains(id) {
                return Err(machine.reject(SelectionRejection::InvalidSnapshot {
                    project_id: id.clone(),
                }));
            }

            match machine.toggle(catalog, id)? {
                ToggleOutcome::Selected(_) => {}
                ToggleOutcome::Deselected(_) | ToggleOutcome::Replaced { .. } => {
                    return Err(machine.reject(SelectionRejection::InvalidSnapshot {
                        project_id: id.clone(),
                    }));
                }
            }
        }

        Ok(machine)
    }

    // ==========================================
    // 状态查询
    // ==========================================

    pub fn selected_ids(&self) -> &[ProjectId] {
        &self.selected
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn has_commercial_selected(&self) -> bool {
        self.has_commercial_selected
    }

    pub fn has_residential_selected(&self) -> bool {
        self.has_residential_selected
    }

    pub fn ceiling_kw(&self) -> f64 {
        self.ceiling_kw
    }

    /// 已选住宅项目总容量
    ///
    /// # Panics
    /// 已选 id 不在目录中（调用方与目录不同步）
    pub fn residential_capacity_kw(&self, catalog: &ProjectCatalog) -> f64 {
        let watts: i64 = self
            .selected
            .iter()
            .map(|id| lookup(catalog, id))
            .filter(|project| project.is_residential())
            .map(|project| kw_to_watts(project.capacity_kw))
            .sum();
        watts_to_kw(watts)
    }

    /// 住宅剩余可选容量（已选商业项目时为 0）
    pub fn remaining_capacity_kw(&self, catalog: &ProjectCatalog) -> f64 {
        if self.has_commercial_selected {
            return 0.0;
        }
        self.capacity_pool(catalog).remaining_capacity_kw()
    }

    fn capacity_pool(&self, catalog: &ProjectCatalog) -> ResidentialCapacityPool {
        ResidentialCapacityPool::new(self.ceiling_kw, self.residential_capacity_kw(catalog))
    }

    // ==========================================
    // 状态迁移
    // ==========================================

    /// 切换项目的选中状态
    ///
    /// # 规则（按顺序）
    /// 1. 已选中 → 移除,重算标志,总是成功
    /// 2. 商业项目:
    ///    - 已选住宅 → 拒绝 MixedClassification
    ///    - 已选商业 → 整体替换为 {该项目}
    ///    - 否则加入
    /// 3. 住宅项目:
    ///    - 已选商业 → 拒绝 MixedClassification
    ///    - 已选住宅容量 + 该项目容量 > 上限 → 拒绝 CapacityExceeded
    ///    - 否则加入
    ///
    /// # Panics
    /// `id` 不在目录中（调用方与目录不同步,属于编程错误）
    #[instrument(skip(self, catalog), fields(project_id = %id, selected = self.selected.len()))]
    pub fn toggle(
        &mut self,
        catalog: &ProjectCatalog,
        id: &ProjectId,
    ) -> SelectionResult<ToggleOutcome> {
        let project = lookup(catalog, id);

        // 规则 1: 取消选中
        if self.contains(id) {
            self.selected.retain(|selected| selected != id);
            self.recompute_flags(catalog);
            tracing::debug!("取消选中");
            return Ok(ToggleOutcome::Deselected(id.clone()));
        }

        let outcome = match project.classification {
            // 规则 2: 商业项目
            Classification::Commercial => {
                if self.has_residential_selected {
                    return Err(self.reject(SelectionRejection::MixedClassification {
                        project_id: id.clone(),
                        selected: Classification::Residential,
                    }));
                }

                if self.has_commercial_selected {
                    let previous = std::mem::replace(&mut self.selected, vec![id.clone()]);
                    ToggleOutcome::Replaced {
                        selected: id.clone(),
                        previous,
                    }
                } else {
                    self.selected.push(id.clone());
                    ToggleOutcome::Selected(id.clone())
                }
            }

            // 规则 3: 住宅项目
            Classification::Residential => {
                if self.has_commercial_selected {
                    return Err(self.reject(SelectionRejection::MixedClassification {
                        project_id: id.clone(),
                        selected: Classification::Commercial,
                    }));
                }

                let pool = self.capacity_pool(catalog);
                if !pool.can_add(project.capacity_kw) {
                    return Err(self.reject(SelectionRejection::CapacityExceeded {
                        project_id: id.clone(),
                        prospective_kw: pool.prospective_kw(project.capacity_kw),
                        ceiling_kw: self.ceiling_kw,
                    }));
                }

                self.selected.push(id.clone());
                ToggleOutcome::Selected(id.clone())
            }
        };

        self.recompute_flags(catalog);
        tracing::debug!(outcome = ?outcome, "选择已更新");
        Ok(outcome)
    }

    /// 候选项目当前是否可选（不修改状态）
    ///
    /// - 已选中的项目总是可选（允许取消）
    /// - 商业项目: 仅在已选住宅时不可选
    /// - 住宅项目: 已选商业,或加入后超过容量上限时不可选
    ///
    /// # Panics
    /// `id` 不在目录中
    pub fn is_selectable(&self, catalog: &ProjectCatalog, id: &ProjectId) -> bool {
        let project = lookup(catalog, id);

        if self.contains(id) {
            return true;
        }

        match project.classification {
            Classification::Commercial => !self.has_residential_selected,
            Classification::Residential => {
                !self.has_commercial_selected
                    && self.capacity_pool(catalog).can_add(project.capacity_kw)
            }
        }
    }

    /// 重置为初始状态（分组创建成功或筛选条件变化后）
    pub fn reset(&mut self) {
        self.selected.clear();
        self.has_commercial_selected = false;
        self.has_residential_selected = false;
    }

    fn recompute_flags(&mut self, catalog: &ProjectCatalog) {
        let commercial_count = self
            .selected
            .iter()
            .filter(|id| lookup(catalog, id).is_commercial())
            .count();

        self.has_commercial_selected = commercial_count == 1;
        self.has_residential_selected = self
            .selected
            .iter()
            .any(|id| lookup(catalog, id).is_residential());
    }

    fn reject(&self, rejection: SelectionRejection) -> SelectionRejection {
        tracing::debug!(code = rejection.code(), reason = %rejection, "选择被拒绝");
        rejection
    }
}

/// 按 id 查找项目,不存在即视为调用方与目录不同步
pub(crate) fn lookup<'a>(catalog: &'a ProjectCatalog, id: &ProjectId) -> &'a Project {
    match catalog.get(id) {
        Some(project) => project,
        None => {
            tracing::error!(project_id = %id, "项目不在目录中,调用方状态不同步");
            panic!("项目不在目录中: project_id={}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn project(id: &str, kw: f64, classification: Classification) -> Project {
        Project {
            id: ProjectId::new(id),
            capacity_kw: kw,
            classification,
            district: "Pune".to_string(),
            category: None,
            sub_type: None,
            due_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            installation_cost: kw * 40_000.0,
            name: None,
            service: None,
        }
    }

    fn catalog() -> ProjectCatalog {
        ProjectCatalog::new(vec![
            project("R10", 10.0, Classification::Residential),
            project("R12", 12.0, Classification::Residential),
            project("R5", 5.0, Classification::Residential),
            project("R3", 3.0, Classification::Residential),
            project("CA", 40.0, Classification::Commercial),
            project("CB", 60.0, Classification::Commercial),
        ])
        .unwrap()
    }

    fn id(raw: &str) -> ProjectId {
        ProjectId::new(raw)
    }

    #[test]
    fn test_initial_state() {
        let machine = SelectionStateMachine::default();
        assert!(machine.is_empty());
        assert!(!machine.has_commercial_selected());
        assert!(!machine.has_residential_selected());
        assert_eq!(machine.ceiling_kw(), 25.0);
    }

    #[test]
    fn test_residential_then_commercial_is_rejected() {
        let catalog = catalog();
        let mut machine = SelectionStateMachine::default();

        assert_eq!(
            machine.toggle(&catalog, &id("R10")),
            Ok(ToggleOutcome::Selected(id("R10")))
        );
        assert!(machine.has_residential_selected());

        let err = machine.toggle(&catalog, &id("CA")).unwrap_err();
        assert_eq!(
            err,
            SelectionRejection::MixedClassification {
                project_id: id("CA"),
                selected: Classification::Residential,
            }
        );
        assert_eq!(machine.selected_ids(), &[id("R10")]);
    }

    #[test]
    fn test_commercial_then_residential_is_rejected() {
        let catalog = catalog();
        let mut machine = SelectionStateMachine::default();

        machine.toggle(&catalog, &id("CA")).unwrap();
        let err = machine.toggle(&catalog, &id("R3")).unwrap_err();
        assert_eq!(err.code(), "MIXED_CLASSIFICATION");
        assert_eq!(machine.selected_ids(), &[id("CA")]);
    }

    #[test]
    fn test_capacity_exceeded_reports_prospective_total() {
        let catalog = catalog();
        let mut machine = SelectionStateMachine::default();

        machine.toggle(&catalog, &id("R10")).unwrap();
        machine.toggle(&catalog, &id("R12")).unwrap();
        assert_eq!(machine.residential_capacity_kw(&catalog), 22.0);

        let err = machine.toggle(&catalog, &id("R5")).unwrap_err();
        match err {
            SelectionRejection::CapacityExceeded {
                prospective_kw,
                ceiling_kw,
                ..
            } => {
                assert_eq!(prospective_kw, 27.0);
                assert_eq!(ceiling_kw, 25.0);
            }
            other => panic!("unexpected rejection: {:?}", other),
        }
        assert_eq!(machine.residential_capacity_kw(&catalog), 22.0);
        assert_eq!(machine.remaining_capacity_kw(&catalog), 3.0);

        // 3 kW 恰好填满上限
        assert!(machine.toggle(&catalog, &id("R3")).is_ok());
        assert_eq!(machine.residential_capacity_kw(&catalog), 25.0);
    }

    #[test]
    fn test_commercial_swap_replaces_selection() {
        let catalog = catalog();
        let mut machine = SelectionStateMachine::default();

        machine.toggle(&catalog, &id("CA")).unwrap();
        let outcome = machine.toggle(&catalog, &id("CB")).unwrap();

        assert_eq!(
            outcome,
            ToggleOutcome::Replaced {
                selected: id("CB"),
                previous: vec![id("CA")],
            }
        );
        assert_eq!(machine.selected_ids(), &[id("CB")]);
        assert!(machine.has_commercial_selected());
    }

    #[test]
    fn test_deselect_recomputes_flags() {
        let catalog = catalog();
        let mut machine = SelectionStateMachine::default();

        machine.toggle(&catalog, &id("CA")).unwrap();
        assert_eq!(
            machine.toggle(&catalog, &id("CA")),
            Ok(ToggleOutcome::Deselected(id("CA")))
        );
        assert!(!machine.has_commercial_selected());

        // 取消商业后可以选住宅
        assert!(machine.toggle(&catalog, &id("R5")).is_ok());
    }

    #[test]
    fn test_is_selectable_mirrors_toggle() {
        let catalog = catalog();
        let mut machine = SelectionStateMachine::default();

        assert!(machine.is_selectable(&catalog, &id("CA")));
        assert!(machine.is_selectable(&catalog, &id("R10")));

        machine.toggle(&catalog, &id("R10")).unwrap();
        machine.toggle(&catalog, &id("R12")).unwrap();

        assert!(machine.is_selectable(&catalog, &id("R10")));
        assert!(machine.is_selectable(&catalog, &id("R3")));
        assert!(!machine.is_selectable(&catalog, &id("R5")));
        assert!(!machine.is_selectable(&catalog, &id("CA")));

        machine.reset();
        machine.toggle(&catalog, &id("CA")).unwrap();
        assert!(machine.is_selectable(&catalog, &id("CB")));
        assert!(!machine.is_selectable(&catalog, &id("R3")));
        assert_eq!(machine.remaining_capacity_kw(&catalog), 0.0);
    }

    #[test]
    #[should_panic(expected = "项目不在目录中")]
    fn test_unknown_project_panics() {
        let catalog = catalog();
        let mut machine = SelectionStateMachine::default();
        let _ = machine.toggle(&catalog, &id("GHOST"));
    }

    #[test]
    fn test_restore_replays_valid_snapshot() {
        let catalog = catalog();
        let machine =
            SelectionStateMachine::restore(&[id("R10"), id("R12"), id("R3")], &catalog, 25.0)
                .unwrap();

        assert_eq!(machine.len(), 3);
        assert!(machine.has_residential_selected());
        assert!(!machine.has_commercial_selected());
        assert_eq!(machine.remaining_capacity_kw(&catalog), 0.0);
    }

    #[test]
    fn test_restore_rejects_inconsistent_snapshot() {
        let catalog = catalog();

        let err = SelectionStateMachine::restore(&[id("CA"), id("CB")], &catalog, 25.0).unwrap_err();
        assert_eq!(err, SelectionRejection::InvalidSnapshot { project_id: id("CB") });

        let err = SelectionStateMachine::restore(&[id("CA"), id("R3")], &catalog, 25.0).unwrap_err();
        assert_eq!(err.code(), "MIXED_CLASSIFICATION");

        let err = SelectionStateMachine::restore(&[id("R5"), id("R5")], &catalog, 25.0).unwrap_err();
        assert_eq!(err.code(), "INVALID_SNAPSHOT");

        let err = SelectionStateMachine::restore(&[id("GHOST")], &catalog, 25.0).unwrap_err();
        assert_eq!(err, SelectionRejection::InvalidSnapshot { project_id: id("GHOST") });

        let err = SelectionStateMachine::restore(&[id("R10"), id("R12"), id("R5")], &catalog, 25.0)
            .unwrap_err();
        assert_eq!(err.code(), "CAPACITY_EXCEEDED");
    }
}
