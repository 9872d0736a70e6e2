// ==========================================
// 光伏安装分组引擎 - 规划会话
// ==========================================
// 职责: 编排 筛选 → 选择 → 汇总 → 建组 的完整交互流程
// 输入: 外部加载完成的项目目录 + 操作员事件
// 输出: 选择状态、汇总、安装组、规划事件
// 红线: 筛选条件每次变化都清空选择; 只允许操作当前筛选视图内的项目
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::catalog::ProjectCatalog;
use crate::domain::group::InstallationGroup;
use crate::domain::project::{District, Project, ProjectId};
use crate::domain::summary::SelectionSummary;
use crate::engine::aggregator::SelectionAggregator;
use crate::engine::error::{GroupResult, SelectionResult};
use crate::engine::events::{
    OptionalEventPublisher, PlanningEvent, PlanningEventPublisher, PlanningEventType,
};
use crate::engine::filter::{DistrictCard, FilterCriteria, FilterEngine};
use crate::engine::group_factory::GroupFactory;
use crate::engine::selection::{SelectionStateMachine, ToggleOutcome};
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

// ==========================================
// PlanningSession - 规划会话
// ==========================================
#[derive(Debug)]
pub struct PlanningSession {
    session_id: String,
    catalog: Arc<ProjectCatalog>,
    criteria: FilterCriteria,
    visible: HashSet<ProjectId>,
    selection: SelectionStateMachine,
    districts: Vec<District>,

    filter_engine: FilterEngine,
    aggregator: SelectionAggregator,
    group_factory: GroupFactory,
    publisher: OptionalEventPublisher,
}

impl PlanningSession {
    /// 打开规划页面: 未筛选视图 + 空选择
    pub fn new(catalog: Arc<ProjectCatalog>, config: &PlanningConfig) -> Self {
        let visible = catalog.iter().map(|p| p.id.clone()).collect();
        let session_id = Uuid::new_v4().to_string();

        tracing::info!(
            session_id = %session_id,
            catalog_size = catalog.len(),
            ceiling_kw = config.residential_capacity_ceiling_kw,
            "规划会话已打开"
        );

        Self {
            session_id,
            catalog,
            criteria: FilterCriteria::default(),
            visible,
            selection: SelectionStateMachine::new(config.residential_capacity_ceiling_kw),
            districts: Vec::new(),
            filter_engine: FilterEngine::new(),
            aggregator: SelectionAggregator::new(),
            group_factory: GroupFactory::new(),
            publisher: OptionalEventPublisher::none(),
        }
    }

    /// 挂载事件订阅者（地图图层 / UI 刷新）
    pub fn with_publisher(mut self, publisher: Arc<dyn PlanningEventPublisher>) -> Self {
        self.publisher = OptionalEventPublisher::with_publisher(publisher);
        self
    }

    /// 挂载宿主提供的区县地理信息（用于卡片展示名称）
    pub fn with_districts(mut self, districts: Vec<District>) -> Self {
        self.districts = districts;
        self
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selection(&self) -> &SelectionStateMachine {
        &self.selection
    }

    pub fn selected_ids(&self) -> &[ProjectId] {
        self.selection.selected_ids()
    }

    /// 当前筛选视图（保持目录顺序）
    pub fn filtered_projects(&self) -> Vec<&Project> {
        self.catalog
            .iter()
            .filter(|p| self.visible.contains(&p.id))
            .collect()
    }

    pub fn is_visible(&self, id: &ProjectId) -> bool {
        self.visible.contains(id)
    }

    /// 全目录的区县汇总卡片
    pub fn district_cards(&self) -> Vec<DistrictCard> {
        self.district_cards_as_of(Local::now().date_naive())
    }

    pub fn district_cards_as_of(&self, today: NaiveDate) -> Vec<DistrictCard> {
        let mut cards = self.filter_engine.district_cards(self.catalog.iter(), today);
        self.filter_engine.name_districts(&mut cards, &self.districts);
        cards
    }

    pub fn summary(&self) -> SelectionSummary {
        self.aggregator.summarize(&self.selection, &self.catalog)
    }

    pub fn summary_as_of(&self, today: NaiveDate) -> SelectionSummary {
        self.aggregator
            .summarize_as_of(&self.selection, &self.catalog, today)
    }

    /// 候选项目当前是否可选
    ///
    /// # Panics
    /// `id` 不在当前筛选视图中
    pub fn is_selectable(&self, id: &ProjectId) -> bool {
        self.ensure_visible(id);
        self.selection.is_selectable(&self.catalog, id)
    }

    /// 住宅剩余可选容量
    pub fn remaining_capacity_kw(&self) -> f64 {
        self.selection.remaining_capacity_kw(&self.catalog)
    }

    // ==========================================
    // 操作
    // ==========================================

    /// 变更筛选条件: 重算视图并清空选择
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.visible = self
            .filter_engine
            .filter(&self.catalog, &criteria)
            .into_iter()
            .map(|p| p.id.clone())
            .collect();
        self.criteria = criteria;

        let had_selection = !self.selection.is_empty();
        self.selection.reset();

        tracing::debug!(visible = self.visible.len(), had_selection, "筛选条件已变更,选择已清空");
        self.emit(PlanningEventType::FilterChanged);
        if had_selection {
            self.emit(PlanningEventType::SelectionCleared);
        }
    }

    /// 清除全部筛选条件
    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// 切换项目的选中状态
    ///
    /// # Panics
    /// `id` 不在当前筛选视图中
    pub fn toggle(&mut self, id: &ProjectId) -> SelectionResult<ToggleOutcome> {
        self.ensure_visible(id);
        let outcome = self.selection.toggle(&self.catalog, id)?;
        self.emit(PlanningEventType::SelectionChanged);
        Ok(outcome)
    }

    /// 以当前选择创建安装组; 成功后选择重置为空
    ///
    /// 成功时依次发布 GroupCreated、SelectionCleared
    pub fn create_group(&mut self, name: &str) -> GroupResult<InstallationGroup> {
        let group = self
            .group_factory
            .commit(name, &mut self.selection, &self.catalog)?;

        let event = self
            .event(PlanningEventType::GroupCreated)
            .with_group_id(group.group_id.clone());
        self.publisher.publish(event);
        self.emit(PlanningEventType::SelectionCleared);

        Ok(group)
    }

    // ==========================================
    // 内部
    // ==========================================

    fn ensure_visible(&self, id: &ProjectId) {
        if !self.visible.contains(id) {
            tracing::error!(
                session_id = %self.session_id,
                project_id = %id,
                "项目不在当前筛选视图中,调用方状态不同步"
            );
            panic!("项目不在当前筛选视图中: project_id={}", id);
        }
    }

    fn event(&self, event_type: PlanningEventType) -> PlanningEvent {
        PlanningEvent::new(
            self.session_id.clone(),
            event_type,
            self.selection.selected_ids().to_vec(),
            self.visible.len(),
        )
    }

    fn emit(&self, event_type: PlanningEventType) {
        self.publisher.publish(self.event(event_type));
    }
}
