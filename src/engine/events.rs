// ==========================================
// 光伏安装分组引擎 - 规划事件发布
// ==========================================
// 职责: 定义规划会话事件发布 trait
// 说明: 宿主 UI / 地图图层实现订阅者,引擎不依赖任何渲染技术
// ==========================================

use crate::domain::project::ProjectId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 规划事件类型
// ==========================================

/// 规划事件触发类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanningEventType {
    /// 选择变更（toggle 成功）
    SelectionChanged,
    /// 选择被清空（筛选变化 / 分组创建）
    SelectionCleared,
    /// 筛选条件变更
    FilterChanged,
    /// 安装组已创建
    GroupCreated,
}

impl PlanningEventType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            PlanningEventType::SelectionChanged => "SelectionChanged",
            PlanningEventType::SelectionCleared => "SelectionCleared",
            PlanningEventType::FilterChanged => "FilterChanged",
            PlanningEventType::GroupCreated => "GroupCreated",
        }
    }
}

/// 规划事件
///
/// 携带事件发生后的选中 id 集合,供地图标记等外部图层同步
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningEvent {
    /// 会话 ID
    pub session_id: String,
    /// 事件类型
    pub event_type: PlanningEventType,
    /// 事件后的选中项目
    pub selected_ids: Vec<ProjectId>,
    /// 事件后的筛选视图大小
    pub visible_count: usize,
    /// 新建安装组 ID（仅 GroupCreated）
    pub group_id: Option<String>,
}

impl PlanningEvent {
    pub fn new(
        session_id: String,
        event_type: PlanningEventType,
        selected_ids: Vec<ProjectId>,
        visible_count: usize,
    ) -> Self {
        Self {
            session_id,
            event_type,
            selected_ids,
            visible_count,
            group_id: None,
        }
    }

    pub fn with_group_id(mut self, group_id: String) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 规划事件发布者 Trait
///
/// 发布失败只记录日志,不回滚会话状态
pub trait PlanningEventPublisher: Send + Sync {
    fn publish(&self, event: PlanningEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
///
/// 用于不需要事件发布的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl PlanningEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: PlanningEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - session_id={}, event_type={}",
            event.session_id,
            event.event_type.as_str()
        );
        Ok(())
    }
}

/// 可选的事件发布者包装
///
/// 简化 Option<Arc<dyn PlanningEventPublisher>> 的使用
#[derive(Clone)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn PlanningEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn PlanningEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者）; 失败时记录警告
    pub fn publish(&self, event: PlanningEvent) {
        let Some(publisher) = &self.inner else {
            return;
        };

        let event_type = event.event_type;
        if let Err(e) = publisher.publish(event) {
            tracing::warn!(
                event_type = event_type.as_str(),
                error = %e,
                "规划事件发布失败"
            );
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for OptionalEventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionalEventPublisher")
            .field("configured", &self.is_configured())
            .finish()
    }
}
