// ==========================================
// 光伏安装分组引擎 - 引擎层
// ==========================================
// 职责: 筛选、选择约束、汇总、建组
// 红线: 引擎不做 I/O,所有拒绝都必须输出原因
// ==========================================

pub mod aggregator;
pub mod error;
pub mod events;
pub mod filter;
pub mod group_factory;
pub mod selection;
pub mod session;

// 重导出核心引擎
pub use aggregator::SelectionAggregator;
pub use error::{GroupResult, GroupValidationError, SelectionRejection, SelectionResult};
pub use events::{
    NoOpEventPublisher, OptionalEventPublisher, PlanningEvent, PlanningEventPublisher,
    PlanningEventType,
};
pub use filter::{DistrictCard, DistrictFocus, FilterCriteria, FilterEngine};
pub use group_factory::GroupFactory;
pub use selection::{SelectionStateMachine, ToggleOutcome};
pub use session::PlanningSession;
