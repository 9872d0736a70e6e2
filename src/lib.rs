// ==========================================
// 光伏安装分组引擎 - 核心库
// ==========================================
// 系统定位: 安装规划页面的决策/状态组件（由宿主 UI 调用）
// 流程: 项目目录 → 筛选 → 选择约束 → 汇总 → 建组
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 约束与聚合
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    CapacityBand, Classification, District, InstallationGroup, Project, ProjectCatalog,
    ProjectId, SelectionSummary,
};

pub use engine::{
    DistrictCard, DistrictFocus, FilterCriteria, FilterEngine, GroupFactory,
    GroupValidationError, PlanningSession, SelectionAggregator, SelectionRejection,
    SelectionStateMachine, ToggleOutcome,
};

pub use config::{ConfigManager, PlanningConfig};
pub use importer::{CatalogLoader, ImportError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "光伏安装分组引擎";
