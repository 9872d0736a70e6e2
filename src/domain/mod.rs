// ==========================================
// 光伏安装分组引擎 - 领域模型层
// ==========================================
// 职责: 定义项目、目录、安装组、汇总等实体与类型
// 红线: 不含加载逻辑,不含引擎逻辑
// ==========================================

pub mod capacity;
pub mod catalog;
pub mod group;
pub mod project;
pub mod summary;
pub mod types;

// 重导出核心类型
pub use capacity::{
    kw_to_watts, normalize_capacity_kw, watts_to_kw, CapacityConstraint, ResidentialCapacityPool,
    DEFAULT_RESIDENTIAL_CEILING_KW,
};
pub use catalog::{CatalogError, ProjectCatalog};
pub use group::InstallationGroup;
pub use project::{District, Project, ProjectId, RawProjectRecord};
pub use summary::SelectionSummary;
pub use types::{CapacityBand, Classification};
