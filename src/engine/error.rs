// ==========================================
// 光伏安装分组引擎 - 引擎层错误类型
// ==========================================
// 职责: 选择拒绝原因、分组校验失败原因
// 说明: 均为可预期、可恢复的返回值,由调用方展示给操作员
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::project::ProjectId;
use crate::domain::types::Classification;
use crate::i18n::t_with_args;
use thiserror::Error;

// ==========================================
// SelectionRejection - 选择拒绝原因
// ==========================================

/// toggle 被拒绝的原因（选择状态保持不变）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionRejection {
    /// 住宅与商业互斥
    #[error("住宅与商业项目不能混选: project_id={project_id}, 已选分类={selected}")]
    MixedClassification {
        project_id: ProjectId,
        selected: Classification,
    },

    /// 住宅容量超限
    #[error("住宅容量超限: project_id={project_id}, 预期总容量={prospective_kw:.2}kW, 上限={ceiling_kw:.2}kW")]
    CapacityExceeded {
        project_id: ProjectId,
        prospective_kw: f64,
        ceiling_kw: f64,
    },

    /// 恢复的选择快照不是合法的 toggle 结果（重复、未知 id、多个商业项目）
    #[error("选择快照无效: project_id={project_id}")]
    InvalidSnapshot { project_id: ProjectId },
}

impl SelectionRejection {
    /// 稳定的原因代码（供前端/日志使用）
    pub fn code(&self) -> &'static str {
        match self {
            SelectionRejection::MixedClassification { .. } => "MIXED_CLASSIFICATION",
            SelectionRejection::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            SelectionRejection::InvalidSnapshot { .. } => "INVALID_SNAPSHOT",
        }
    }

    /// 面向操作员的本地化提示
    pub fn localized_message(&self) -> String {
        match self {
            SelectionRejection::MixedClassification {
                project_id,
                selected,
            } => t_with_args(
                "selection.mixed_classification",
                &[
                    ("project_id", project_id.as_str()),
                    ("selected", selected.keyword()),
                ],
            ),
            SelectionRejection::CapacityExceeded {
                prospective_kw,
                ceiling_kw,
                ..
            } => t_with_args(
                "selection.capacity_exceeded",
                &[
                    ("prospective_kw", &format!("{:.2}", prospective_kw)),
                    ("ceiling_kw", &format!("{:.2}", ceiling_kw)),
                ],
            ),
            SelectionRejection::InvalidSnapshot { project_id } => t_with_args(
                "selection.invalid_snapshot",
                &[("project_id", project_id.as_str())],
            ),
        }
    }
}

pub type SelectionResult<T> = Result<T, SelectionRejection>;

// ==========================================
// GroupValidationError - 分组校验失败
// ==========================================

/// create_group 校验失败原因（按校验顺序排列）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupValidationError {
    #[error("安装组名称不能为空")]
    EmptyName,

    #[error("未选择任何项目")]
    EmptySelection,

    #[error("商业项目超过 1 个: count={count}")]
    TooManyCommercial { count: usize },

    #[error("住宅与商业项目混选: residential={residential_count}, commercial={commercial_count}")]
    MixedClassification {
        residential_count: usize,
        commercial_count: usize,
    },

    #[error("住宅容量超限: total={total_kw:.2}kW, 上限={ceiling_kw:.2}kW")]
    CapacityExceeded { total_kw: f64, ceiling_kw: f64 },
}

impl GroupValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            GroupValidationError::EmptyName => "EMPTY_NAME",
            GroupValidationError::EmptySelection => "EMPTY_SELECTION",
            GroupValidationError::TooManyCommercial { .. } => "TOO_MANY_COMMERCIAL",
            GroupValidationError::MixedClassification { .. } => "MIXED_CLASSIFICATION",
            GroupValidationError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
        }
    }

    pub fn localized_message(&self) -> String {
        match self {
            GroupValidationError::EmptyName => t_with_args("group.empty_name", &[]),
            GroupValidationError::EmptySelection => t_with_args("group.empty_selection", &[]),
            GroupValidationError::TooManyCommercial { count } => {
                t_with_args("group.too_many_commercial", &[("count", &count.to_string())])
            }
            GroupValidationError::MixedClassification { .. } => {
                t_with_args("group.mixed_classification", &[])
            }
            GroupValidationError::CapacityExceeded {
                total_kw,
                ceiling_kw,
            } => t_with_args(
                "group.capacity_exceeded",
                &[
                    ("total_kw", &format!("{:.2}", total_kw)),
                    ("ceiling_kw", &format!("{:.2}", ceiling_kw)),
                ],
            ),
        }
    }
}

pub type GroupResult<T> = Result<T, GroupValidationError>;
