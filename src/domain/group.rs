// ==========================================
// 光伏安装分组引擎 - 安装组领域模型
// ==========================================
// 职责: 分组工厂产出的不可变安装组快照
// 红线: 创建后不再重算、不再修改; 交由外部派工流程处理
// ==========================================

use crate::domain::project::Project;
use crate::domain::types::Classification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// InstallationGroup - 安装组
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationGroup {
    // ===== 标识 =====
    pub group_id: String,                   // UUID v4
    pub name: String,                       // 操作员命名（已去除首尾空白）

    // ===== 快照 =====
    pub projects: Vec<Project>,             // 按选择顺序
    pub classification: Classification,    // 组内唯一分类

    // ===== 创建时聚合 =====
    pub total_capacity_kw: f64,
    pub total_installation_cost: f64,
    pub districts: Vec<String>,             // 去重,保持首次出现顺序

    pub created_at: DateTime<Utc>,
}

impl InstallationGroup {
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn is_commercial(&self) -> bool {
        self.classification.is_commercial()
    }
}
