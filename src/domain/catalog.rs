// ==========================================
// 光伏安装分组引擎 - 项目目录
// ==========================================
// 职责: 外部加载完成的项目快照（arena + id 索引）
// 红线: 目录不可变; 项目 id 必须唯一
// ==========================================

use crate::domain::capacity::normalize_capacity_kw;
use crate::domain::project::{Project, ProjectId};
use std::collections::HashMap;
use thiserror::Error;

/// 目录构建错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("项目 id 重复: {0}")]
    DuplicateProjectId(ProjectId),
}

// ==========================================
// ProjectCatalog - 项目目录
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
    index: HashMap<ProjectId, usize>,
}

impl ProjectCatalog {
    /// 由项目列表构建目录,保持输入顺序; 容量归一到 1 W 分辨率
    pub fn new(mut projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(projects.len());
        for (pos, project) in projects.iter_mut().enumerate() {
            project.capacity_kw = normalize_capacity_kw(project.capacity_kw);
            if index.insert(project.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateProjectId(project.id.clone()));
            }
        }

        Ok(Self { projects, index })
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.index.get(id).map(|&pos| &self.projects[pos])
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
