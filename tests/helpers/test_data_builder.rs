// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use solar_install_batching::domain::{Classification, Project, ProjectCatalog, ProjectId};
use std::sync::Arc;

// ==========================================
// Project 构建器
// ==========================================

pub struct ProjectBuilder {
    id: String,
    capacity_kw: f64,
    classification: Classification,
    district: String,
    category: Option<String>,
    sub_type: Option<String>,
    due_date: NaiveDate,
    installation_cost: Option<f64>,
    name: Option<String>,
}

impl ProjectBuilder {
    pub fn residential(id: &str, capacity_kw: f64) -> Self {
        Self::new(id, capacity_kw, Classification::Residential)
    }

    pub fn commercial(id: &str, capacity_kw: f64) -> Self {
        Self::new(id, capacity_kw, Classification::Commercial)
    }

    pub fn new(id: &str, capacity_kw: f64, classification: Classification) -> Self {
        Self {
            id: id.to_string(),
            capacity_kw,
            classification,
            district: "Pune".to_string(),
            category: None,
            sub_type: None,
            due_date: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
            installation_cost: None,
            name: None,
        }
    }

    pub fn district(mut self, district: &str) -> Self {
        self.district = district.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn sub_type(mut self, sub_type: &str) -> Self {
        self.sub_type = Some(sub_type.to_string());
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = date;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.installation_cost = Some(cost);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn build(self) -> Project {
        Project {
            id: ProjectId::new(self.id),
            capacity_kw: self.capacity_kw,
            classification: self.classification,
            district: self.district,
            category: self.category,
            sub_type: self.sub_type,
            due_date: self.due_date,
            // 默认每 kW 50,000
            installation_cost: self.installation_cost.unwrap_or(self.capacity_kw * 50_000.0),
            name: self.name,
            service: Some(self.classification.keyword().to_string()),
        }
    }
}

// ==========================================
// 目录辅助函数
// ==========================================

pub fn catalog_of(projects: Vec<Project>) -> Arc<ProjectCatalog> {
    Arc::new(ProjectCatalog::new(projects).expect("测试目录 id 重复"))
}

pub fn pid(raw: &str) -> ProjectId {
    ProjectId::new(raw)
}
