// ==========================================
// 光伏安装分组引擎 - 筛选引擎
// ==========================================
// 职责: 按类别/容量档位/子类型/区县聚焦收窄项目目录
// 输入: 项目目录 + 筛选条件
// 输出: 筛选后的项目视图（保持目录顺序）
// 红线: 纯函数,无副作用; 空结果是合法输出
// ==========================================

use crate::domain::catalog::ProjectCatalog;
use crate::domain::project::{District, Project};
use crate::domain::types::{CapacityBand, Classification};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::instrument;

// ==========================================
// 筛选条件
// ==========================================

/// 区县聚焦（操作员点击某个区县 × 分类汇总卡片）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistrictFocus {
    pub district: String,
    pub classification: Classification,
}

impl DistrictFocus {
    pub fn new(district: impl Into<String>, classification: Classification) -> Self {
        Self {
            district: district.into(),
            classification,
        }
    }
}

/// 筛选条件
///
/// 各字段相互独立,存在的字段按 AND 组合,缺省字段不施加约束
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub capacity_band: Option<CapacityBand>,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub district_focus: Option<DistrictFocus>,
}

impl FilterCriteria {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_capacity_band(mut self, band: CapacityBand) -> Self {
        self.capacity_band = Some(band);
        self
    }

    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    pub fn with_district_focus(mut self, focus: DistrictFocus) -> Self {
        self.district_focus = Some(focus);
        self
    }

    /// 是否未设置任何条件
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none()
            && self.capacity_band.is_none()
            && self.sub_type.is_none()
            && self.district_focus.is_none()
    }
}

// ==========================================
// 区县汇总卡片
// ==========================================

/// 区县 × 分类 汇总卡片（区县聚焦条件的来源）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictCard {
    pub district: String,
    /// 展示名称; 宿主未提供区县信息时等于 `district`
    pub display_name: String,
    pub classification: Classification,
    pub project_count: usize,
    pub total_capacity_kw: f64,
    pub overdue_count: usize,
}

impl DistrictCard {
    /// 点击卡片对应的聚焦条件
    pub fn focus(&self) -> DistrictFocus {
        DistrictFocus::new(self.district.clone(), self.classification)
    }
}

// ==========================================
// FilterEngine - 筛选引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// 按条件筛选目录
    #[instrument(skip(self, catalog), fields(catalog_size = catalog.len()))]
    pub fn filter<'a>(
        &self,
        catalog: &'a ProjectCatalog,
        criteria: &FilterCriteria,
    ) -> Vec<&'a Project> {
        let matched: Vec<&Project> = catalog
            .iter()
            .filter(|project| self.matches(project, criteria))
            .collect();

        tracing::debug!(matched = matched.len(), "筛选完成");
        matched
    }

    /// 单个项目是否满足全部条件
    pub fn matches(&self, project: &Project, criteria: &FilterCriteria) -> bool {
        if let Some(category) = &criteria.category {
            if project.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(band) = criteria.capacity_band {
            if !band.contains(project.capacity_kw) {
                return false;
            }
        }

        if let Some(sub_type) = &criteria.sub_type {
            if project.sub_type.as_deref() != Some(sub_type.as_str()) {
                return false;
            }
        }

        if let Some(focus) = &criteria.district_focus {
            if project.district != focus.district
                || project.classification != focus.classification
            {
                return false;
            }
        }

        true
    }

    /// 生成区县汇总卡片（按区县名、分类排序）
    pub fn district_cards<'a, I>(&self, projects: I, today: NaiveDate) -> Vec<DistrictCard>
    where
        I: IntoIterator<Item = &'a Project>,
    {
        let mut cards: BTreeMap<(String, Classification), DistrictCard> = BTreeMap::new();

        for project in projects {
            let card = cards
                .entry((project.district.clone(), project.classification))
                .or_insert_with(|| DistrictCard {
                    district: project.district.clone(),
                    display_name: project.district.clone(),
                    classification: project.classification,
                    project_count: 0,
                    total_capacity_kw: 0.0,
                    overdue_count: 0,
                });

            card.project_count += 1;
            card.total_capacity_kw += project.capacity_kw;
            if project.is_overdue(today) {
                card.overdue_count += 1;
            }
        }

        cards.into_values().collect()
    }

    /// 用宿主提供的区县信息填充卡片展示名称（按 id 匹配）
    pub fn name_districts(&self, cards: &mut [DistrictCard], districts: &[District]) {
        let names: HashMap<&str, &str> = districts
            .iter()
            .map(|d| (d.id.as_str(), d.name.as_str()))
            .collect();

        for card in cards.iter_mut() {
            if let Some(name) = names.get(card.district.as_str()) {
                card.display_name = name.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ProjectId;

    fn project(
        id: &str,
        kw: f64,
        classification: Classification,
        district: &str,
        category: &str,
        sub_type: &str,
    ) -> Project {
        Project {
            id: ProjectId::new(id),
            capacity_kw: kw,
            classification,
            district: district.to_string(),
            category: Some(category.to_string()),
            sub_type: Some(sub_type.to_string()),
            due_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            installation_cost: kw * 50_000.0,
            name: None,
            service: None,
        }
    }

    fn catalog() -> ProjectCatalog {
        ProjectCatalog::new(vec![
            project("R1", 3.0, Classification::Residential, "Pune", "Rooftop", "OnGrid"),
            project("R2", 8.0, Classification::Residential, "Pune", "Rooftop", "Hybrid"),
            project("R3", 12.0, Classification::Residential, "Nagpur", "Ground", "OnGrid"),
            project("C1", 14.0, Classification::Commercial, "Pune", "Rooftop", "OnGrid"),
        ])
        .unwrap()
    }

    fn ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_all() {
        let catalog = catalog();
        let result = FilterEngine::new().filter(&catalog, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["R1", "R2", "R3", "C1"]);
    }

    #[test]
    fn test_criteria_are_combined_with_and() {
        let catalog = catalog();
        let criteria = FilterCriteria::default()
            .with_category("Rooftop")
            .with_sub_type("OnGrid");

        let result = FilterEngine::new().filter(&catalog, &criteria);
        assert_eq!(ids(&result), vec!["R1", "C1"]);

        let criteria = criteria.with_capacity_band(CapacityBand::From11To15);
        let result = FilterEngine::new().filter(&catalog, &criteria);
        assert_eq!(ids(&result), vec!["C1"]);
    }

    #[test]
    fn test_district_focus_matches_district_and_class() {
        let catalog = catalog();
        let criteria = FilterCriteria::default()
            .with_district_focus(DistrictFocus::new("Pune", Classification::Residential));

        let result = FilterEngine::new().filter(&catalog, &criteria);
        assert_eq!(ids(&result), vec!["R1", "R2"]);
    }

    #[test]
    fn test_no_match_is_valid() {
        let catalog = catalog();
        let criteria = FilterCriteria::default().with_category("Carport");
        assert!(FilterEngine::new().filter(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_district_cards() {
        let catalog = catalog();
        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let cards = FilterEngine::new().district_cards(catalog.iter(), today);

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].district, "Nagpur");
        assert_eq!(cards[1].district, "Pune");
        assert_eq!(cards[1].classification, Classification::Residential);
        assert_eq!(cards[1].project_count, 2);
        assert_eq!(cards[1].total_capacity_kw, 11.0);
        assert_eq!(cards[1].overdue_count, 2);
        assert_eq!(
            cards[2].focus(),
            DistrictFocus::new("Pune", Classification::Commercial)
        );
    }

    #[test]
    fn test_name_districts() {
        let catalog = catalog();
        let engine = FilterEngine::new();
        let mut cards = engine.district_cards(catalog.iter(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        engine.name_districts(
            &mut cards,
            &[District {
                id: "Pune".to_string(),
                name: "Pune (पुणे)".to_string(),
            }],
        );

        assert_eq!(cards[0].display_name, "Nagpur");
        assert_eq!(cards[1].display_name, "Pune (पुणे)");
        assert_eq!(cards[2].display_name, "Pune (पुणे)");
    }
}
