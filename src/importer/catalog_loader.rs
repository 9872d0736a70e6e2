// ==========================================
// 光伏安装分组引擎 - 项目目录加载器
// ==========================================
// 职责: 原始行 → 校验 → 不可变项目目录
// 流程: 文件解析 → 字段映射 → 分类派生 → 数据校验 → 目录构建
// 红线: 快速失败,首个非法行即中止加载
// ==========================================

use crate::domain::capacity::normalize_capacity_kw;
use crate::domain::catalog::ProjectCatalog;
use crate::domain::project::{Project, ProjectId, RawProjectRecord};
use crate::importer::derivation::classify_service;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{FileParser, RawRow};
use std::path::Path;
use tracing::instrument;

#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader {
    file_parser: FileParser,
    field_mapper: FieldMapper,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 CSV / JSON 文件加载目录
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_file(&self, path: &Path) -> ImportResult<ProjectCatalog> {
        let rows = self.file_parser.parse_file(path)?;
        let catalog = self.load_rows(&rows)?;
        tracing::info!(projects = catalog.len(), "项目目录加载完成");
        Ok(catalog)
    }

    /// 从行映射加载目录（行号从 2 开始,与带表头的表格一致）
    pub fn load_rows(&self, rows: &[RawRow]) -> ImportResult<ProjectCatalog> {
        let projects = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let record = self.field_mapper.map_to_raw_project(row, idx + 2)?;
                self.validate(record)
            })
            .collect::<ImportResult<Vec<Project>>>()?;

        Ok(ProjectCatalog::new(projects)?)
    }

    /// 校验原始记录并转换为项目
    pub fn validate(&self, record: RawProjectRecord) -> ImportResult<Project> {
        let row = record.row_number;

        let id = record
            .project_id
            .ok_or(ImportError::PrimaryKeyMissing(row))?;

        let service = record.service.ok_or_else(|| required(row, "service"))?;
        let classification = classify_service(&service, row)?;

        let raw_kw = record.capacity_kw.ok_or_else(|| required(row, "capacity_kw"))?;
        // 1 W 分辨率; 不足 0.5 W 的容量视为 0
        let capacity_kw = normalize_capacity_kw(raw_kw);
        if !raw_kw.is_finite() || capacity_kw <= 0.0 {
            return Err(ImportError::ValueRangeError {
                row,
                field: "capacity_kw".to_string(),
                value: raw_kw,
                message: "必须为正数".to_string(),
            });
        }

        let installation_cost = record.installation_cost.unwrap_or(0.0);
        if !installation_cost.is_finite() || installation_cost < 0.0 {
            return Err(ImportError::ValueRangeError {
                row,
                field: "installation_cost".to_string(),
                value: installation_cost,
                message: "不能为负数".to_string(),
            });
        }

        let district = record.district.ok_or_else(|| required(row, "district"))?;
        let due_date = record.due_date.ok_or_else(|| required(row, "due_date"))?;

        Ok(Project {
            id: ProjectId::new(id),
            capacity_kw,
            classification,
            district,
            category: record.category,
            sub_type: record.sub_type,
            due_date,
            installation_cost,
            name: record.name,
            service: Some(service),
        })
    }
}

fn required(row: usize, field: &str) -> ImportError {
    ImportError::RequiredFieldMissing {
        row,
        field: field.to_string(),
    }
}
