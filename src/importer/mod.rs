// ==========================================
// 光伏安装分组引擎 - 导入层
// ==========================================
// 职责: 外部项目数据 → 已校验的不可变项目目录
// 说明: 核心引擎只接收本层产出的目录,不感知文件/网络
// ==========================================

pub mod catalog_loader;
pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

pub use catalog_loader::CatalogLoader;
pub use derivation::classify_service;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{FileParser, RawRow};
