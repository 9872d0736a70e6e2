// ==========================================
// 光伏安装分组引擎 - 导入模块错误类型
// ==========================================
// 说明: 加载边界快速失败,不把不明确的数据传入核心引擎
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::catalog::CatalogError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.json）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    // ===== 数据映射错误 =====
    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 YYYY-MM-DD 或 YYYYMMDD，实际 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 数据质量错误 =====
    #[error("主键缺失 (行 {0}): project_id 为空")]
    PrimaryKeyMissing(usize),

    #[error("必填字段缺失 (行 {row}): {field}")]
    RequiredFieldMissing { row: usize, field: String },

    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} {message}")]
    ValueRangeError {
        row: usize,
        field: String,
        value: f64,
        message: String,
    },

    #[error("无法识别项目分类 (行 {row}): 服务描述 \"{service}\" 不含 Residential/Commercial")]
    UnknownClassification { row: usize, service: String },

    #[error("项目分类不明确 (行 {row}): 服务描述 \"{service}\" 同时包含 Residential 与 Commercial")]
    AmbiguousClassification { row: usize, service: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
