use crate::domain::capacity::DEFAULT_RESIDENTIAL_CEILING_KW;
use serde::{Deserialize, Serialize};

/// 支持的界面语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

/// 规划配置（持久化对象）
///
/// 存储位置：JSON 文件（默认 `{config_dir}/solar-install-batching/config.json`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// 纯住宅安装组容量上限（kW）
    #[serde(default = "default_ceiling_kw")]
    pub residential_capacity_ceiling_kw: f64,

    /// 操作员提示语言（en / zh-CN）
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_ceiling_kw() -> f64 {
    DEFAULT_RESIDENTIAL_CEILING_KW
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            residential_capacity_ceiling_kw: default_ceiling_kw(),
            locale: default_locale(),
        }
    }
}
