// ==========================================
// 光伏安装分组引擎 - 配置层
// ==========================================
// 职责: 规划配置管理（容量上限、界面语言）
// 存储: JSON 文件 + 环境变量覆写
// ==========================================

pub mod config_manager;
pub mod planning_config;

// 重导出核心配置管理器
pub use config_manager::{
    apply_overrides, config_keys, default_config_path, ConfigError, ConfigManager,
};
pub use planning_config::{PlanningConfig, SUPPORTED_LOCALES};
