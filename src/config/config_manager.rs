// ==========================================
// 光伏安装分组引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、环境变量覆写
// 存储: JSON 文件; 文件缺失时使用默认值
// ==========================================

use crate::config::planning_config::{PlanningConfig, SUPPORTED_LOCALES};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置键（环境变量名）
pub mod config_keys {
    pub const CAPACITY_CEILING_KW: &str = "SOLAR_BATCHING_CAPACITY_CEILING_KW";
    pub const LOCALE: &str = "SOLAR_BATCHING_LOCALE";
}

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("solar-install-batching").join("config.json"))
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PlanningConfig,
    source_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用给定配置（会校验）
    pub fn from_config(config: PlanningConfig) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self {
            config,
            source_path: None,
        })
    }

    /// 从 JSON 文件加载配置
    ///
    /// - 文件不存在 → 默认配置
    /// - 文件存在但无法解析 → ConfigError::Parse
    /// - 之后应用环境变量覆写并校验
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str::<PlanningConfig>(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?
        } else {
            tracing::info!(path = %path.display(), "配置文件不存在,使用默认配置");
            PlanningConfig::default()
        };

        let config = apply_overrides(config, |key| std::env::var(key).ok())?;
        validate(&config)?;

        tracing::debug!(
            ceiling_kw = config.residential_capacity_ceiling_kw,
            locale = %config.locale,
            "配置已加载"
        );

        Ok(Self {
            config,
            source_path: Some(path.to_path_buf()),
        })
    }

    /// 从默认路径加载; 无法确定配置目录时使用默认配置
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) => Self::load(&path),
            None => {
                tracing::warn!("无法确定系统配置目录,使用默认配置");
                let config = apply_overrides(PlanningConfig::default(), |key| std::env::var(key).ok())?;
                Self::from_config(config)
            }
        }
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// 应用配置中的界面语言
    pub fn apply_locale(&self) {
        crate::i18n::set_locale(&self.config.locale);
    }
}

/// 应用覆写值（`lookup` 按配置键返回覆写值）
pub fn apply_overrides<F>(mut config: PlanningConfig, lookup: F) -> Result<PlanningConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(config_keys::CAPACITY_CEILING_KW) {
        let value = raw.trim().parse::<f64>().map_err(|e| ConfigError::InvalidValue {
            key: config_keys::CAPACITY_CEILING_KW.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        })?;
        config.residential_capacity_ceiling_kw = value;
    }

    if let Some(raw) = lookup(config_keys::LOCALE) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            config.locale = trimmed.to_string();
        }
    }

    Ok(config)
}

fn validate(config: &PlanningConfig) -> Result<(), ConfigError> {
    let ceiling = config.residential_capacity_ceiling_kw;
    if !ceiling.is_finite() || ceiling <= 0.0 {
        return Err(ConfigError::InvalidValue {
            key: "residential_capacity_ceiling_kw".to_string(),
            value: ceiling.to_string(),
            message: "容量上限必须为正数".to_string(),
        });
    }

    if !SUPPORTED_LOCALES.contains(&config.locale.as_str()) {
        return Err(ConfigError::InvalidValue {
            key: "locale".to_string(),
            value: config.locale.clone(),
            message: format!("仅支持 {}", SUPPORTED_LOCALES.join("/")),
        });
    }

    Ok(())
}
