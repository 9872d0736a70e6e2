// ==========================================
// 光伏安装分组引擎 - 领域类型定义
// ==========================================
// 职责: 项目分类、容量档位等封闭枚举
// 红线: 分类是二值封闭枚举,不允许"既是又是"或"都不是"
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 项目分类 (Classification)
// ==========================================
// 红线: 同一安装组内住宅与商业互斥
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Residential, // 住宅
    Commercial,  // 商业
}

impl Classification {
    /// 服务描述中用于识别分类的关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            Classification::Residential => "Residential",
            Classification::Commercial => "Commercial",
        }
    }

    pub fn is_commercial(&self) -> bool {
        matches!(self, Classification::Commercial)
    }

    pub fn is_residential(&self) -> bool {
        matches!(self, Classification::Residential)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Residential => write!(f, "RESIDENTIAL"),
            Classification::Commercial => write!(f, "COMMERCIAL"),
        }
    }
}

// ==========================================
// 容量档位 (Capacity Band)
// ==========================================
// 固定档位集合,边界为闭区间:
// - 1–5kW:   1.0 <= c <= 5.0
// - 5–10kW:  5.0 <= c <= 10.0
// - 11–15kW: 11.0 <= c <= 15.0
// 说明: 10~11kW 之间的项目不落入任何档位,只在未按档位筛选时可见
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityBand {
    #[serde(rename = "1-5kW")]
    From1To5,
    #[serde(rename = "5-10kW")]
    From5To10,
    #[serde(rename = "11-15kW")]
    From11To15,
}

impl CapacityBand {
    /// 全部档位（按容量升序）
    pub const ALL: [CapacityBand; 3] = [
        CapacityBand::From1To5,
        CapacityBand::From5To10,
        CapacityBand::From11To15,
    ];

    /// 档位边界 (min_kw, max_kw),闭区间
    pub fn bounds_kw(&self) -> (f64, f64) {
        match self {
            CapacityBand::From1To5 => (1.0, 5.0),
            CapacityBand::From5To10 => (5.0, 10.0),
            CapacityBand::From11To15 => (11.0, 15.0),
        }
    }

    /// 判断容量是否落入档位
    pub fn contains(&self, capacity_kw: f64) -> bool {
        let (min_kw, max_kw) = self.bounds_kw();
        capacity_kw >= min_kw && capacity_kw <= max_kw
    }

    /// 档位标签（与前端下拉框一致）
    pub fn label(&self) -> &'static str {
        match self {
            CapacityBand::From1To5 => "1-5kW",
            CapacityBand::From5To10 => "5-10kW",
            CapacityBand::From11To15 => "11-15kW",
        }
    }

    /// 从标签解析档位
    ///
    /// 同时接受连字符 `-` 与短破折号 `–`,忽略大小写与空白
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .replace('\u{2013}', "-")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        CapacityBand::ALL
            .into_iter()
            .find(|band| band.label().to_lowercase() == normalized)
    }
}

impl fmt::Display for CapacityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_band_bounds_are_inclusive() {
        assert!(CapacityBand::From1To5.contains(1.0));
        assert!(CapacityBand::From1To5.contains(5.0));
        assert!(CapacityBand::From5To10.contains(5.0));
        assert!(!CapacityBand::From5To10.contains(10.5));
        assert!(!CapacityBand::From11To15.contains(10.5));
        assert!(CapacityBand::From11To15.contains(15.0));
        assert!(!CapacityBand::From11To15.contains(15.1));
    }

    #[test]
    fn test_capacity_band_from_label() {
        assert_eq!(CapacityBand::from_label("1-5kW"), Some(CapacityBand::From1To5));
        assert_eq!(CapacityBand::from_label(" 5–10kw "), Some(CapacityBand::From5To10));
        assert_eq!(CapacityBand::from_label("11 - 15 kW"), Some(CapacityBand::From11To15));
        assert_eq!(CapacityBand::from_label("20-25kW"), None);
    }

    #[test]
    fn test_classification_display() {
        assert_eq!(Classification::Residential.to_string(), "RESIDENTIAL");
        assert_eq!(Classification::Commercial.to_string(), "COMMERCIAL");
        assert!(Classification::Commercial.is_commercial());
        assert!(!Classification::Commercial.is_residential());
    }
}
