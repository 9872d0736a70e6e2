// ==========================================
// 光伏安装分组引擎 - 住宅容量池领域模型
// ==========================================
// 红线: 纯住宅安装组的总容量不得超过上限（默认 25 kW）
// 用途: 选择状态机/分组工厂共用的容量约束检查
// 计量: 容量以整数瓦特累加与比较,kW 仅用于展示
// ==========================================

use serde::{Deserialize, Serialize};

/// 默认住宅容量上限 (kW)
pub const DEFAULT_RESIDENTIAL_CEILING_KW: f64 = 25.0;

/// 每 kW 的瓦特数（容量分辨率为 1 W）
pub const WATTS_PER_KW: f64 = 1000.0;

/// kW → 整数瓦特（四舍五入到 1 W）
pub fn kw_to_watts(kw: f64) -> i64 {
    (kw * WATTS_PER_KW).round() as i64
}

/// 整数瓦特 → kW
pub fn watts_to_kw(watts: i64) -> f64 {
    watts as f64 / WATTS_PER_KW
}

/// 将容量归一到 1 W 分辨率
///
/// 25.0000000009 → 25.0, 10.1 + 14.9 按瓦特累加恰好为 25000 W
pub fn normalize_capacity_kw(kw: f64) -> f64 {
    watts_to_kw(kw_to_watts(kw))
}

// ==========================================
// ResidentialCapacityPool - 住宅容量池
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentialCapacityPool {
    pub ceiling_w: i64, // 容量上限 (W)
    pub used_w: i64,    // 已选住宅容量 (W)
}

impl ResidentialCapacityPool {
    pub fn new(ceiling_kw: f64, used_kw: f64) -> Self {
        Self {
            ceiling_w: kw_to_watts(ceiling_kw),
            used_w: kw_to_watts(used_kw),
        }
    }

    /// 追加一个项目后的预期总容量 (kW)
    pub fn prospective_kw(&self, capacity_kw: f64) -> f64 {
        watts_to_kw(self.used_w + kw_to_watts(capacity_kw))
    }

    pub fn ceiling_kw(&self) -> f64 {
        watts_to_kw(self.ceiling_w)
    }

    pub fn used_kw(&self) -> f64 {
        watts_to_kw(self.used_w)
    }
}

impl Default for ResidentialCapacityPool {
    fn default() -> Self {
        Self::new(DEFAULT_RESIDENTIAL_CEILING_KW, 0.0)
    }
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: 选择状态机 / 分组工厂的容量约束检查接口
pub trait CapacityConstraint {
    /// 检查是否可追加指定容量
    fn can_add(&self, capacity_kw: f64) -> bool;

    /// 检查是否超限
    fn is_overflow(&self) -> bool;

    /// 计算剩余容量
    fn remaining_capacity_kw(&self) -> f64;
}

impl CapacityConstraint for ResidentialCapacityPool {
    /// # 返回
    /// - `true`: 追加后不超过上限（恰好等于上限允许）
    /// - `false`: 追加后严格大于上限
    fn can_add(&self, capacity_kw: f64) -> bool {
        self.used_w + kw_to_watts(capacity_kw) <= self.ceiling_w
    }

    fn is_overflow(&self) -> bool {
        self.used_w > self.ceiling_w
    }

    fn remaining_capacity_kw(&self) -> f64 {
        watts_to_kw((self.ceiling_w - self.used_w).max(0))
    }
}
