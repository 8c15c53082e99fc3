// ==========================================
// Smart Vista 能源与OEE仪表盘 - 节能目标实体
// ==========================================
// 职责: 节能目标记录 (基线值 + 当前值)
// 达成率 = (基线 - 当前) / 基线 × 100
// 红线: 基线为 0 时必须报告目标无效, 禁止除零
// ==========================================

use crate::domain::types::CarrierId;
use serde::{Deserialize, Serialize};

// ==========================================
// EnergyGoal - 节能目标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyGoal {
    /// 目标标识（如 "G1"）
    pub id: String,
    /// 关联产线的双语名称
    pub line_fa: String,
    pub line_en: String,
    /// 关联的能源载体（目标百分比从配置按载体读取）
    pub carrier: CarrierId,
    /// 基线用量
    pub baseline: f64,
    /// 当前用量
    pub current: f64,
}

impl EnergyGoal {
    pub fn new(
        id: &str,
        line_fa: &str,
        line_en: &str,
        carrier: CarrierId,
        baseline: f64,
        current: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            line_fa: line_fa.to_string(),
            line_en: line_en.to_string(),
            carrier,
            baseline,
            current,
        }
    }
}
