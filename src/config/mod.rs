// ==========================================
// Smart Vista 能源与OEE仪表盘 - 配置层
// ==========================================
// 职责: 引擎的唯一可变输入 (时间范围 + 目标百分比)
// 红线: 配置只能经引擎校验后的 setter 写入,
//       其余组件一律只读
// ==========================================

use crate::domain::types::{CarrierId, TimeframeBucket};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 目标取值范围（与前端滑块一致）
// ==========================================

/// 载体节能目标下限 (%)
pub const CARRIER_TARGET_MIN: f64 = 5.0;
/// 载体节能目标上限 (%)
pub const CARRIER_TARGET_MAX: f64 = 25.0;
/// 产线 OEE 目标下限 (%)
pub const LINE_TARGET_MIN: f64 = 80.0;
/// 产线 OEE 目标上限 (%)
pub const LINE_TARGET_MAX: f64 = 98.0;

// ==========================================
// DashboardConfig - 仪表盘配置
// ==========================================
/// 可变配置实体
///
/// 引擎初始化时以默认值创建, 进程生命周期内不销毁。
/// 字段对外只读; 写入仅通过 `MetricsEngine` 的校验 setter。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// 当前选中的时间范围
    timeframe: TimeframeBucket,
    /// 各载体的节能目标百分比
    carrier_targets: BTreeMap<CarrierId, f64>,
    /// 各产线的 OEE 目标百分比
    line_targets: BTreeMap<String, f64>,
}

impl DashboardConfig {
    /// 以显式初值构造配置
    ///
    /// 取值范围校验在引擎 setter 层执行, 此处不校验;
    /// 测试可以借此构造越界或为零的目标, 覆盖计算层的防御逻辑。
    pub fn new(
        timeframe: TimeframeBucket,
        carrier_targets: BTreeMap<CarrierId, f64>,
        line_targets: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            timeframe,
            carrier_targets,
            line_targets,
        }
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn timeframe(&self) -> TimeframeBucket {
        self.timeframe
    }

    /// 某载体的节能目标（未配置按 0 处理, 由计算层判定目标无效）
    pub fn carrier_target(&self, carrier: CarrierId) -> f64 {
        self.carrier_targets.get(&carrier).copied().unwrap_or(0.0)
    }

    /// 某产线的 OEE 目标
    pub fn line_target(&self, line_id: &str) -> Option<f64> {
        self.line_targets.get(line_id).copied()
    }

    pub fn carrier_targets(&self) -> &BTreeMap<CarrierId, f64> {
        &self.carrier_targets
    }

    pub fn line_targets(&self) -> &BTreeMap<String, f64> {
        &self.line_targets
    }

    // ==========================================
    // 写入（仅限引擎）
    // ==========================================

    pub(crate) fn set_timeframe(&mut self, bucket: TimeframeBucket) {
        self.timeframe = bucket;
    }

    pub(crate) fn set_carrier_target(&mut self, carrier: CarrierId, percent: f64) {
        self.carrier_targets.insert(carrier, percent);
    }

    pub(crate) fn set_line_target(&mut self, line_id: &str, percent: f64) {
        self.line_targets.insert(line_id.to_string(), percent);
    }

    // ==========================================
    // 配置快照
    // ==========================================

    /// 获取配置快照（JSON格式）
    ///
    /// # 用途
    /// - 审计当前生效的目标与时间范围
    /// - 问题排查时还原计算输入
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for DashboardConfig {
    /// 演示版默认配置: 周视图 + 载体目标 {10,8,12} + 产线目标 {92,90,88}
    fn default() -> Self {
        let mut carrier_targets = BTreeMap::new();
        carrier_targets.insert(CarrierId::Electricity, 10.0);
        carrier_targets.insert(CarrierId::Gas, 8.0);
        carrier_targets.insert(CarrierId::Air, 12.0);

        let mut line_targets = BTreeMap::new();
        line_targets.insert("L1".to_string(), 92.0);
        line_targets.insert("L2".to_string(), 90.0);
        line_targets.insert("L3".to_string(), 88.0);

        Self {
            timeframe: TimeframeBucket::Week,
            carrier_targets,
            line_targets,
        }
    }
}
