// ==========================================
// Smart Vista 能源与OEE仪表盘 - 聚合节点
// ==========================================
// 职责: 将选中时间范围的周期序列归并为各载体用量合计
// 输入: 周期序列 (Raw Data Store)
// 输出: 各载体用量合计 + 周期总成本 + 全载体总用量
// 红线: 本节点不做任何舍入, 精确求和
// ==========================================

use crate::domain::types::{CarrierId, TimeframeBucket};
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::DatasetRepository;
use serde::{Deserialize, Serialize};

// ==========================================
// 输出类型
// ==========================================

/// 单载体的用量合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierTotal {
    pub carrier: CarrierId,
    /// 选中时间范围内的用量合计（kWh 当量, 未舍入）
    pub volume: f64,
}

/// 聚合节点输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationTotals {
    /// 各载体合计（载体声明顺序）
    pub totals: Vec<CarrierTotal>,
    /// 周期自带成本字段的合计（数据源口径, 不经电价推导）
    pub period_cost: f64,
    /// 全载体总用量
    pub total_volume: f64,
}

impl AggregationTotals {
    /// 查询某载体的合计用量
    pub fn volume(&self, carrier: CarrierId) -> f64 {
        self.totals
            .iter()
            .find(|t| t.carrier == carrier)
            .map(|t| t.volume)
            .unwrap_or(0.0)
    }
}

// ==========================================
// 节点计算
// ==========================================

/// 聚合计算
///
/// # 参数
/// - `store`: 只读数据仓储
/// - `bucket`: 选中的时间范围
///
/// # 返回
/// - `Ok(AggregationTotals)`: 聚合结果
/// - `Err(InvalidConfig)`: 时间范围在数据集中不存在
pub(crate) fn compute(
    store: &DatasetRepository,
    bucket: TimeframeBucket,
) -> EngineResult<AggregationTotals> {
    let periods = store.timeline(bucket).ok_or_else(|| {
        EngineError::invalid_config(format!("时间范围无数据: {}", bucket))
    })?;

    let totals: Vec<CarrierTotal> = store
        .carriers()
        .iter()
        .map(|meta| CarrierTotal {
            carrier: meta.carrier,
            volume: periods.iter().map(|p| p.volume(meta.carrier)).sum(),
        })
        .collect();

    let period_cost = periods.iter().map(|p| p.cost).sum();
    let total_volume = totals.iter().map(|t| t.volume).sum();

    Ok(AggregationTotals {
        totals,
        period_cost,
        total_volume,
    })
}
