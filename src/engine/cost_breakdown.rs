// ==========================================
// Smart Vista 能源与OEE仪表盘 - 成本拆解节点
// ==========================================
// 职责: 基于聚合用量与载体电价推导各载体成本与占比
// 依赖: 聚合节点输出
// 舍入: 成本 2 位小数, 占比 1 位小数
// ==========================================

use crate::domain::types::CarrierId;
use crate::engine::aggregation::AggregationTotals;
use crate::engine::error::EngineResult;
use crate::engine::numeric::round_to;
use crate::repository::DatasetRepository;
use serde::{Deserialize, Serialize};

// ==========================================
// 输出类型
// ==========================================

/// 单载体的成本拆解行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierCost {
    pub carrier: CarrierId,
    /// 聚合用量（未舍入）
    pub volume: f64,
    /// 推导成本 = 用量 x 电价, 2 位小数
    pub cost: f64,
    /// 占推导总成本的百分比, 1 位小数
    pub share_pct: f64,
}

/// 成本拆解节点输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// 各载体成本行（载体声明顺序）
    pub items: Vec<CarrierCost>,
    /// 推导总成本（各载体舍入后成本之和）
    pub derived_total: f64,
}

impl CostBreakdown {
    pub fn item(&self, carrier: CarrierId) -> Option<&CarrierCost> {
        self.items.iter().find(|c| c.carrier == carrier)
    }
}

// ==========================================
// 节点计算
// ==========================================

/// 成本拆解计算
///
/// # 参数
/// - `store`: 只读数据仓储（提供电价）
/// - `agg`: 上游聚合结果
///
/// # 返回
/// - `Ok(CostBreakdown)`: 各载体成本与占比
pub(crate) fn compute(
    store: &DatasetRepository,
    agg: &AggregationTotals,
) -> EngineResult<CostBreakdown> {
    let mut items: Vec<CarrierCost> = agg
        .totals
        .iter()
        .map(|total| {
            let tariff = store.tariff(total.carrier);
            CarrierCost {
                carrier: total.carrier,
                volume: total.volume,
                cost: round_to(total.volume * tariff, 2),
                share_pct: 0.0,
            }
        })
        .collect();

    let derived_total: f64 = items.iter().map(|c| c.cost).sum();

    // 总成本为零时占比全部置 0, 避免除零
    if derived_total > 0.0 {
        for item in items.iter_mut() {
            item.share_pct = round_to(item.cost / derived_total * 100.0, 1);
        }
    }

    Ok(CostBreakdown {
        items,
        derived_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TimeframeBucket;
    use crate::engine::aggregation;

    #[test]
    fn test_week_derived_costs() {
        let store = DatasetRepository::demo();
        let agg = aggregation::compute(&store, TimeframeBucket::Week).unwrap();
        let breakdown = compute(&store, &agg).unwrap();

        // 8105 x 0.12 = 972.6
        assert_eq!(breakdown.item(CarrierId::Electricity).unwrap().cost, 972.6);
        // 4245 x 0.08 = 339.6
        assert_eq!(breakdown.item(CarrierId::Gas).unwrap().cost, 339.6);
        // 1575 x 0.05 = 78.75
        assert_eq!(breakdown.item(CarrierId::Air).unwrap().cost, 78.75);

        assert!((breakdown.derived_total - 1390.95).abs() < 1e-9);
    }

    #[test]
    fn test_shares_sum_near_hundred() {
        let store = DatasetRepository::demo();
        let agg = aggregation::compute(&store, TimeframeBucket::Week).unwrap();
        let breakdown = compute(&store, &agg).unwrap();

        // 占比基于推导总成本, 各约 69.9 / 24.4 / 5.7
        assert_eq!(breakdown.item(CarrierId::Electricity).unwrap().share_pct, 69.9);
        assert_eq!(breakdown.item(CarrierId::Gas).unwrap().share_pct, 24.4);
        assert_eq!(breakdown.item(CarrierId::Air).unwrap().share_pct, 5.7);

        let sum: f64 = breakdown.items.iter().map(|c| c.share_pct).sum();
        assert!((sum - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_zero_total_no_division() {
        let store = DatasetRepository::demo();
        let agg = AggregationTotals {
            totals: vec![
                aggregation::CarrierTotal {
                    carrier: CarrierId::Electricity,
                    volume: 0.0,
                },
                aggregation::CarrierTotal {
                    carrier: CarrierId::Gas,
                    volume: 0.0,
                },
            ],
            period_cost: 0.0,
            total_volume: 0.0,
        };
        let breakdown = compute(&store, &agg).unwrap();

        assert_eq!(breakdown.derived_total, 0.0);
        for item in &breakdown.items {
            assert_eq!(item.share_pct, 0.0);
        }
    }
}
