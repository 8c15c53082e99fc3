// ==========================================
// Smart Vista 能源与OEE仪表盘 - 预警节点
// ==========================================
// 职责: 汇总能耗超标与 OEE 不达标预警
// 规则: 能耗合计 > 基线 x (1 - 目标/100) 触发高级预警
//       产线 OEE < 目标值 触发中级预警
// 顺序: 先载体声明顺序, 后产线声明顺序, 结果确定
// ==========================================

use crate::config::DashboardConfig;
use crate::domain::types::{AlertCategory, AlertSeverity, CarrierId};
use crate::engine::aggregation::AggregationTotals;
use crate::engine::error::EngineResult;
use crate::engine::oee_score::OeeScoreBoard;
use crate::i18n::{current_locale, t_with_args};
use crate::repository::DatasetRepository;
use serde::{Deserialize, Serialize};

// ==========================================
// 输出类型
// ==========================================

/// 单条预警
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub category: AlertCategory,
    pub severity: AlertSeverity,
    /// 触发实体: 载体标识或产线标识
    pub entity: String,
    pub label_fa: String,
    pub label_en: String,
    /// 实测值: 能耗合计或产线 OEE
    pub measured: f64,
    /// 触发阈值: 允许能耗上限或 OEE 目标
    pub threshold: f64,
}

impl Alert {
    /// 按当前语言环境生成预警文案
    pub fn message(&self) -> String {
        let label = if current_locale() == "fa" {
            self.label_fa.as_str()
        } else {
            self.label_en.as_str()
        };
        match self.category {
            AlertCategory::Energy => {
                t_with_args("alerts.energy_above_target", &[("carrier", label)])
            }
            AlertCategory::Effectiveness => {
                t_with_args("alerts.oee_below_target", &[("line", label)])
            }
        }
    }
}

// ==========================================
// 节点计算
// ==========================================

/// 载体允许能耗上限
fn allowed_volume(baseline: f64, target_pct: f64) -> f64 {
    baseline * (1.0 - target_pct / 100.0)
}

/// 预警汇总计算
///
/// # 参数
/// - `store`: 只读数据仓储
/// - `config`: 当前配置（载体与产线目标）
/// - `agg`: 上游聚合结果
/// - `board`: 上游 OEE 评分结果
///
/// # 返回
/// - `Ok(Vec<Alert>)`: 确定顺序的预警列表, 无预警时为空
pub(crate) fn compute(
    store: &DatasetRepository,
    config: &DashboardConfig,
    agg: &AggregationTotals,
    board: &OeeScoreBoard,
) -> EngineResult<Vec<Alert>> {
    let mut alerts = Vec::new();

    for total in &agg.totals {
        let baseline = store.baseline(total.carrier);
        let threshold = allowed_volume(baseline, config.carrier_target(total.carrier));
        if total.volume > threshold {
            let labels = carrier_labels(total.carrier);
            alerts.push(Alert {
                category: AlertCategory::Energy,
                severity: AlertSeverity::High,
                entity: total.carrier.as_str().to_string(),
                label_fa: labels.0.to_string(),
                label_en: labels.1.to_string(),
                measured: total.volume,
                threshold,
            });
        }
    }

    for line in &board.lines {
        if let Some(target) = config.line_target(&line.line_id) {
            if line.oee < target {
                alerts.push(Alert {
                    category: AlertCategory::Effectiveness,
                    severity: AlertSeverity::Medium,
                    entity: line.line_id.clone(),
                    label_fa: line.name_fa.clone(),
                    label_en: line.name_en.clone(),
                    measured: line.oee,
                    threshold: target,
                });
            }
        }
    }

    Ok(alerts)
}

fn carrier_labels(carrier: CarrierId) -> (&'static str, &'static str) {
    match carrier {
        CarrierId::Electricity => ("برق", "Electricity"),
        CarrierId::Gas => ("گاز", "Gas"),
        CarrierId::Air => ("هوای فشرده", "Compressed Air"),
    }
}
