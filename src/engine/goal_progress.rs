// ==========================================
// Smart Vista 能源与OEE仪表盘 - 目标进度节点
// ==========================================
// 职责: 计算节能目标达成率与产线 OEE 目标进度
// 公式: 达成率 = (基线 - 当前) / 基线 x 100
//       进度   = min(100, 达成率 / 目标 x 100), 截断到 [0, 100]
// 红线: 目标为零或基线为零不得除零, 以 InvalidGoal 上报
// ==========================================

use crate::config::DashboardConfig;
use crate::domain::types::CarrierId;
use crate::engine::aggregation::AggregationTotals;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::numeric::round_to;
use crate::engine::oee_score::OeeScoreBoard;
use crate::repository::DatasetRepository;
use serde::{Deserialize, Serialize};

// ==========================================
// 进度公式
// ==========================================

/// 目标进度: 由未舍入的达成率与目标百分比计算, 0 位小数, 截断到 [0, 100]
fn progress_pct(achieved_raw: f64, target_pct: f64, entity: &str) -> EngineResult<f64> {
    if target_pct == 0.0 {
        return Err(EngineError::invalid_goal(entity, "目标百分比为零"));
    }
    let raw = (achieved_raw / target_pct * 100.0).min(100.0);
    Ok(round_to(raw, 0).clamp(0.0, 100.0))
}

// ==========================================
// 输出类型
// ==========================================

/// 声明式节能目标的进度行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgressRow {
    pub goal_id: String,
    pub line_fa: String,
    pub line_en: String,
    pub carrier: CarrierId,
    /// 达成率, 1 位小数
    pub achieved_pct: f64,
    /// 目标进度, 0 位小数, [0, 100]
    pub progress_pct: f64,
}

/// 按载体的降耗进度行（当前值取自聚合用量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierReductionRow {
    pub carrier: CarrierId,
    pub baseline: f64,
    pub current: f64,
    pub achieved_pct: f64,
    pub progress_pct: f64,
}

/// 节能目标进度节点输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyGoalProgress {
    /// 声明式目标（数据源顺序）
    pub goals: Vec<GoalProgressRow>,
    /// 载体降耗行（载体声明顺序）
    pub carriers: Vec<CarrierReductionRow>,
}

/// 单产线的 OEE 目标行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGoalRow {
    pub line_id: String,
    pub current_oee: f64,
    pub target_oee: f64,
    /// 目标进度, 0 位小数, [0, 100]
    pub progress_pct: f64,
}

/// OEE 目标进度节点输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OeeGoalProgress {
    pub lines: Vec<LineGoalRow>,
}

// ==========================================
// 节点计算
// ==========================================

/// 节能目标进度计算
///
/// # 参数
/// - `store`: 只读数据仓储（目标记录与载体基线）
/// - `config`: 当前配置（载体目标百分比）
/// - `agg`: 上游聚合结果（载体当前用量）
///
/// # 返回
/// - `Ok(EnergyGoalProgress)`
/// - `Err(InvalidGoal)`: 目标或基线为零
pub(crate) fn compute_energy(
    store: &DatasetRepository,
    config: &DashboardConfig,
    agg: &AggregationTotals,
) -> EngineResult<EnergyGoalProgress> {
    let mut goals = Vec::with_capacity(store.goals().len());
    for goal in store.goals() {
        if goal.baseline == 0.0 {
            return Err(EngineError::invalid_goal(&goal.id, "基线值为零"));
        }
        let achieved_raw = (goal.baseline - goal.current) / goal.baseline * 100.0;
        let target = config.carrier_target(goal.carrier);
        goals.push(GoalProgressRow {
            goal_id: goal.id.clone(),
            line_fa: goal.line_fa.clone(),
            line_en: goal.line_en.clone(),
            carrier: goal.carrier,
            achieved_pct: round_to(achieved_raw, 1),
            progress_pct: progress_pct(achieved_raw, target, &goal.id)?,
        });
    }

    let mut carriers = Vec::with_capacity(agg.totals.len());
    for total in &agg.totals {
        let baseline = store.baseline(total.carrier);
        if baseline == 0.0 {
            return Err(EngineError::invalid_goal(total.carrier.as_str(), "载体基线为零"));
        }
        let achieved_raw = (baseline - total.volume) / baseline * 100.0;
        let target = config.carrier_target(total.carrier);
        carriers.push(CarrierReductionRow {
            carrier: total.carrier,
            baseline,
            current: total.volume,
            achieved_pct: round_to(achieved_raw, 1),
            progress_pct: progress_pct(achieved_raw, target, total.carrier.as_str())?,
        });
    }

    Ok(EnergyGoalProgress { goals, carriers })
}

/// 产线 OEE 目标进度计算
///
/// # 返回
/// - `Err(InvalidGoal)`: 产线缺少目标或目标为零
pub(crate) fn compute_oee_goals(
    config: &DashboardConfig,
    board: &OeeScoreBoard,
) -> EngineResult<OeeGoalProgress> {
    let mut lines = Vec::with_capacity(board.lines.len());
    for line in &board.lines {
        let target = config
            .line_target(&line.line_id)
            .ok_or_else(|| EngineError::invalid_goal(&line.line_id, "产线缺少目标值"))?;
        // OEE 目标: 进度 = min(100, 当前 / 目标 x 100)
        lines.push(LineGoalRow {
            line_id: line.line_id.clone(),
            current_oee: line.oee,
            target_oee: target,
            progress_pct: progress_pct(line.oee, target, &line.line_id)?,
        });
    }
    Ok(OeeGoalProgress { lines })
}
