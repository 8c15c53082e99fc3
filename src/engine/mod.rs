// ==========================================
// Smart Vista 能源与OEE仪表盘 - 引擎层
// ==========================================
// 增量求值引擎: 静态依赖图 + 脏标记失效 + 惰性重算
// ==========================================

pub mod aggregation;
pub mod alerts;
pub mod cost_breakdown;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod goal_progress;
pub mod graph;
mod numeric;
pub mod oee_score;

pub use aggregation::{AggregationTotals, CarrierTotal};
pub use alerts::Alert;
pub use cost_breakdown::{CarrierCost, CostBreakdown};
pub use error::{EngineError, EngineResult};
pub use evaluator::{MetricsEngine, NodeValue};
pub use events::SubscriptionId;
pub use goal_progress::{
    CarrierReductionRow, EnergyGoalProgress, GoalProgressRow, LineGoalRow, OeeGoalProgress,
};
pub use graph::{ConfigField, Dependency, NodeId};
pub use oee_score::{compute_oee, LineOee, OeeScoreBoard, ShiftOee};
