// ==========================================
// Smart Vista 能源与OEE仪表盘 - 领域层
// ==========================================
// 职责: 领域实体与类型定义, 不含业务计算
// ==========================================

pub mod energy;
pub mod goal;
pub mod oee;
pub mod types;

// 重导出领域实体
pub use energy::{CarrierMeta, Period};
pub use goal::EnergyGoal;
pub use oee::{Downtime, DowntimeReason, DowntimeScatterPoint, OeePeriod, ProductionLine, Shift};
