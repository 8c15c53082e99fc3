// ==========================================
// Smart Vista 能源与OEE仪表盘 - API 层
// ==========================================

pub mod dashboard_api;
pub mod error;

pub use dashboard_api::{AlertDto, DashboardApi, OverviewDto};
pub use error::{ApiError, ApiResult};
