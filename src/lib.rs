// ==========================================
// Smart Vista 能源与OEE仪表盘 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 指标推导引擎 (增量计算 + 依赖追踪)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 只读参考数据集
pub mod repository;

// 配置层 - 可变输入 (时间范围 + 目标值)
pub mod config;

// 引擎层 - 依赖图求值
pub mod engine;

// 导出层 - CSV 序列化
pub mod export;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 展示层接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertCategory, AlertSeverity, CarrierId, TimeframeBucket};

// 领域实体
pub use domain::{
    CarrierMeta, DowntimeReason, DowntimeScatterPoint, EnergyGoal, OeePeriod, Period,
    ProductionLine, Shift,
};

// 仓储
pub use repository::DatasetRepository;

// 配置
pub use config::DashboardConfig;

// 引擎
pub use engine::{
    Alert, EngineError, EngineResult, MetricsEngine, NodeId, NodeValue, SubscriptionId,
};

// API
pub use api::DashboardApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Smart Vista 能源与OEE决策支持仪表盘";

// ==========================================
// 预编译检查
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
