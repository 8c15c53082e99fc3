// ==========================================
// Smart Vista 能源与OEE仪表盘 - 仪表盘 API
// ==========================================
// 职责: 封装 MetricsEngine, 面向展示层提供字符串键控的
//       配置写入 / 节点查询 / 概览聚合 / CSV 导出
// 架构: API 层 → 引擎层 (MetricsEngine) → 仓储层
// ==========================================

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::api::error::{ApiError, ApiResult};
use crate::config::DashboardConfig;
use crate::domain::types::{CarrierId, TimeframeBucket};
use crate::engine::evaluator::NodeValue;
use crate::engine::graph::NodeId;
use crate::engine::{EngineError, MetricsEngine, SubscriptionId};
use crate::export;
use crate::i18n::{current_locale, set_locale, t};
use crate::repository::DatasetRepository;

// ==========================================
// 展示层 DTO
// ==========================================

/// 仪表盘概览
#[derive(Debug, Clone, Serialize)]
pub struct OverviewDto {
    pub timeframe: TimeframeBucket,
    /// 全载体用量合计
    pub total_volume: f64,
    /// 数据源口径的周期成本合计
    pub period_cost: f64,
    /// 电价推导的成本合计
    pub derived_cost: f64,
    /// 全产线平均 OEE
    pub average_oee: f64,
    /// 当前预警数
    pub alert_count: usize,
}

/// 本地化后的预警行
#[derive(Debug, Clone, Serialize)]
pub struct AlertDto {
    pub category: String,
    pub severity: String,
    pub entity: String,
    pub message: String,
    pub measured: f64,
    pub threshold: f64,
}

// ==========================================
// DashboardApi - 仪表盘 API
// ==========================================

/// 仪表盘API
///
/// 展示层的唯一入口: 字符串键控的接口做解析与校验,
/// 业务语义全部委托给 `MetricsEngine`。
pub struct DashboardApi {
    engine: MetricsEngine,
}

impl DashboardApi {
    /// 创建新的 DashboardApi 实例
    pub fn new(store: Arc<DatasetRepository>) -> ApiResult<Self> {
        Ok(Self {
            engine: MetricsEngine::new(store)?,
        })
    }

    /// 以指定配置创建实例
    pub fn with_config(
        store: Arc<DatasetRepository>,
        config: DashboardConfig,
    ) -> ApiResult<Self> {
        Ok(Self {
            engine: MetricsEngine::with_config(store, config)?,
        })
    }

    /// 底层引擎（测试与高级用法）
    pub fn engine_mut(&mut self) -> &mut MetricsEngine {
        &mut self.engine
    }

    // ==========================================
    // 语言环境
    // ==========================================

    /// 切换界面语言
    ///
    /// # 参数
    /// - locale: "en" 或 "fa"
    pub fn set_locale(&self, locale: &str) -> ApiResult<()> {
        match locale {
            "en" | "fa" => {
                set_locale(locale);
                Ok(())
            }
            other => Err(ApiError::InvalidInput(format!("不支持的语言: {}", other))),
        }
    }

    // ==========================================
    // 配置写入（字符串键控）
    // ==========================================

    /// 切换时间范围
    ///
    /// # 参数
    /// - bucket: "week" / "month" / "year"
    pub fn set_timeframe(&mut self, bucket: &str) -> ApiResult<()> {
        let bucket = TimeframeBucket::from_str(bucket).map_err(invalid_key)?;
        self.engine.set_timeframe(bucket)?;
        Ok(())
    }

    /// 设置载体节能目标
    ///
    /// # 参数
    /// - carrier: "electricity" / "gas" / "air"
    pub fn set_carrier_target(&mut self, carrier: &str, percent: f64) -> ApiResult<()> {
        let carrier = CarrierId::from_str(carrier).map_err(invalid_key)?;
        self.engine.set_carrier_target(carrier, percent)?;
        Ok(())
    }

    /// 设置产线 OEE 目标
    pub fn set_line_target(&mut self, line_id: &str, percent: f64) -> ApiResult<()> {
        self.engine.set_line_target(line_id, percent)?;
        Ok(())
    }

    // ==========================================
    // 节点查询
    // ==========================================

    /// 按名称求值单个节点, 返回 JSON
    ///
    /// # 参数
    /// - node: 节点名称（如 "aggregation", "alerts"）
    pub fn evaluate(&mut self, node: &str) -> ApiResult<String> {
        let node = NodeId::from_str(node).map_err(invalid_key)?;
        let value = self.engine.evaluate(node)?;
        Ok(serde_json::to_string(&value)?)
    }

    /// 仪表盘概览聚合
    pub fn overview(&mut self) -> ApiResult<OverviewDto> {
        let aggregation = match self.engine.evaluate(NodeId::Aggregation)? {
            NodeValue::Aggregation(v) => v,
            other => return Err(mismatch(NodeId::Aggregation, &other)),
        };
        let breakdown = match self.engine.evaluate(NodeId::CostBreakdown)? {
            NodeValue::CostBreakdown(v) => v,
            other => return Err(mismatch(NodeId::CostBreakdown, &other)),
        };
        let board = match self.engine.evaluate(NodeId::OeeScore)? {
            NodeValue::OeeScore(v) => v,
            other => return Err(mismatch(NodeId::OeeScore, &other)),
        };
        let alerts = self.alerts()?;

        Ok(OverviewDto {
            timeframe: self.engine.config().timeframe(),
            total_volume: aggregation.total_volume,
            period_cost: aggregation.period_cost,
            derived_cost: breakdown.derived_total,
            average_oee: board.average,
            alert_count: alerts.len(),
        })
    }

    /// 当前预警列表（文案按当前语言环境本地化）
    pub fn alerts(&mut self) -> ApiResult<Vec<AlertDto>> {
        let alerts = match self.engine.evaluate(NodeId::Alerts)? {
            NodeValue::Alerts(v) => v,
            other => return Err(mismatch(NodeId::Alerts, &other)),
        };
        Ok(alerts
            .iter()
            .map(|a| AlertDto {
                category: a.category.to_string(),
                severity: a.severity.to_string(),
                entity: a.entity.clone(),
                message: a.message(),
                measured: a.measured,
                threshold: a.threshold,
            })
            .collect())
    }

    /// 系统状态文案: 无预警时返回稳定提示
    pub fn status_message(&mut self) -> ApiResult<String> {
        let alerts = self.alerts()?;
        if alerts.is_empty() {
            Ok(t("common.nominal"))
        } else {
            Ok(alerts
                .iter()
                .map(|a| a.message.as_str())
                .collect::<Vec<_>>()
                .join("; "))
        }
    }

    /// 停机原因分钟数统计（条形图, 按数据源顺序）
    pub fn downtime_reasons(&self) -> ApiResult<String> {
        Ok(serde_json::to_string(self.engine.store().downtime_reasons())?)
    }

    /// 停机频次散点（散点图, 与分钟数统计相互独立）
    pub fn downtime_scatter(&self) -> ApiResult<String> {
        Ok(serde_json::to_string(self.engine.store().downtime_scatter())?)
    }

    /// 产线记录（含班次与停机分钟）
    pub fn production_lines(&self) -> ApiResult<String> {
        Ok(serde_json::to_string(self.engine.store().lines())?)
    }

    /// 指定时间范围的 OEE 历史趋势
    pub fn oee_trend(&self, bucket: &str) -> ApiResult<String> {
        let bucket = TimeframeBucket::from_str(bucket).map_err(invalid_key)?;
        let trend = self
            .engine
            .store()
            .oee_trend(bucket)
            .ok_or_else(|| ApiError::InvalidInput(format!("时间范围无趋势数据: {}", bucket)))?;
        Ok(serde_json::to_string(trend)?)
    }

    /// 当前配置快照 JSON
    pub fn config_snapshot(&self) -> ApiResult<String> {
        Ok(self.engine.config().snapshot()?)
    }

    // ==========================================
    // 订阅
    // ==========================================

    /// 订阅节点变更
    pub fn subscribe(
        &mut self,
        node: &str,
        callback: Box<dyn FnMut(&NodeValue)>,
    ) -> ApiResult<SubscriptionId> {
        let node = NodeId::from_str(node).map_err(invalid_key)?;
        Ok(self.engine.subscribe(node, callback))
    }

    /// 取消订阅
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.engine.unsubscribe(id)
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 渲染当前时间范围的 CSV 导出文档
    pub fn export_csv(&mut self) -> ApiResult<String> {
        let board = match self.engine.evaluate(NodeId::OeeScore)? {
            NodeValue::OeeScore(v) => v,
            other => return Err(mismatch(NodeId::OeeScore, &other)),
        };
        let timeframe = self.engine.config().timeframe();
        let periods = self
            .engine
            .store()
            .timeline(timeframe)
            .ok_or_else(|| ApiError::InvalidInput(format!("时间范围无数据: {}", timeframe)))?;
        Ok(export::render_csv(periods, &board, &current_locale())?)
    }

    /// 导出并写入文件
    pub fn export_csv_to(&mut self, path: impl AsRef<Path>) -> ApiResult<()> {
        let document = self.export_csv()?;
        std::fs::write(path, document).map_err(crate::export::ExportError::Io)?;
        Ok(())
    }
}

/// 未知的字符串键归入引擎侧的无效配置错误
fn invalid_key(message: String) -> ApiError {
    ApiError::Engine(EngineError::invalid_config(message))
}

/// 节点值类型与节点标识不符属于内部不变量破坏
fn mismatch(node: NodeId, value: &NodeValue) -> ApiError {
    ApiError::InvalidInput(format!("节点值类型不匹配: node={}, value={:?}", node, value))
}
