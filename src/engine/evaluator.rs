// ==========================================
// Smart Vista 能源与OEE仪表盘 - 增量求值引擎
// ==========================================
// 职责: 节点缓存 / 脏标记失效 / 惰性拉取求值 / 变更分发
// 红线: 配置写入只做失效, 不做计算; 计算延迟到读取发生时;
//       计算失败不污染缓存, 脏标记保留待下次重算
// ==========================================

use crate::config::{
    DashboardConfig, CARRIER_TARGET_MAX, CARRIER_TARGET_MIN, LINE_TARGET_MAX, LINE_TARGET_MIN,
};
use crate::domain::types::{CarrierId, TimeframeBucket};
use crate::engine::aggregation::{self, AggregationTotals};
use crate::engine::alerts::{self, Alert};
use crate::engine::cost_breakdown::{self, CostBreakdown};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::events::{SubscriberRegistry, SubscriptionId};
use crate::engine::goal_progress::{self, EnergyGoalProgress, OeeGoalProgress};
use crate::engine::graph::{affected_by, topological_order, ConfigField, Dependency, NodeId};
use crate::engine::oee_score::{self, OeeScoreBoard};
use crate::repository::DatasetRepository;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// 节点值
// ==========================================

/// 节点求值结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeValue {
    Aggregation(AggregationTotals),
    CostBreakdown(CostBreakdown),
    OeeScore(OeeScoreBoard),
    EnergyGoalProgress(EnergyGoalProgress),
    OeeGoalProgress(OeeGoalProgress),
    Alerts(Vec<Alert>),
}

/// 单节点的缓存状态
#[derive(Debug, Default)]
struct NodeState {
    /// 脏标记: 上游或配置已变, 缓存不再可信
    dirty: bool,
    /// 最近一次成功计算的值
    cached: Option<NodeValue>,
    /// 重算代次: 每次实际重算递增, 值未变也递增
    generation: u64,
    /// 实际执行计算的次数（观测用）
    exec_count: u64,
}

// ==========================================
// 求值引擎
// ==========================================

/// 指标求值引擎
///
/// 持有只读数据仓储与当前配置, 按静态依赖声明
/// 做失效传播与惰性重算。
pub struct MetricsEngine {
    store: Arc<DatasetRepository>,
    config: DashboardConfig,
    /// 拓扑序（构造期算出, 依赖在前）
    topo: Vec<NodeId>,
    states: HashMap<NodeId, NodeState>,
    subscribers: SubscriberRegistry,
}

impl MetricsEngine {
    /// 以默认配置构造引擎
    pub fn new(store: Arc<DatasetRepository>) -> EngineResult<Self> {
        Self::with_config(store, DashboardConfig::default())
    }

    /// 以指定配置构造引擎
    ///
    /// # 返回
    /// - `Err(GraphCycle)`: 依赖声明存在环
    /// - `Err(InvalidConfig)`: 配置的时间范围在数据集中不存在
    pub fn with_config(
        store: Arc<DatasetRepository>,
        config: DashboardConfig,
    ) -> EngineResult<Self> {
        let topo = topological_order(|n| n.deps())?;

        if !store.has_bucket(config.timeframe()) {
            return Err(EngineError::invalid_config(format!(
                "时间范围无数据: {}",
                config.timeframe()
            )));
        }

        let states = NodeId::ALL
            .iter()
            .map(|n| (*n, NodeState::default()))
            .collect();

        Ok(Self {
            store,
            config,
            topo,
            states,
            subscribers: SubscriberRegistry::new(),
        })
    }

    // ==========================================
    // 配置写入 (仅失效, 不计算)
    // ==========================================

    /// 切换时间范围
    ///
    /// # 返回
    /// - `Err(InvalidConfig)`: 时间范围在数据集中不存在
    #[instrument(skip(self))]
    pub fn set_timeframe(&mut self, bucket: TimeframeBucket) -> EngineResult<()> {
        if bucket == self.config.timeframe() {
            return Ok(());
        }
        if !self.store.has_bucket(bucket) {
            return Err(EngineError::invalid_config(format!(
                "时间范围无数据: {}",
                bucket
            )));
        }
        self.config.set_timeframe(bucket);
        self.invalidate(ConfigField::Timeframe);
        Ok(())
    }

    /// 设置载体节能目标百分比
    ///
    /// # 返回
    /// - `Err(OutOfRange)`: 超出允许区间
    #[instrument(skip(self))]
    pub fn set_carrier_target(&mut self, carrier: CarrierId, percent: f64) -> EngineResult<()> {
        if !(CARRIER_TARGET_MIN..=CARRIER_TARGET_MAX).contains(&percent) {
            return Err(EngineError::OutOfRange {
                field: format!("carrier_target.{}", carrier),
                value: percent,
                min: CARRIER_TARGET_MIN,
                max: CARRIER_TARGET_MAX,
            });
        }
        if self.config.carrier_target(carrier) == percent {
            return Ok(());
        }
        self.config.set_carrier_target(carrier, percent);
        self.invalidate(ConfigField::CarrierTargets);
        Ok(())
    }

    /// 设置产线 OEE 目标
    ///
    /// # 返回
    /// - `Err(InvalidConfig)`: 产线不存在
    /// - `Err(OutOfRange)`: 超出允许区间
    #[instrument(skip(self))]
    pub fn set_line_target(&mut self, line_id: &str, percent: f64) -> EngineResult<()> {
        if self.store.line(line_id).is_none() {
            return Err(EngineError::invalid_config(format!(
                "产线不存在: {}",
                line_id
            )));
        }
        if !(LINE_TARGET_MIN..=LINE_TARGET_MAX).contains(&percent) {
            return Err(EngineError::OutOfRange {
                field: format!("line_target.{}", line_id),
                value: percent,
                min: LINE_TARGET_MIN,
                max: LINE_TARGET_MAX,
            });
        }
        if self.config.line_target(line_id) == Some(percent) {
            return Ok(());
        }
        self.config.set_line_target(line_id, percent);
        self.invalidate(ConfigField::LineTargets);
        Ok(())
    }

    /// 沿依赖声明将受影响节点标脏
    fn invalidate(&mut self, field: ConfigField) {
        let affected = affected_by(field, &self.topo);
        tracing::debug!("配置变更失效传播: field={:?}, 受影响节点={}", field, affected.len());
        for node in affected {
            self.states.entry(node).or_default().dirty = true;
        }
    }

    // ==========================================
    // 惰性求值
    // ==========================================

    /// 求值单个节点
    ///
    /// 先递归求值上游, 再按脏标记决定复用缓存或重算。
    /// 重算失败时缓存与脏标记均保持原状。
    ///
    /// # 返回
    /// - `Ok(NodeValue)`: 节点当前值（缓存或新算）
    /// - `Err(InvalidGoal)`: 目标配置使计算无定义
    /// - `Err(Computation)`: 其余计算失败, 带上游错误
    pub fn evaluate(&mut self, node: NodeId) -> EngineResult<NodeValue> {
        for dep in node.deps() {
            if let Dependency::Node(upstream) = dep {
                self.evaluate(*upstream)?;
            }
        }

        let state = self.states.entry(node).or_default();
        if !state.dirty {
            if let Some(cached) = &state.cached {
                return Ok(cached.clone());
            }
        }

        let value = self.compute(node).map_err(|e| wrap_error(node, e))?;

        let state = self.states.entry(node).or_default();
        state.exec_count += 1;
        state.generation += 1;
        state.dirty = false;
        let changed = state.cached.as_ref() != Some(&value);
        state.cached = Some(value.clone());

        if changed {
            self.subscribers.notify(node, &value);
        }
        Ok(value)
    }

    /// 按拓扑序求值全部节点
    pub fn evaluate_all(&mut self) -> EngineResult<Vec<(NodeId, NodeValue)>> {
        let order = self.topo.clone();
        order
            .into_iter()
            .map(|node| self.evaluate(node).map(|v| (node, v)))
            .collect()
    }

    /// 节点计算分派（只读, 上游值取自缓存）
    fn compute(&self, node: NodeId) -> EngineResult<NodeValue> {
        match node {
            NodeId::Aggregation => {
                aggregation::compute(&self.store, self.config.timeframe()).map(NodeValue::Aggregation)
            }
            NodeId::CostBreakdown => {
                let agg = self.aggregation_output()?;
                cost_breakdown::compute(&self.store, &agg).map(NodeValue::CostBreakdown)
            }
            NodeId::OeeScore => oee_score::compute(&self.store).map(NodeValue::OeeScore),
            NodeId::EnergyGoalProgress => {
                let agg = self.aggregation_output()?;
                goal_progress::compute_energy(&self.store, &self.config, &agg)
                    .map(NodeValue::EnergyGoalProgress)
            }
            NodeId::OeeGoalProgress => {
                let board = self.oee_output()?;
                goal_progress::compute_oee_goals(&self.config, &board)
                    .map(NodeValue::OeeGoalProgress)
            }
            NodeId::Alerts => {
                let agg = self.aggregation_output()?;
                let board = self.oee_output()?;
                alerts::compute(&self.store, &self.config, &agg, &board).map(NodeValue::Alerts)
            }
        }
    }

    fn aggregation_output(&self) -> EngineResult<AggregationTotals> {
        match self
            .states
            .get(&NodeId::Aggregation)
            .and_then(|s| s.cached.as_ref())
        {
            Some(NodeValue::Aggregation(v)) => Ok(v.clone()),
            _ => Err(missing_upstream(NodeId::Aggregation)),
        }
    }

    fn oee_output(&self) -> EngineResult<OeeScoreBoard> {
        match self
            .states
            .get(&NodeId::OeeScore)
            .and_then(|s| s.cached.as_ref())
        {
            Some(NodeValue::OeeScore(v)) => Ok(v.clone()),
            _ => Err(missing_upstream(NodeId::OeeScore)),
        }
    }

    // ==========================================
    // 订阅与观测
    // ==========================================

    /// 订阅节点值变更
    ///
    /// 回调仅在节点重算且值实际变化时触发
    pub fn subscribe(
        &mut self,
        node: NodeId,
        callback: Box<dyn FnMut(&NodeValue)>,
    ) -> SubscriptionId {
        self.subscribers.subscribe(node, callback)
    }

    /// 取消订阅
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// 节点的重算代次
    pub fn generation(&self, node: NodeId) -> u64 {
        self.states.get(&node).map(|s| s.generation).unwrap_or(0)
    }

    /// 节点的实际计算次数
    pub fn executions(&self, node: NodeId) -> u64 {
        self.states.get(&node).map(|s| s.exec_count).unwrap_or(0)
    }

    /// 节点当前是否为脏
    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.states.get(&node).map(|s| s.dirty).unwrap_or(true)
    }

    /// 当前配置
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// 数据仓储
    pub fn store(&self) -> &DatasetRepository {
        &self.store
    }

    #[cfg(test)]
    fn mark_dirty(&mut self, node: NodeId) {
        self.states.entry(node).or_default().dirty = true;
    }
}

/// 计算错误封装: InvalidGoal 原样上抛, 其余折叠为 Computation
fn wrap_error(node: NodeId, err: EngineError) -> EngineError {
    match err {
        e @ EngineError::InvalidGoal { .. } => e,
        other => EngineError::Computation {
            node,
            source: anyhow::Error::new(other),
        },
    }
}

fn missing_upstream(node: NodeId) -> EngineError {
    EngineError::Computation {
        node,
        source: anyhow::anyhow!("上游缓存缺失"),
    }
}
