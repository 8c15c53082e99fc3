// ==========================================
// Smart Vista 能源与OEE仪表盘 - 依赖图定义
// ==========================================
// 职责: 节点标识 / 静态依赖声明 / 环检测 / 拓扑排序
// 红线: 依赖在图构造期静态声明, 不在运行期推断;
//       环是构造期致命错误, 不是运行期状态
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 配置字段 (脏传播的源头)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigField {
    /// 选中的时间范围
    Timeframe,
    /// 载体节能目标
    CarrierTargets,
    /// 产线 OEE 目标
    LineTargets,
}

// ==========================================
// 节点标识
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    /// 聚合: 选中时间范围内各载体用量合计 + 周期总成本
    Aggregation,
    /// 成本分解: 电价推导的载体成本与占比
    CostBreakdown,
    /// OEE 得分: 各产线/班次的综合效率
    OeeScore,
    /// 节能目标进度
    EnergyGoalProgress,
    /// OEE 目标进度
    OeeGoalProgress,
    /// 阈值告警
    Alerts,
}

impl NodeId {
    /// 所有节点（声明顺序, 亦用于脏传播遍历）
    pub const ALL: [NodeId; 6] = [
        NodeId::Aggregation,
        NodeId::CostBreakdown,
        NodeId::OeeScore,
        NodeId::EnergyGoalProgress,
        NodeId::OeeGoalProgress,
        NodeId::Alerts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeId::Aggregation => "aggregation",
            NodeId::CostBreakdown => "cost_breakdown",
            NodeId::OeeScore => "oee_score",
            NodeId::EnergyGoalProgress => "energy_goal_progress",
            NodeId::OeeGoalProgress => "oee_goal_progress",
            NodeId::Alerts => "alerts",
        }
    }

    /// 节点的静态依赖声明
    ///
    /// 引擎的失效判定完全由该声明推导, 不允许任何节点
    /// 对"谁依赖时间范围"做硬编码假设。
    pub fn deps(&self) -> &'static [Dependency] {
        match self {
            NodeId::Aggregation => &[Dependency::Config(ConfigField::Timeframe)],
            NodeId::CostBreakdown => &[Dependency::Node(NodeId::Aggregation)],
            NodeId::OeeScore => &[],
            NodeId::EnergyGoalProgress => &[
                Dependency::Node(NodeId::Aggregation),
                Dependency::Config(ConfigField::CarrierTargets),
            ],
            NodeId::OeeGoalProgress => &[
                Dependency::Node(NodeId::OeeScore),
                Dependency::Config(ConfigField::LineTargets),
            ],
            NodeId::Alerts => &[
                Dependency::Node(NodeId::Aggregation),
                Dependency::Node(NodeId::OeeScore),
                Dependency::Config(ConfigField::CarrierTargets),
                Dependency::Config(ConfigField::LineTargets),
            ],
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aggregation" => Ok(NodeId::Aggregation),
            "cost_breakdown" => Ok(NodeId::CostBreakdown),
            "oee_score" => Ok(NodeId::OeeScore),
            "energy_goal_progress" => Ok(NodeId::EnergyGoalProgress),
            "oee_goal_progress" => Ok(NodeId::OeeGoalProgress),
            "alerts" => Ok(NodeId::Alerts),
            other => Err(format!("未知节点: {}", other)),
        }
    }
}

// ==========================================
// 依赖项 (上游节点 或 配置字段)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    Node(NodeId),
    Config(ConfigField),
}

// ==========================================
// 环检测 + 拓扑排序
// ==========================================

/// DFS 着色状态
#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// 对依赖声明做环检测并返回拓扑序（依赖在前）
///
/// # 参数
/// - `deps_of`: 依赖查询函数（生产代码传 `NodeId::deps`,
///   测试可注入人为构造的环来覆盖检测逻辑）
///
/// # 返回
/// - `Ok(order)`: 拓扑序, 每个节点的上游都排在其之前
/// - `Err(GraphCycle)`: 声明中存在环, 引擎构造必须中止
pub fn topological_order<F>(deps_of: F) -> EngineResult<Vec<NodeId>>
where
    F: Fn(NodeId) -> &'static [Dependency],
{
    fn index_of(node: NodeId) -> usize {
        NodeId::ALL.iter().position(|n| *n == node).unwrap_or(0)
    }

    fn visit<F>(
        node: NodeId,
        deps_of: &F,
        states: &mut [VisitState; 6],
        order: &mut Vec<NodeId>,
        stack: &mut Vec<NodeId>,
    ) -> EngineResult<()>
    where
        F: Fn(NodeId) -> &'static [Dependency],
    {
        match states[index_of(node)] {
            VisitState::Done => return Ok(()),
            VisitState::InProgress => {
                // 回边: stack 自该节点起的片段即为环路径
                let cycle_start = stack.iter().position(|n| *n == node).unwrap_or(0);
                let mut path: Vec<&str> = stack[cycle_start..].iter().map(|n| n.as_str()).collect();
                path.push(node.as_str());
                return Err(EngineError::GraphCycle {
                    path: path.join(" -> "),
                });
            }
            VisitState::Unvisited => {}
        }

        states[index_of(node)] = VisitState::InProgress;
        stack.push(node);

        for dep in deps_of(node) {
            if let Dependency::Node(upstream) = dep {
                visit(*upstream, deps_of, states, order, stack)?;
            }
        }

        stack.pop();
        states[index_of(node)] = VisitState::Done;
        order.push(node);
        Ok(())
    }

    let mut states = [VisitState::Unvisited; 6];
    let mut order = Vec::with_capacity(NodeId::ALL.len());
    let mut stack = Vec::new();

    for node in NodeId::ALL {
        visit(node, &deps_of, &mut states, &mut order, &mut stack)?;
    }

    Ok(order)
}

/// 前向脏传播
///
/// 自某配置字段出发, 沿声明的依赖边将受影响节点标脏。
/// 必须按拓扑序遍历, 保证上游先于下游判定。
///
/// # 参数
/// - `field`: 被修改的配置字段
/// - `order`: 拓扑序（`topological_order` 的输出）
///
/// # 返回
/// 受影响（需标脏）的节点集合, 按拓扑序排列
pub fn affected_by(field: ConfigField, order: &[NodeId]) -> Vec<NodeId> {
    let mut dirty: Vec<NodeId> = Vec::new();

    for node in order {
        let hit = node.deps().iter().any(|dep| match dep {
            Dependency::Config(f) => *f == field,
            Dependency::Node(upstream) => dirty.contains(upstream),
        });
        if hit {
            dirty.push(*node);
        }
    }

    dirty
}
