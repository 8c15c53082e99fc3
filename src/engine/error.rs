// ==========================================
// Smart Vista 能源与OEE仪表盘 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 引擎不得静默吞错, 不得以 NaN/默认值替代报错
// ==========================================

use crate::engine::graph::NodeId;
use thiserror::Error;

/// 引擎层错误类型
///
/// 除 `GraphCycle` 外均为可恢复错误: 引擎内部状态保持有效,
/// 修正输入后的下一次调用可以成功。
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 配置错误 =====
    #[error("无效配置: {message}")]
    InvalidConfig { message: String },

    #[error("目标越界: field={field}, value={value}, 允许范围=[{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    // ===== 计算错误 =====
    #[error("无效目标: entity={entity}, 原因: {reason}")]
    InvalidGoal { entity: String, reason: String },

    #[error("节点计算失败: node={node}")]
    Computation {
        node: NodeId,
        #[source]
        source: anyhow::Error,
    },

    // ===== 构造期致命错误 =====
    #[error("依赖图存在环: {path}")]
    GraphCycle { path: String },
}

impl EngineError {
    /// 便捷构造: 无效配置
    pub fn invalid_config(message: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            message: message.into(),
        }
    }

    /// 便捷构造: 无效目标
    pub fn invalid_goal(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidGoal {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
