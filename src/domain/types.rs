// ==========================================
// Smart Vista 能源与OEE仪表盘 - 领域类型定义
// ==========================================
// 能源载体 / 时间范围 / 告警分类 的枚举定义
// 序列化格式: 与前端数据键一致 (小写)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 能源载体 (Carrier)
// ==========================================
// 声明顺序即为告警和导出的稳定排序依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarrierId {
    Electricity,
    Gas,
    Air,
}

impl CarrierId {
    /// 所有载体（声明顺序）
    pub const ALL: [CarrierId; 3] = [CarrierId::Electricity, CarrierId::Gas, CarrierId::Air];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierId::Electricity => "electricity",
            CarrierId::Gas => "gas",
            CarrierId::Air => "air",
        }
    }

    /// 本地化显示名（i18n key: carriers.*）
    pub fn label(&self) -> String {
        crate::i18n::t(&format!("carriers.{}", self.as_str()))
    }
}

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CarrierId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electricity" => Ok(CarrierId::Electricity),
            "gas" => Ok(CarrierId::Gas),
            "air" => Ok(CarrierId::Air),
            other => Err(format!("未知能源载体: {}", other)),
        }
    }
}

// ==========================================
// 时间范围 (Timeframe Bucket)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeframeBucket {
    Week,
    Month,
    Year,
}

impl TimeframeBucket {
    /// 所有时间范围（声明顺序）
    pub const ALL: [TimeframeBucket; 3] = [
        TimeframeBucket::Week,
        TimeframeBucket::Month,
        TimeframeBucket::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeframeBucket::Week => "week",
            TimeframeBucket::Month => "month",
            TimeframeBucket::Year => "year",
        }
    }

    /// 当前语言环境下的展示标签
    pub fn label(&self) -> String {
        crate::i18n::t(&format!("timeframes.{}", self.as_str()))
    }
}

impl Default for TimeframeBucket {
    fn default() -> Self {
        TimeframeBucket::Week
    }
}

impl fmt::Display for TimeframeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TimeframeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(TimeframeBucket::Week),
            "month" => Ok(TimeframeBucket::Month),
            "year" => Ok(TimeframeBucket::Year),
            other => Err(format!("未知时间范围: {}", other)),
        }
    }
}

// ==========================================
// 告警类别 (Alert Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    /// 能耗超标
    Energy,
    /// 设备效率不达标
    Effectiveness,
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCategory::Energy => write!(f, "energy"),
            AlertCategory::Effectiveness => write!(f, "effectiveness"),
        }
    }
}

// ==========================================
// 告警级别 (Alert Severity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Medium,
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Medium => write!(f, "medium"),
            AlertSeverity::High => write!(f, "high"),
        }
    }
}
