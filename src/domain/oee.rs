// ==========================================
// Smart Vista 能源与OEE仪表盘 - OEE领域实体
// ==========================================
// 职责: 产线 / 班次 / 停机时间 实体
// 不变式: 三项比率均为 [0,100] 百分数,
//         其乘积 / 10000 即为 OEE 得分
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Shift - 班次记录
// ==========================================
/// 产线下属班次，携带与产线相同的三项比率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub name_fa: String,
    pub name_en: String,
    /// 可用率 (%)
    pub availability: f64,
    /// 表现率 (%)
    pub performance: f64,
    /// 质量率 (%)
    pub quality: f64,
}

impl Shift {
    pub fn new(name_fa: &str, name_en: &str, availability: f64, performance: f64, quality: f64) -> Self {
        Self {
            name_fa: name_fa.to_string(),
            name_en: name_en.to_string(),
            availability,
            performance,
            quality,
        }
    }
}

// ==========================================
// Downtime - 停机分钟数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Downtime {
    /// 计划内停机（分钟）
    pub planned: u32,
    /// 计划外停机（分钟）
    pub unplanned: u32,
}

// ==========================================
// ProductionLine - 产线记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    /// 产线标识（如 "L1"）
    pub id: String,
    pub name_fa: String,
    pub name_en: String,
    /// 可用率 (%)
    pub availability: f64,
    /// 表现率 (%)
    pub performance: f64,
    /// 质量率 (%)
    pub quality: f64,
    /// 班次子记录
    pub shifts: Vec<Shift>,
    /// 停机分钟数
    pub downtime: Downtime,
}

impl ProductionLine {
    /// 按当前语言返回产线名称
    pub fn name(&self, locale: &str) -> &str {
        if locale.starts_with("fa") {
            &self.name_fa
        } else {
            &self.name_en
        }
    }
}

// ==========================================
// OeePeriod - OEE历史趋势的单周期记录
// ==========================================
/// 历史趋势表的一行：各产线在该周期的 OEE 观测值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OeePeriod {
    pub label_fa: String,
    pub label_en: String,
    /// (产线ID, OEE 观测值)，保持产线声明顺序
    pub line_scores: Vec<(String, f64)>,
}

impl OeePeriod {
    pub fn new(label_fa: &str, label_en: &str, line_scores: &[(&str, f64)]) -> Self {
        Self {
            label_fa: label_fa.to_string(),
            label_en: label_en.to_string(),
            line_scores: line_scores
                .iter()
                .map(|(id, score)| (id.to_string(), *score))
                .collect(),
        }
    }
}

// ==========================================
// DowntimeReason - 停机原因统计（条形图数据）
// ==========================================
/// 停机原因的分钟数统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeReason {
    pub reason_fa: String,
    pub reason_en: String,
    pub minutes: u32,
}

impl DowntimeReason {
    pub fn new(reason_fa: &str, reason_en: &str, minutes: u32) -> Self {
        Self {
            reason_fa: reason_fa.to_string(),
            reason_en: reason_en.to_string(),
            minutes,
        }
    }
}

// ==========================================
// DowntimeScatterPoint - 停机频次散点（散点图数据）
// ==========================================
/// 停机原因的频次/时长观测点
///
/// 与 `DowntimeReason` 是两份独立的数据源: 原因集合
/// 部分重叠, 重叠项的分钟数也可能不一致, 不做归并。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeScatterPoint {
    pub reason_fa: String,
    pub reason_en: String,
    /// 出现频次
    pub frequency: u32,
    pub minutes: u32,
}

impl DowntimeScatterPoint {
    pub fn new(reason_fa: &str, reason_en: &str, frequency: u32, minutes: u32) -> Self {
        Self {
            reason_fa: reason_fa.to_string(),
            reason_en: reason_en.to_string(),
            frequency,
            minutes,
        }
    }
}
