// ==========================================
// Smart Vista 能源与OEE仪表盘 - OEE评分节点
// ==========================================
// 职责: 按产线与班次计算设备综合效率
// 公式: OEE = 可动率 x 性能率 x 良品率 / 10000
// 舍入: 1 位小数; 超界输入不做截断, 原样参与计算
// ==========================================

use crate::domain::oee::ProductionLine;
use crate::engine::error::EngineResult;
use crate::engine::numeric::round_to;
use crate::repository::DatasetRepository;
use serde::{Deserialize, Serialize};

/// OEE 公式
///
/// # 参数
/// - `availability` / `performance` / `quality`: 百分比值
///
/// # 返回
/// - OEE 百分比, 1 位小数
pub fn compute_oee(availability: f64, performance: f64, quality: f64) -> f64 {
    round_to(availability * performance * quality / 10000.0, 1)
}

// ==========================================
// 输出类型
// ==========================================

/// 单班次的 OEE 行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftOee {
    pub name_fa: String,
    pub name_en: String,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
}

/// 单产线的 OEE 行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOee {
    pub line_id: String,
    pub name_fa: String,
    pub name_en: String,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
    pub shifts: Vec<ShiftOee>,
}

/// OEE 评分节点输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OeeScoreBoard {
    /// 各产线评分（产线声明顺序）
    pub lines: Vec<LineOee>,
    /// 全产线平均 OEE, 1 位小数; 无产线时为 0
    pub average: f64,
}

impl OeeScoreBoard {
    pub fn line(&self, line_id: &str) -> Option<&LineOee> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }
}

// ==========================================
// 节点计算
// ==========================================

fn score_line(line: &ProductionLine) -> LineOee {
    let shifts = line
        .shifts
        .iter()
        .map(|s| ShiftOee {
            name_fa: s.name_fa.clone(),
            name_en: s.name_en.clone(),
            availability: s.availability,
            performance: s.performance,
            quality: s.quality,
            oee: compute_oee(s.availability, s.performance, s.quality),
        })
        .collect();

    LineOee {
        line_id: line.id.clone(),
        name_fa: line.name_fa.clone(),
        name_en: line.name_en.clone(),
        availability: line.availability,
        performance: line.performance,
        quality: line.quality,
        oee: compute_oee(line.availability, line.performance, line.quality),
        shifts,
    }
}

/// OEE 评分计算
pub(crate) fn compute(store: &DatasetRepository) -> EngineResult<OeeScoreBoard> {
    let lines: Vec<LineOee> = store.lines().iter().map(score_line).collect();

    let average = if lines.is_empty() {
        0.0
    } else {
        round_to(lines.iter().map(|l| l.oee).sum::<f64>() / lines.len() as f64, 1)
    };

    Ok(OeeScoreBoard { lines, average })
}
