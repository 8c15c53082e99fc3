// ==========================================
// Smart Vista 能源与OEE仪表盘 - CSV 导出
// ==========================================
// 职责: 将能耗周期序列与产线 OEE 评分导出为 CSV
// 格式: 两张表, 以空行分隔; 数值不做展示级格式化
// ==========================================

use crate::domain::energy::Period;
use crate::domain::types::CarrierId;
use crate::engine::oee_score::OeeScoreBoard;
use crate::i18n::t;
use std::path::Path;
use thiserror::Error;

/// 导出层错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 序列化失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("导出内容非法 UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// 渲染完整导出文档
///
/// # 参数
/// - `periods`: 当前时间范围的周期序列
/// - `board`: 产线 OEE 评分
/// - `locale`: 标签语言（"fa" 或 "en"）
///
/// # 返回
/// - 两张 CSV 表拼接的文本, 能耗表在前
pub fn render_csv(
    periods: &[Period],
    board: &OeeScoreBoard,
    locale: &str,
) -> ExportResult<String> {
    let energy = energy_table(periods, locale)?;
    let oee = oee_table(board, locale)?;
    Ok(format!("{}\n{}", energy, oee))
}

/// 渲染并写入文件
pub fn write_csv(
    path: impl AsRef<Path>,
    periods: &[Period],
    board: &OeeScoreBoard,
    locale: &str,
) -> ExportResult<()> {
    let document = render_csv(periods, board, locale)?;
    std::fs::write(path, document)?;
    Ok(())
}

/// 能耗表: Section,Label,Electricity,Gas,Air,Cost
fn energy_table(periods: &[Period], locale: &str) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Section", "Label", "Electricity", "Gas", "Air", "Cost"])?;

    let section = t("export.energy_section");
    for period in periods {
        let record = vec![
            section.clone(),
            period.label(locale).to_string(),
            period.volume(CarrierId::Electricity).to_string(),
            period.volume(CarrierId::Gas).to_string(),
            period.volume(CarrierId::Air).to_string(),
            period.cost.to_string(),
        ];
        writer.write_record(&record)?;
    }

    finish(writer)
}

/// OEE 表: OEE,Line,Availability,Performance,Quality,OEE
fn oee_table(board: &OeeScoreBoard, locale: &str) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["OEE", "Line", "Availability", "Performance", "Quality", "OEE"])?;

    let section = t("export.oee_section");
    for line in &board.lines {
        let name = if locale.starts_with("fa") {
            line.name_fa.as_str()
        } else {
            line.name_en.as_str()
        };
        let record = vec![
            section.clone(),
            name.to_string(),
            line.availability.to_string(),
            line.performance.to_string(),
            line.quality.to_string(),
            line.oee.to_string(),
        ];
        writer.write_record(&record)?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> ExportResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
