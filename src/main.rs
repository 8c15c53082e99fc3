// ==========================================
// Smart Vista 能源与OEE仪表盘 - 演示入口
// ==========================================
// 技术栈: Rust + tracing
// 系统定位: 指标推导引擎的命令行演示
// ==========================================

use std::sync::Arc;

use smart_vista::{CarrierId, DashboardApi, DatasetRepository};

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    smart_vista::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", smart_vista::APP_NAME);
    tracing::info!("系统版本: {}", smart_vista::VERSION);
    tracing::info!("启动时间: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    tracing::info!("==================================================");

    // 内置演示数据集 + 默认配置
    let store = Arc::new(DatasetRepository::demo());
    let mut api = DashboardApi::new(store)?;

    // 概览
    let overview = api.overview()?;
    tracing::info!("时间范围: {}", overview.timeframe.label());
    tracing::info!("总用量: {} kWh 当量", overview.total_volume);
    tracing::info!("周期成本: {}", overview.period_cost);
    tracing::info!("推导成本: {}", overview.derived_cost);
    tracing::info!("平均 OEE: {}%", overview.average_oee);

    // 各载体基线
    for carrier in CarrierId::ALL {
        let baseline = api.engine_mut().store().baseline(carrier);
        tracing::info!("载体 {}: 基线 {} kWh 当量", carrier.label(), baseline);
    }

    // 预警
    let alerts = api.alerts()?;
    if alerts.is_empty() {
        tracing::info!("{}", api.status_message()?);
    } else {
        tracing::warn!("当前预警 {} 条:", alerts.len());
        for alert in &alerts {
            tracing::warn!(
                "[{}] {} (实测 {}, 阈值 {})",
                alert.severity,
                alert.message,
                alert.measured,
                alert.threshold
            );
        }
    }

    // 切换到月视图再看一次概览
    api.set_timeframe("month")?;
    let overview = api.overview()?;
    tracing::info!("月视图总用量: {} kWh 当量", overview.total_volume);

    // 导出当前视图
    let export_path = "dashboard-export.csv";
    api.export_csv_to(export_path)?;
    tracing::info!("导出完成: {}", export_path);

    Ok(())
}
