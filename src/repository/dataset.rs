// ==========================================
// Smart Vista 能源与OEE仪表盘 - 参考数据集仓储
// ==========================================
// 职责: 持有只读参考数据集 (时间序列 / OEE历史 / 产线 / 目标 / 电价基线)
// 红线: 引擎各节点只读访问, 任何节点不得修改数据集
// ==========================================

use crate::domain::energy::{CarrierMeta, Period};
use crate::domain::goal::EnergyGoal;
use crate::domain::oee::{
    Downtime, DowntimeReason, DowntimeScatterPoint, OeePeriod, ProductionLine, Shift,
};
use crate::domain::types::{CarrierId, TimeframeBucket};
use std::collections::HashMap;

// ==========================================
// DatasetRepository - 只读数据仓储
// ==========================================
pub struct DatasetRepository {
    /// 载体元数据（声明顺序）
    carriers: Vec<CarrierMeta>,
    /// 各时间范围的能耗时间序列
    timelines: HashMap<TimeframeBucket, Vec<Period>>,
    /// 各时间范围的 OEE 历史趋势
    oee_history: HashMap<TimeframeBucket, Vec<OeePeriod>>,
    /// 产线（声明顺序）
    lines: Vec<ProductionLine>,
    /// 节能目标
    goals: Vec<EnergyGoal>,
    /// 停机原因统计（条形图）
    downtime_reasons: Vec<DowntimeReason>,
    /// 停机频次散点（散点图, 与条形图数据源相互独立）
    downtime_scatter: Vec<DowntimeScatterPoint>,
}

impl DatasetRepository {
    /// 构造数据仓储
    ///
    /// # 参数
    /// - `carriers`: 载体元数据（顺序即告警/导出排序）
    /// - `timelines`: 各时间范围的周期序列
    /// - `oee_history`: 各时间范围的 OEE 趋势
    /// - `lines`: 产线记录
    /// - `goals`: 节能目标
    /// - `downtime_reasons`: 停机原因（条形图）
    /// - `downtime_scatter`: 停机频次散点（散点图）
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        carriers: Vec<CarrierMeta>,
        timelines: HashMap<TimeframeBucket, Vec<Period>>,
        oee_history: HashMap<TimeframeBucket, Vec<OeePeriod>>,
        lines: Vec<ProductionLine>,
        goals: Vec<EnergyGoal>,
        downtime_reasons: Vec<DowntimeReason>,
        downtime_scatter: Vec<DowntimeScatterPoint>,
    ) -> Self {
        Self {
            carriers,
            timelines,
            oee_history,
            lines,
            goals,
            downtime_reasons,
            downtime_scatter,
        }
    }

    // ==========================================
    // 查询方法（只读）
    // ==========================================

    /// 所有载体元数据（声明顺序）
    pub fn carriers(&self) -> &[CarrierMeta] {
        &self.carriers
    }

    /// 查询单个载体的元数据
    pub fn carrier_meta(&self, carrier: CarrierId) -> Option<&CarrierMeta> {
        self.carriers.iter().find(|m| m.carrier == carrier)
    }

    /// 查询载体电价（未声明的载体按 0 处理）
    pub fn tariff(&self, carrier: CarrierId) -> f64 {
        self.carrier_meta(carrier).map(|m| m.tariff).unwrap_or(0.0)
    }

    /// 查询载体历史基线
    pub fn baseline(&self, carrier: CarrierId) -> f64 {
        self.carrier_meta(carrier).map(|m| m.baseline).unwrap_or(0.0)
    }

    /// 某时间范围是否有数据
    pub fn has_bucket(&self, bucket: TimeframeBucket) -> bool {
        self.timelines.contains_key(&bucket)
    }

    /// 查询某时间范围的周期序列
    pub fn timeline(&self, bucket: TimeframeBucket) -> Option<&[Period]> {
        self.timelines.get(&bucket).map(|v| v.as_slice())
    }

    /// 查询某时间范围的 OEE 历史趋势
    pub fn oee_trend(&self, bucket: TimeframeBucket) -> Option<&[OeePeriod]> {
        self.oee_history.get(&bucket).map(|v| v.as_slice())
    }

    /// 所有产线（声明顺序）
    pub fn lines(&self) -> &[ProductionLine] {
        &self.lines
    }

    /// 按产线ID查询
    pub fn line(&self, line_id: &str) -> Option<&ProductionLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// 所有节能目标
    pub fn goals(&self) -> &[EnergyGoal] {
        &self.goals
    }

    /// 停机原因统计（条形图）
    pub fn downtime_reasons(&self) -> &[DowntimeReason] {
        &self.downtime_reasons
    }

    /// 停机频次散点（散点图）
    pub fn downtime_scatter(&self) -> &[DowntimeScatterPoint] {
        &self.downtime_scatter
    }

    // ==========================================
    // 演示数据集
    // ==========================================

    /// 构造内置演示数据集
    ///
    /// 数据与前端演示版完全一致, 集成测试与演示二进制共用。
    pub fn demo() -> Self {
        let carriers = vec![
            CarrierMeta {
                carrier: CarrierId::Electricity,
                tariff: 0.12,
                baseline: 8200.0,
            },
            CarrierMeta {
                carrier: CarrierId::Gas,
                tariff: 0.08,
                baseline: 4300.0,
            },
            CarrierMeta {
                carrier: CarrierId::Air,
                tariff: 0.05,
                baseline: 1400.0,
            },
        ];

        let mut timelines = HashMap::new();
        timelines.insert(
            TimeframeBucket::Week,
            vec![
                Period::new("شنبه", "Sat", 1120.0, 580.0, 210.0, 4200.0),
                Period::new("یکشنبه", "Sun", 1180.0, 610.0, 225.0, 4380.0),
                Period::new("دوشنبه", "Mon", 1210.0, 640.0, 240.0, 4510.0),
                Period::new("سه‌شنبه", "Tue", 1190.0, 620.0, 230.0, 4440.0),
                Period::new("چهارشنبه", "Wed", 1255.0, 655.0, 245.0, 4630.0),
                Period::new("پنج‌شنبه", "Thu", 1170.0, 600.0, 220.0, 4320.0),
                Period::new("جمعه", "Fri", 980.0, 540.0, 205.0, 3900.0),
            ],
        );
        timelines.insert(
            TimeframeBucket::Month,
            vec![
                Period::new("هفته ۱", "Week 1", 4700.0, 2400.0, 830.0, 16900.0),
                Period::new("هفته ۲", "Week 2", 4860.0, 2470.0, 860.0, 17420.0),
                Period::new("هفته ۳", "Week 3", 4950.0, 2530.0, 870.0, 17760.0),
                Period::new("هفته ۴", "Week 4", 4820.0, 2460.0, 850.0, 17310.0),
            ],
        );
        timelines.insert(
            TimeframeBucket::Year,
            vec![
                Period::new("بهار", "Spring", 13300.0, 7200.0, 2620.0, 52000.0),
                Period::new("تابستان", "Summer", 14100.0, 7600.0, 2780.0, 54700.0),
                Period::new("پاییز", "Autumn", 12900.0, 6900.0, 2490.0, 49800.0),
                Period::new("زمستان", "Winter", 12500.0, 8100.0, 2700.0, 50500.0),
            ],
        );

        let mut oee_history = HashMap::new();
        oee_history.insert(
            TimeframeBucket::Week,
            vec![
                OeePeriod::new("شنبه", "Sat", &[("L1", 88.0), ("L2", 91.0), ("L3", 86.0)]),
                OeePeriod::new("یکشنبه", "Sun", &[("L1", 87.0), ("L2", 92.0), ("L3", 85.0)]),
                OeePeriod::new("دوشنبه", "Mon", &[("L1", 89.0), ("L2", 93.0), ("L3", 86.0)]),
                OeePeriod::new("سه‌شنبه", "Tue", &[("L1", 90.0), ("L2", 94.0), ("L3", 87.0)]),
                OeePeriod::new("چهارشنبه", "Wed", &[("L1", 89.0), ("L2", 92.0), ("L3", 86.0)]),
                OeePeriod::new("پنج‌شنبه", "Thu", &[("L1", 88.0), ("L2", 91.0), ("L3", 85.0)]),
                OeePeriod::new("جمعه", "Fri", &[("L1", 86.0), ("L2", 90.0), ("L3", 84.0)]),
            ],
        );
        oee_history.insert(
            TimeframeBucket::Month,
            vec![
                OeePeriod::new("هفته ۱", "Week 1", &[("L1", 86.0), ("L2", 90.0), ("L3", 83.0)]),
                OeePeriod::new("هفته ۲", "Week 2", &[("L1", 88.0), ("L2", 92.0), ("L3", 84.0)]),
                OeePeriod::new("هفته ۳", "Week 3", &[("L1", 89.0), ("L2", 92.0), ("L3", 86.0)]),
                OeePeriod::new("هفته ۴", "Week 4", &[("L1", 90.0), ("L2", 93.0), ("L3", 87.0)]),
            ],
        );
        oee_history.insert(
            TimeframeBucket::Year,
            vec![
                OeePeriod::new("بهار", "Spring", &[("L1", 84.0), ("L2", 88.0), ("L3", 82.0)]),
                OeePeriod::new("تابستان", "Summer", &[("L1", 86.0), ("L2", 90.0), ("L3", 84.0)]),
                OeePeriod::new("پاییز", "Autumn", &[("L1", 88.0), ("L2", 91.0), ("L3", 85.0)]),
                OeePeriod::new("زمستان", "Winter", &[("L1", 87.0), ("L2", 90.0), ("L3", 84.0)]),
            ],
        );

        let lines = vec![
            ProductionLine {
                id: "L1".to_string(),
                name_fa: "خط فرمینگ".to_string(),
                name_en: "Forming Line".to_string(),
                availability: 93.0,
                performance: 89.0,
                quality: 97.0,
                shifts: vec![
                    Shift::new("روز", "Day", 94.0, 90.0, 98.0),
                    Shift::new("شب", "Night", 92.0, 88.0, 96.0),
                ],
                downtime: Downtime {
                    planned: 38,
                    unplanned: 42,
                },
            },
            ProductionLine {
                id: "L2".to_string(),
                name_fa: "خط مونتاژ".to_string(),
                name_en: "Assembly Line".to_string(),
                availability: 91.0,
                performance: 90.0,
                quality: 95.0,
                shifts: vec![
                    Shift::new("روز", "Day", 92.0, 91.0, 96.0),
                    Shift::new("شب", "Night", 90.0, 89.0, 94.0),
                ],
                downtime: Downtime {
                    planned: 44,
                    unplanned: 36,
                },
            },
            ProductionLine {
                id: "L3".to_string(),
                name_fa: "خط بسته‌بندی".to_string(),
                name_en: "Packing Line".to_string(),
                availability: 90.0,
                performance: 87.0,
                quality: 96.0,
                shifts: vec![
                    Shift::new("روز", "Day", 91.0, 88.0, 96.0),
                    Shift::new("شب", "Night", 89.0, 86.0, 95.0),
                ],
                downtime: Downtime {
                    planned: 40,
                    unplanned: 48,
                },
            },
        ];

        let goals = vec![
            EnergyGoal::new("G1", "خط X", "Line X", CarrierId::Electricity, 14800.0, 13200.0),
            EnergyGoal::new("G2", "خط Y", "Line Y", CarrierId::Gas, 9300.0, 8520.0),
            EnergyGoal::new("G3", "خط Z", "Line Z", CarrierId::Air, 3100.0, 2670.0),
        ];

        let downtime_reasons = vec![
            DowntimeReason::new("کمبود مواد اولیه", "Material shortage", 46),
            DowntimeReason::new("عیب مکانیکی", "Mechanical fault", 54),
            DowntimeReason::new("تنظیم مجدد", "Changeover", 32),
            DowntimeReason::new("بازرسی کیفیت", "Quality inspection", 25),
            DowntimeReason::new("نگهداری پیشگیرانه", "Preventive maintenance", 29),
        ];

        let downtime_scatter = vec![
            DowntimeScatterPoint::new("عیب مکانیکی", "Mechanical fault", 7, 54),
            DowntimeScatterPoint::new("کمبود مواد", "Material shortage", 5, 42),
            DowntimeScatterPoint::new("قطع برق", "Power loss", 3, 70),
            DowntimeScatterPoint::new("تنظیم اپراتور", "Operator setup", 6, 28),
            DowntimeScatterPoint::new("بازرسی کیفیت", "Quality inspection", 4, 33),
        ];

        Self::new(
            carriers,
            timelines,
            oee_history,
            lines,
            goals,
            downtime_reasons,
            downtime_scatter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_dataset_shape() {
        let repo = DatasetRepository::demo();

        // 三个载体, 三个产线, 三个目标
        assert_eq!(repo.carriers().len(), 3);
        assert_eq!(repo.lines().len(), 3);
        assert_eq!(repo.goals().len(), 3);

        // 所有时间范围都有数据
        for bucket in TimeframeBucket::ALL {
            assert!(repo.has_bucket(bucket));
            assert!(repo.oee_trend(bucket).is_some());
        }

        // 周视图: 7 个周期
        assert_eq!(repo.timeline(TimeframeBucket::Week).unwrap().len(), 7);
        assert_eq!(repo.timeline(TimeframeBucket::Month).unwrap().len(), 4);
        assert_eq!(repo.timeline(TimeframeBucket::Year).unwrap().len(), 4);
    }

    #[test]
    fn test_demo_dataset_carrier_invariant() {
        // 不变式: 同一时间范围内所有周期携带同一组载体
        let repo = DatasetRepository::demo();
        for bucket in TimeframeBucket::ALL {
            for period in repo.timeline(bucket).unwrap() {
                for meta in repo.carriers() {
                    assert!(
                        period.volumes.contains_key(&meta.carrier),
                        "周期 {} 缺少载体 {}",
                        period.label_en,
                        meta.carrier
                    );
                }
            }
        }
    }

    #[test]
    fn test_demo_downtime_tables_are_independent() {
        // 条形图只有分钟数, 散点图带频次, 原因集合部分重叠但不归并
        let repo = DatasetRepository::demo();
        assert_eq!(repo.downtime_reasons().len(), 5);
        assert_eq!(repo.downtime_scatter().len(), 5);

        let power_loss = repo
            .downtime_scatter()
            .iter()
            .find(|p| p.reason_en == "Power loss")
            .unwrap();
        assert_eq!(power_loss.frequency, 3);
        assert_eq!(power_loss.minutes, 70);

        // "Power loss" 与 "Operator setup" 只出现在散点图中
        assert!(!repo
            .downtime_reasons()
            .iter()
            .any(|r| r.reason_en == "Power loss" || r.reason_en == "Operator setup"));
    }

    #[test]
    fn test_tariff_and_baseline() {
        let repo = DatasetRepository::demo();
        assert_eq!(repo.tariff(CarrierId::Electricity), 0.12);
        assert_eq!(repo.tariff(CarrierId::Gas), 0.08);
        assert_eq!(repo.tariff(CarrierId::Air), 0.05);
        assert_eq!(repo.baseline(CarrierId::Electricity), 8200.0);
    }
}
