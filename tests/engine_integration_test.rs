// ==========================================
// MetricsEngine 集成测试
// ==========================================
// 覆盖: 聚合精确性 / 惰性重算 / 依赖隔离 /
//       目标截断 / 预警确定性 / 订阅分发 / 配置校验
// ==========================================

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

use smart_vista::domain::energy::{CarrierMeta, Period};
use smart_vista::domain::types::{AlertCategory, CarrierId, TimeframeBucket};
use smart_vista::engine::{EngineError, MetricsEngine, NodeId, NodeValue};
use smart_vista::{DashboardConfig, DatasetRepository};

fn demo_engine() -> MetricsEngine {
    MetricsEngine::new(Arc::new(DatasetRepository::demo())).unwrap()
}

fn aggregation_of(engine: &mut MetricsEngine) -> smart_vista::engine::AggregationTotals {
    match engine.evaluate(NodeId::Aggregation).unwrap() {
        NodeValue::Aggregation(v) => v,
        other => panic!("意外的节点值: {:?}", other),
    }
}

// ==========================================
// 聚合精确性
// ==========================================

#[test]
fn test_week_aggregation_exact_sums() {
    smart_vista::logging::init_test();
    let mut engine = demo_engine();
    let agg = aggregation_of(&mut engine);

    assert_eq!(agg.volume(CarrierId::Electricity), 8105.0);
    assert_eq!(agg.volume(CarrierId::Gas), 4245.0);
    assert_eq!(agg.volume(CarrierId::Air), 1575.0);
    assert_eq!(agg.period_cost, 30380.0);
}

#[test]
fn test_timeframe_switch_changes_totals() {
    let mut engine = demo_engine();
    let week = aggregation_of(&mut engine);

    engine.set_timeframe(TimeframeBucket::Year).unwrap();
    let year = aggregation_of(&mut engine);

    assert!(year.total_volume > week.total_volume);
    // 年视图: 13300+14100+12900+12500 = 52800
    assert_eq!(year.volume(CarrierId::Electricity), 52800.0);
}

// ==========================================
// 惰性重算与依赖隔离
// ==========================================

#[test]
fn test_idempotent_reads_do_not_recompute() {
    let mut engine = demo_engine();

    for _ in 0..5 {
        engine.evaluate(NodeId::Alerts).unwrap();
    }

    // 告警链路上的每个节点只算一次
    assert_eq!(engine.executions(NodeId::Aggregation), 1);
    assert_eq!(engine.executions(NodeId::OeeScore), 1);
    assert_eq!(engine.executions(NodeId::Alerts), 1);
}

#[test]
fn test_timeframe_change_leaves_oee_chain_untouched() {
    let mut engine = demo_engine();
    engine.evaluate_all().unwrap();

    let oee_gen = engine.generation(NodeId::OeeScore);
    let goal_gen = engine.generation(NodeId::OeeGoalProgress);

    engine.set_timeframe(TimeframeBucket::Month).unwrap();
    engine.evaluate_all().unwrap();

    assert_eq!(engine.generation(NodeId::OeeScore), oee_gen);
    assert_eq!(engine.generation(NodeId::OeeGoalProgress), goal_gen);
    // 能耗链路已重算
    assert_eq!(engine.executions(NodeId::Aggregation), 2);
    assert_eq!(engine.executions(NodeId::EnergyGoalProgress), 2);
}

#[test]
fn test_carrier_target_change_leaves_cost_breakdown_untouched() {
    let mut engine = demo_engine();
    engine.evaluate_all().unwrap();

    engine.set_carrier_target(CarrierId::Gas, 15.0).unwrap();
    engine.evaluate_all().unwrap();

    assert_eq!(engine.executions(NodeId::Aggregation), 1);
    assert_eq!(engine.executions(NodeId::CostBreakdown), 1);
    assert_eq!(engine.executions(NodeId::OeeScore), 1);
    assert_eq!(engine.executions(NodeId::EnergyGoalProgress), 2);
    assert_eq!(engine.executions(NodeId::Alerts), 2);
}

// ==========================================
// 目标进度截断
// ==========================================

#[test]
fn test_goal_progress_clamped() {
    let mut engine = demo_engine();

    let progress = match engine.evaluate(NodeId::EnergyGoalProgress).unwrap() {
        NodeValue::EnergyGoalProgress(v) => v,
        other => panic!("意外的节点值: {:?}", other),
    };

    for row in &progress.goals {
        assert!((0.0..=100.0).contains(&row.progress_pct));
    }
    for row in &progress.carriers {
        assert!((0.0..=100.0).contains(&row.progress_pct));
    }
    // 压缩空气用量超基线: 达成率为负, 进度截断到 0
    assert_eq!(progress.carriers[2].carrier, CarrierId::Air);
    assert_eq!(progress.carriers[2].progress_pct, 0.0);
}

#[test]
fn test_zero_target_raises_invalid_goal_only_when_target_zero() {
    let store = Arc::new(DatasetRepository::demo());
    let mut targets = BTreeMap::new();
    targets.insert(CarrierId::Electricity, 0.0);
    targets.insert(CarrierId::Gas, 8.0);
    targets.insert(CarrierId::Air, 12.0);
    let config = DashboardConfig::new(
        TimeframeBucket::Week,
        targets,
        DashboardConfig::default().line_targets().clone(),
    );
    let mut engine = MetricsEngine::with_config(store, config).unwrap();

    // 目标为零: InvalidGoal
    let err = engine.evaluate(NodeId::EnergyGoalProgress).unwrap_err();
    assert!(matches!(err, EngineError::InvalidGoal { .. }));

    // 目标修正后即可求值, 达成率为零本身不报错
    engine.set_carrier_target(CarrierId::Electricity, 10.0).unwrap();
    assert!(engine.evaluate(NodeId::EnergyGoalProgress).is_ok());
}

// ==========================================
// 预警
// ==========================================

#[test]
fn test_week_electricity_alert_scenario() {
    let mut engine = demo_engine();

    let alerts = match engine.evaluate(NodeId::Alerts).unwrap() {
        NodeValue::Alerts(v) => v,
        other => panic!("意外的节点值: {:?}", other),
    };

    // 8105 > 8200 x (1 - 10/100) = 7380
    let elec = alerts
        .iter()
        .find(|a| a.entity == "electricity")
        .expect("电载体必须触发预警");
    assert_eq!(elec.category, AlertCategory::Energy);
    assert_eq!(elec.measured, 8105.0);
    assert!((elec.threshold - 7380.0).abs() < 1e-9);
}

#[test]
fn test_alert_order_is_deterministic() {
    let mut a = demo_engine();
    let mut b = demo_engine();

    let first = a.evaluate(NodeId::Alerts).unwrap();
    let second = b.evaluate(NodeId::Alerts).unwrap();
    assert_eq!(first, second);
}

// ==========================================
// 订阅分发
// ==========================================

#[test]
fn test_subscriber_lifecycle() {
    let mut engine = demo_engine();
    let seen: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));

    let seen_clone = Rc::clone(&seen);
    let id = engine.subscribe(
        NodeId::Aggregation,
        Box::new(move |value| {
            if let NodeValue::Aggregation(agg) = value {
                seen_clone.borrow_mut().push(agg.total_volume);
            }
        }),
    );

    engine.evaluate(NodeId::Aggregation).unwrap();
    engine.evaluate(NodeId::Aggregation).unwrap();
    assert_eq!(seen.borrow().len(), 1);

    engine.set_timeframe(TimeframeBucket::Month).unwrap();
    engine.evaluate(NodeId::Aggregation).unwrap();
    assert_eq!(seen.borrow().len(), 2);

    assert!(engine.unsubscribe(id));
    engine.set_timeframe(TimeframeBucket::Week).unwrap();
    engine.evaluate(NodeId::Aggregation).unwrap();
    assert_eq!(seen.borrow().len(), 2);
}

// ==========================================
// 配置校验
// ==========================================

#[test]
fn test_setter_validation_errors() {
    let mut engine = demo_engine();

    assert!(matches!(
        engine.set_carrier_target(CarrierId::Electricity, 4.9),
        Err(EngineError::OutOfRange { .. })
    ));
    assert!(matches!(
        engine.set_carrier_target(CarrierId::Electricity, 25.1),
        Err(EngineError::OutOfRange { .. })
    ));
    assert!(matches!(
        engine.set_line_target("L1", 79.0),
        Err(EngineError::OutOfRange { .. })
    ));
    assert!(matches!(
        engine.set_line_target("L99", 90.0),
        Err(EngineError::InvalidConfig { .. })
    ));

    // 校验失败不产生失效
    engine.evaluate_all().unwrap();
    assert!(matches!(
        engine.set_carrier_target(CarrierId::Gas, 99.0),
        Err(EngineError::OutOfRange { .. })
    ));
    assert!(!engine.is_dirty(NodeId::EnergyGoalProgress));
}

// ==========================================
// 成本口径交叉验证（合成数据集）
// ==========================================

/// 周期自带成本与电价推导成本一致的合成数据集
fn consistent_store() -> DatasetRepository {
    let carriers = vec![
        CarrierMeta {
            carrier: CarrierId::Electricity,
            tariff: 0.12,
            baseline: 4000.0,
        },
        CarrierMeta {
            carrier: CarrierId::Gas,
            tariff: 0.08,
            baseline: 2000.0,
        },
        CarrierMeta {
            carrier: CarrierId::Air,
            tariff: 0.05,
            baseline: 800.0,
        },
    ];

    let mut timelines = HashMap::new();
    timelines.insert(
        TimeframeBucket::Week,
        vec![
            // 1000 x 0.12 + 500 x 0.08 + 200 x 0.05 = 170
            Period::new("روز ۱", "Day 1", 1000.0, 500.0, 200.0, 170.0),
            // 2000 x 0.12 + 1000 x 0.08 + 400 x 0.05 = 340
            Period::new("روز ۲", "Day 2", 2000.0, 1000.0, 400.0, 340.0),
        ],
    );

    DatasetRepository::new(carriers, timelines, HashMap::new(), vec![], vec![], vec![], vec![])
}

#[test]
fn test_stored_and_derived_costs_agree_on_consistent_data() {
    let mut engine = MetricsEngine::new(Arc::new(consistent_store())).unwrap();

    let agg = aggregation_of(&mut engine);
    let breakdown = match engine.evaluate(NodeId::CostBreakdown).unwrap() {
        NodeValue::CostBreakdown(v) => v,
        other => panic!("意外的节点值: {:?}", other),
    };

    assert_eq!(agg.period_cost, 510.0);
    assert!((breakdown.derived_total - 510.0).abs() < 1e-9);
}
