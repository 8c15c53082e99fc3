// ==========================================
// Smart Vista 能源与OEE仪表盘 - 能源领域实体
// ==========================================
// 职责: 能源载体元数据 + 时间序列记录
// 不变式: 同一时间范围内所有周期携带同一组载体的数值
// ==========================================

use crate::domain::types::CarrierId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CarrierMeta - 能源载体元数据
// ==========================================
/// 能源载体的固定属性（进程生命周期内不可变）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierMeta {
    pub carrier: CarrierId,
    /// 单位电价/气价（货币单位每 kWh 当量）
    pub tariff: f64,
    /// 历史基线用量（kWh 当量）
    pub baseline: f64,
}

// ==========================================
// Period - 单个周期的用量记录
// ==========================================
/// 一个周期（天/周/季度）内各载体的用量与该周期的总成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// 波斯语标签（如 "شنبه"）
    pub label_fa: String,
    /// 英语标签（如 "Sat"）
    pub label_en: String,
    /// 各载体用量（kWh 当量）
    pub volumes: BTreeMap<CarrierId, f64>,
    /// 该周期的总成本（数据源自带字段，不由电价推导）
    pub cost: f64,
}

impl Period {
    /// 构造一个周期记录
    ///
    /// # 参数
    /// - `label_fa` / `label_en`: 双语标签
    /// - `electricity` / `gas` / `air`: 各载体用量
    /// - `cost`: 周期总成本
    pub fn new(
        label_fa: &str,
        label_en: &str,
        electricity: f64,
        gas: f64,
        air: f64,
        cost: f64,
    ) -> Self {
        let mut volumes = BTreeMap::new();
        volumes.insert(CarrierId::Electricity, electricity);
        volumes.insert(CarrierId::Gas, gas);
        volumes.insert(CarrierId::Air, air);
        Self {
            label_fa: label_fa.to_string(),
            label_en: label_en.to_string(),
            volumes,
            cost,
        }
    }

    /// 读取某载体的用量
    pub fn volume(&self, carrier: CarrierId) -> f64 {
        self.volumes.get(&carrier).copied().unwrap_or(0.0)
    }

    /// 按当前语言返回标签
    pub fn label(&self, locale: &str) -> &str {
        if locale.starts_with("fa") {
            &self.label_fa
        } else {
            &self.label_en
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_volume() {
        let p = Period::new("شنبه", "Sat", 1120.0, 580.0, 210.0, 4200.0);
        assert_eq!(p.volume(CarrierId::Electricity), 1120.0);
        assert_eq!(p.volume(CarrierId::Gas), 580.0);
        assert_eq!(p.volume(CarrierId::Air), 210.0);
        assert_eq!(p.cost, 4200.0);
    }

    #[test]
    fn test_period_label_by_locale() {
        let p = Period::new("شنبه", "Sat", 0.0, 0.0, 0.0, 0.0);
        assert_eq!(p.label("fa"), "شنبه");
        assert_eq!(p.label("en"), "Sat");
    }
}
