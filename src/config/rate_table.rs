// ==========================================
// 纸机日成本核算系统 - 成本费率表
// ==========================================
// 职责: 化学品单价表 / 公用工程与吨纸费率 / 单耗常数 / 流程得率 / 月度固定费用
// 红线: 只读配置,由 ConfigManager 加载后注入汇总引擎
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CostRates - 单价与吨纸费率
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    pub steam_per_ton: f64,       // ₹/t 蒸汽
    pub lpg_per_kg: f64,          // ₹/kg LPG
    pub lpg_kg_per_ton: f64,      // 表内 LPG 以吨记录,单价按 kg 计
    pub electricity_per_kwh: f64, // ₹/kWh
    pub water_per_m3: f64,        // ₹/m³
    pub labor_per_ton: f64,       // ₹/t 纸
    pub maintenance_per_ton: f64, // ₹/t 纸
    pub overhead_per_ton: f64,    // ₹/t 纸
    pub waste_fraction: f64,      // 损纸率（按当日平均纤维成本计价）
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            steam_per_ton: 2200.0,
            lpg_per_kg: 70.0,
            lpg_kg_per_ton: 1000.0,
            electricity_per_kwh: 8.5,
            water_per_m3: 25.0,
            labor_per_ton: 3500.0,
            maintenance_per_ton: 1800.0,
            overhead_per_ton: 2500.0,
            waste_fraction: 0.03,
        }
    }
}

// ==========================================
// UtilityIntensity - 吨纸单耗（无实测时估算）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityIntensity {
    pub steam_t_per_ton: f64,
    pub lpg_t_per_ton: f64,
    pub electricity_kwh_per_ton: f64,
    pub water_m3_per_ton: f64,
}

impl Default for UtilityIntensity {
    fn default() -> Self {
        Self {
            steam_t_per_ton: 3.2,
            lpg_t_per_ton: 0.025,
            electricity_kwh_per_ton: 1100.0,
            water_m3_per_ton: 30.0,
        }
    }
}

// ==========================================
// ChemicalRateTable - 化学品单价表
// ==========================================
// 名称匹配忽略大小写与首尾空格;未知化学品使用默认单价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemicalRateTable {
    pub rates: BTreeMap<String, f64>, // 化学品名称 → ₹/kg
    pub default_rate: f64,
}

impl ChemicalRateTable {
    /// 查询化学品单价
    pub fn rate_for(&self, chemical: &str) -> f64 {
        let wanted = chemical.trim();
        self.rates
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, rate)| *rate)
            .unwrap_or(self.default_rate)
    }

    pub fn is_known(&self, chemical: &str) -> bool {
        let wanted = chemical.trim();
        self.rates
            .keys()
            .any(|name| name.trim().eq_ignore_ascii_case(wanted))
    }
}

impl Default for ChemicalRateTable {
    fn default() -> Self {
        let rates = [
            ("Wet Strength Resin", 120.0),
            ("Creping Adhesive", 220.0),
            ("Release Agent", 200.0),
            ("Modifier", 260.0),
            ("Defoamer", 180.0),
            ("Biocide", 250.0),
            ("Retention Aid", 300.0),
            ("Dry Strength Additive", 140.0),
            ("Softener", 150.0),
            ("Caustic Soda", 45.0),
            ("Felt Cleaner", 210.0),
        ]
        .into_iter()
        .map(|(name, rate)| (name.to_string(), rate))
        .collect();

        Self {
            rates,
            default_rate: 100.0,
        }
    }
}

// ==========================================
// ProductionFlow - 流程得率
// ==========================================
// 仅供期间汇总使用,日成本汇总不引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionFlow {
    pub finish_yield: f64,   // 复卷/成品得率
    pub transfer_yield: f64, // 转库得率
    pub dispatch_yield: f64, // 发货得率
}

impl Default for ProductionFlow {
    fn default() -> Self {
        Self {
            finish_yield: 0.95,
            transfer_yield: 0.98,
            dispatch_yield: 0.97,
        }
    }
}

// ==========================================
// MonthlyFixedCosts - 月度固定费用
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyFixedCosts {
    pub salary: f64,
    pub admin: f64,
    pub interest: f64,
}

impl MonthlyFixedCosts {
    pub fn total(&self) -> f64 {
        self.salary + self.admin + self.interest
    }
}

impl Default for MonthlyFixedCosts {
    fn default() -> Self {
        Self {
            salary: 2_500_000.0,
            admin: 800_000.0,
            interest: 1_200_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chemical_rate_lookup_case_insensitive() {
        let table = ChemicalRateTable::default();
        assert_eq!(table.rate_for("defoamer"), 180.0);
        assert_eq!(table.rate_for("  Wet Strength Resin "), 120.0);
        assert!(table.is_known("BIOCIDE"));
    }

    #[test]
    fn test_chemical_rate_unknown_uses_default() {
        let table = ChemicalRateTable::default();
        assert!(!table.is_known("Unobtainium"));
        assert_eq!(table.rate_for("Unobtainium"), table.default_rate);
    }

    #[test]
    fn test_fixed_cost_total() {
        let fixed = MonthlyFixedCosts {
            salary: 10.0,
            admin: 5.0,
            interest: 2.5,
        };
        assert_eq!(fixed.total(), 17.5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rates: CostRates = serde_json::from_str(r#"{"steam_per_ton": 2500.0}"#).unwrap();
        assert_eq!(rates.steam_per_ton, 2500.0);
        assert_eq!(rates.electricity_per_kwh, CostRates::default().electricity_per_kwh);
    }
}
