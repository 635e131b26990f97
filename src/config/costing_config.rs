// ==========================================
// 纸机日成本核算系统 - 成本核算配置
// ==========================================
// 职责: 汇总全部静态配置（费率/单耗/得率/固定费用/版式）并校验
// ==========================================

use crate::config::rate_table::{
    ChemicalRateTable, CostRates, MonthlyFixedCosts, ProductionFlow, UtilityIntensity,
};
use crate::config::sheet_layout::SheetLayout;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostingConfig {
    pub rates: CostRates,
    pub intensity: UtilityIntensity,
    pub chemicals: ChemicalRateTable,
    pub flow: ProductionFlow,
    pub fixed_costs: MonthlyFixedCosts,
    pub layout: SheetLayout,
}

fn check_non_negative(key: &str, value: f64) -> ImportResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ImportError::ConfigValueError {
            key: key.to_string(),
            value: value.to_string(),
            message: "必须为非负有限数".to_string(),
        });
    }
    Ok(())
}

fn check_yield(key: &str, value: f64) -> ImportResult<()> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(ImportError::ConfigValueError {
            key: key.to_string(),
            value: value.to_string(),
            message: "得率必须在 (0, 1] 区间".to_string(),
        });
    }
    Ok(())
}

impl CostingConfig {
    /// 校验配置取值
    pub fn validate(&self) -> ImportResult<()> {
        let r = &self.rates;
        check_non_negative("rates.steam_per_ton", r.steam_per_ton)?;
        check_non_negative("rates.lpg_per_kg", r.lpg_per_kg)?;
        check_non_negative("rates.lpg_kg_per_ton", r.lpg_kg_per_ton)?;
        check_non_negative("rates.electricity_per_kwh", r.electricity_per_kwh)?;
        check_non_negative("rates.water_per_m3", r.water_per_m3)?;
        check_non_negative("rates.labor_per_ton", r.labor_per_ton)?;
        check_non_negative("rates.maintenance_per_ton", r.maintenance_per_ton)?;
        check_non_negative("rates.overhead_per_ton", r.overhead_per_ton)?;

        if !(0.0..1.0).contains(&r.waste_fraction) {
            return Err(ImportError::ConfigValueError {
                key: "rates.waste_fraction".to_string(),
                value: r.waste_fraction.to_string(),
                message: "损纸率必须在 [0, 1) 区间".to_string(),
            });
        }

        let i = &self.intensity;
        check_non_negative("intensity.steam_t_per_ton", i.steam_t_per_ton)?;
        check_non_negative("intensity.lpg_t_per_ton", i.lpg_t_per_ton)?;
        check_non_negative("intensity.electricity_kwh_per_ton", i.electricity_kwh_per_ton)?;
        check_non_negative("intensity.water_m3_per_ton", i.water_m3_per_ton)?;

        check_non_negative("chemicals.default_rate", self.chemicals.default_rate)?;
        for (name, rate) in &self.chemicals.rates {
            check_non_negative(&format!("chemicals.rates.{}", name), *rate)?;
        }

        check_yield("flow.finish_yield", self.flow.finish_yield)?;
        check_yield("flow.transfer_yield", self.flow.transfer_yield)?;
        check_yield("flow.dispatch_yield", self.flow.dispatch_yield)?;

        check_non_negative("fixed_costs.salary", self.fixed_costs.salary)?;
        check_non_negative("fixed_costs.admin", self.fixed_costs.admin)?;
        check_non_negative("fixed_costs.interest", self.fixed_costs.interest)?;

        let u = &self.layout.utility;
        if u.scan_end_row <= u.scan_start_row {
            return Err(ImportError::ConfigValueError {
                key: "layout.utility.scan_end_row".to_string(),
                value: u.scan_end_row.to_string(),
                message: format!("必须大于 scan_start_row ({})", u.scan_start_row),
            });
        }

        Ok(())
    }
}
