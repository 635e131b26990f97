// ==========================================
// 纸机日成本核算系统 - 期间汇总
// ==========================================
// 职责: 日成本记录 → 期间合计（产量流转、固定费用分摊、损失按工段）
// 红线: 只读日成本记录,不回写
// ==========================================

use crate::config::costing_config::CostingConfig;
use crate::domain::costing::CostingData;
use crate::domain::types::CanonicalDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 分项成本合计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostComponentTotals {
    pub fiber: f64,
    pub chemicals: f64,
    pub steam: f64,
    pub electricity: f64,
    pub labor: f64,
    pub water: f64,
    pub maintenance: f64,
    pub overhead: f64,
    pub waste: f64,
}

impl CostComponentTotals {
    fn add(&mut self, record: &CostingData) {
        self.fiber += record.fiber_cost;
        self.chemicals += record.chemicals_cost;
        self.steam += record.steam_cost;
        self.electricity += record.electricity_cost;
        self.labor += record.labor_cost;
        self.water += record.water_cost;
        self.maintenance += record.maintenance_cost;
        self.overhead += record.overhead_cost;
        self.waste += record.waste_cost;
    }

    pub fn total(&self) -> f64 {
        self.fiber
            + self.chemicals
            + self.steam
            + self.electricity
            + self.labor
            + self.water
            + self.maintenance
            + self.overhead
            + self.waste
    }
}

// ==========================================
// PeriodSummary - 期间汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub start_date: CanonicalDate,
    pub end_date: CanonicalDate,
    pub days: usize,

    // ===== 产量流转（吨） =====
    pub total_production: f64,
    pub finished_t: f64,    // 复卷成品
    pub transferred_t: f64, // 转库
    pub dispatched_t: f64,  // 发货

    // ===== 成本 =====
    pub variable_cost: f64,
    pub fixed_cost: f64, // 月度固定费用（工资 + 管理 + 利息）
    pub total_cost: f64,
    pub cost_per_dispatched_ton: f64, // 含固定费用;无发货量时为 0
    pub components: CostComponentTotals,

    // ===== 效率 =====
    pub average_efficiency: f64,
    pub total_time_loss: f64,
    pub time_loss_by_department: BTreeMap<String, f64>,
}

impl PeriodSummary {
    /// 由日成本记录生成期间汇总
    ///
    /// # 返回
    /// - None: 无记录
    pub fn from_records(records: &[CostingData], config: &CostingConfig) -> Option<Self> {
        let start_date = records.iter().map(|r| r.date).min()?;
        let end_date = records.iter().map(|r| r.date).max()?;
        let days = records.len();

        let mut components = CostComponentTotals::default();
        let mut time_loss_by_department: BTreeMap<String, f64> = BTreeMap::new();
        let mut total_production = 0.0;
        let mut variable_cost = 0.0;
        let mut total_time_loss = 0.0;
        let mut efficiency_sum = 0.0;

        for record in records {
            total_production += record.total_production;
            variable_cost += record.total_cost;
            total_time_loss += record.total_time_loss;
            efficiency_sum += record.production_efficiency;
            components.add(record);

            for loss in &record.time_losses {
                *time_loss_by_department
                    .entry(loss.department.clone())
                    .or_insert(0.0) += loss.duration_hours;
            }
        }

        let flow = &config.flow;
        let finished_t = total_production * flow.finish_yield;
        let transferred_t = finished_t * flow.transfer_yield;
        let dispatched_t = transferred_t * flow.dispatch_yield;

        let fixed_cost = config.fixed_costs.total();
        let total_cost = variable_cost + fixed_cost;
        let cost_per_dispatched_ton = if dispatched_t > 0.0 {
            total_cost / dispatched_t
        } else {
            0.0
        };

        Some(Self {
            start_date,
            end_date,
            days,
            total_production,
            finished_t,
            transferred_t,
            dispatched_t,
            variable_cost,
            fixed_cost,
            total_cost,
            cost_per_dispatched_ton,
            components,
            average_efficiency: efficiency_sum / days as f64,
            total_time_loss,
            time_loss_by_department,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::production::ProductionLoss;
    use crate::domain::types::{LossSource, UtilitySource};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(
        date: NaiveDate,
        production: f64,
        cost: f64,
        efficiency: f64,
        losses: Vec<(&str, f64)>,
    ) -> CostingData {
        let time_losses: Vec<ProductionLoss> = losses
            .into_iter()
            .map(|(dept, hours)| ProductionLoss {
                date,
                department: dept.to_string(),
                duration_hours: hours,
                remark: String::new(),
                source: LossSource::SummarySheet,
            })
            .collect();
        let total_time_loss = time_losses.iter().map(|l| l.duration_hours).sum();
        CostingData {
            date,
            total_production: production,
            total_cost: cost,
            cost_per_ton: cost / production,
            fiber_cost: cost,
            chemicals_cost: 0.0,
            steam_cost: 0.0,
            electricity_cost: 0.0,
            labor_cost: 0.0,
            water_cost: 0.0,
            maintenance_cost: 0.0,
            overhead_cost: 0.0,
            waste_cost: 0.0,
            quality: "X".to_string(),
            gsm_grade: "18".to_string(),
            raw_materials: vec![],
            chemicals: vec![],
            time_losses,
            total_time_loss,
            production_efficiency: efficiency,
            utility_source: UtilitySource::Estimated,
            recorded_downtime: 0.0,
        }
    }

    #[test]
    fn test_empty_records() {
        assert!(PeriodSummary::from_records(&[], &CostingConfig::default()).is_none());
    }

    #[test]
    fn test_period_totals() {
        let config = CostingConfig::default();
        let records = vec![
            record(ymd(2024, 1, 6), 60.0, 1_000.0, 100.0, vec![]),
            record(ymd(2024, 1, 5), 40.0, 500.0, 50.0, vec![("Winder", 6.0), ("Press", 6.0)]),
        ];

        let summary = PeriodSummary::from_records(&records, &config).unwrap();
        assert_eq!(summary.start_date, ymd(2024, 1, 5));
        assert_eq!(summary.end_date, ymd(2024, 1, 6));
        assert_eq!(summary.days, 2);
        assert_eq!(summary.total_production, 100.0);
        assert_eq!(summary.variable_cost, 1_500.0);
        assert_eq!(summary.components.fiber, 1_500.0);
        assert_eq!(summary.average_efficiency, 75.0);
        assert_eq!(summary.total_time_loss, 12.0);
        assert_eq!(summary.time_loss_by_department.get("Winder"), Some(&6.0));
        assert_eq!(summary.fixed_cost, config.fixed_costs.total());
        assert_eq!(summary.total_cost, 1_500.0 + config.fixed_costs.total());
    }

    #[test]
    fn test_production_flow_yields() {
        let config = CostingConfig::default();
        let records = vec![record(ymd(2024, 1, 5), 100.0, 0.0, 100.0, vec![])];
        let summary = PeriodSummary::from_records(&records, &config).unwrap();

        let finished = 100.0 * config.flow.finish_yield;
        let transferred = finished * config.flow.transfer_yield;
        let dispatched = transferred * config.flow.dispatch_yield;
        assert_eq!(summary.finished_t, finished);
        assert_eq!(summary.transferred_t, transferred);
        assert_eq!(summary.dispatched_t, dispatched);
        assert_eq!(summary.cost_per_dispatched_ton, summary.total_cost / dispatched);
    }
}
