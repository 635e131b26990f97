// ==========================================
// 纸机日成本核算系统 - 日成本汇总引擎
// ==========================================
// 职责: 按日期关联全部解析事实,计算分项成本与生产效率
// 输入: ExtractedFacts + 注入的 CostingConfig
// 输出: Vec<CostingData>（日期升序）
// 红线: 当日无产量或产量合计为 0 → 不产出记录
// 红线: total_cost 按固定分项顺序累加
// ==========================================

use crate::config::costing_config::CostingConfig;
use crate::domain::consumption::{ChemicalConsumption, RawMaterialConsumption, UtilityConsumption};
use crate::domain::costing::CostingData;
use crate::domain::production::{ProductionLoss, ProductionRecord};
use crate::domain::types::{CanonicalDate, UtilitySource};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::instrument;

/// 一天 24 小时（效率分母）
const HOURS_PER_DAY: f64 = 24.0;

// ==========================================
// ExtractedFacts - 各解析器产出的事实集合
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFacts {
    pub production: Vec<ProductionRecord>,
    pub losses: Vec<ProductionLoss>, // 汇总表 + 日明细表,拼接顺序保留
    pub raw_materials: Vec<RawMaterialConsumption>,
    pub chemicals: Vec<ChemicalConsumption>,
    pub utilities: Vec<UtilityConsumption>,
}

/// 汇总结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationOutcome {
    pub records: Vec<CostingData>,
    pub dropped_dates: Vec<CanonicalDate>, // 有消耗/损失数据但无产量的日期
}

/// 公用工程分项成本
#[derive(Debug, Clone, Copy, PartialEq)]
struct UtilityCosts {
    steam: f64,
    lpg: f64,
    electricity: f64,
    water: f64,
    source: UtilitySource,
    recorded_downtime: f64,
}

/// 按产量加权取众数,并列时取最先出现者
pub fn weighted_mode<I>(items: I) -> Option<String>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut weights: Vec<(String, f64)> = Vec::new();
    for (label, weight) in items {
        match weights.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 += weight,
            None => weights.push((label, weight)),
        }
    }

    let mut best: Option<(String, f64)> = None;
    for (label, weight) in weights {
        let replace = match &best {
            Some((_, w)) => weight > *w,
            None => true,
        };
        if replace {
            best = Some((label, weight));
        }
    }
    best.map(|(label, _)| label)
}

/// 按日期分组（组内保留原始顺序）
fn group_by_date<T, F>(items: &[T], date_of: F) -> BTreeMap<CanonicalDate, Vec<&T>>
where
    F: Fn(&T) -> CanonicalDate,
{
    let mut groups: BTreeMap<CanonicalDate, Vec<&T>> = BTreeMap::new();
    for item in items {
        groups.entry(date_of(item)).or_default().push(item);
    }
    groups
}

// ==========================================
// CostAggregator - 日成本汇总引擎
// ==========================================
pub struct CostAggregator {
    config: Arc<CostingConfig>,
}

impl CostAggregator {
    /// 创建汇总引擎（费率表只读注入）
    pub fn new(config: Arc<CostingConfig>) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 汇总全部事实为日成本记录
    #[instrument(skip(self, facts), fields(production = facts.production.len()))]
    pub fn aggregate(&self, facts: &ExtractedFacts) -> AggregationOutcome {
        let production = group_by_date(&facts.production, |r| r.date);
        let losses = group_by_date(&facts.losses, |l| l.date);
        let raw_materials = group_by_date(&facts.raw_materials, |c| c.date);
        let chemicals = group_by_date(&facts.chemicals, |c| c.date);

        // 同一日期出现多次时取首条
        let mut utilities: BTreeMap<CanonicalDate, &UtilityConsumption> = BTreeMap::new();
        for utility in &facts.utilities {
            utilities.entry(utility.date).or_insert(utility);
        }

        let mut records = Vec::new();
        for (date, day_production) in &production {
            let record = self.compute_day(
                *date,
                day_production,
                losses.get(date).map(Vec::as_slice).unwrap_or(&[]),
                raw_materials.get(date).map(Vec::as_slice).unwrap_or(&[]),
                chemicals.get(date).map(Vec::as_slice).unwrap_or(&[]),
                utilities.get(date).copied(),
            );
            match record {
                Some(r) => records.push(r),
                None => tracing::debug!(%date, "当日产量合计为 0,跳过"),
            }
        }

        let emitted: BTreeSet<CanonicalDate> = records.iter().map(|r| r.date).collect();
        let dropped_dates: Vec<CanonicalDate> = production
            .keys()
            .chain(losses.keys())
            .chain(raw_materials.keys())
            .chain(chemicals.keys())
            .chain(utilities.keys())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|d| !emitted.contains(d))
            .collect();

        if !dropped_dates.is_empty() {
            tracing::info!(
                count = dropped_dates.len(),
                first = %dropped_dates[0],
                "存在无产量日期,未产出成本记录"
            );
        }

        AggregationOutcome {
            records,
            dropped_dates,
        }
    }

    /// 计算单日成本记录
    ///
    /// # 返回
    /// - None: 产量合计不为正
    pub fn compute_day(
        &self,
        date: CanonicalDate,
        production: &[&ProductionRecord],
        losses: &[&ProductionLoss],
        raw_materials: &[&RawMaterialConsumption],
        chemicals: &[&ChemicalConsumption],
        utility: Option<&UtilityConsumption>,
    ) -> Option<CostingData> {
        let rates = &self.config.rates;

        let total_production: f64 = production.iter().map(|r| r.quantity).sum();
        if !total_production.is_finite() || total_production <= 0.0 {
            return None;
        }

        // 1. 纤维 / 化学品
        let fiber_cost: f64 = raw_materials.iter().map(|c| c.amount).sum();
        let chemicals_cost: f64 = chemicals
            .iter()
            .map(|c| c.quantity * self.config.chemicals.rate_for(&c.chemical))
            .sum();

        // 2. 公用工程（实测优先,缺失时按单耗估算）
        let utility_costs = self.utility_costs(total_production, utility);
        let steam_cost = utility_costs.steam + utility_costs.lpg;

        // 3. 吨纸费率
        let labor_cost = total_production * rates.labor_per_ton;
        let maintenance_cost = total_production * rates.maintenance_per_ton;
        let overhead_cost = total_production * rates.overhead_per_ton;
        let waste_cost = total_production * rates.waste_fraction * (fiber_cost / total_production);

        let total_cost = fiber_cost
            + chemicals_cost
            + steam_cost
            + utility_costs.electricity
            + labor_cost
            + utility_costs.water
            + maintenance_cost
            + overhead_cost
            + waste_cost;

        // 4. 主导品种
        let quality = weighted_mode(production.iter().map(|r| (r.quality.clone(), r.quantity)))
            .unwrap_or_default();
        let gsm_grade = weighted_mode(production.iter().map(|r| (r.gsm_grade(), r.quantity)))
            .unwrap_or_default();

        // 5. 生产效率
        let total_time_loss: f64 = losses.iter().map(|l| l.duration_hours).sum();
        let production_efficiency =
            ((HOURS_PER_DAY - total_time_loss) / HOURS_PER_DAY).max(0.0) * 100.0;

        Some(CostingData {
            date,
            total_production,
            total_cost,
            cost_per_ton: total_cost / total_production,
            fiber_cost,
            chemicals_cost,
            steam_cost,
            electricity_cost: utility_costs.electricity,
            labor_cost,
            water_cost: utility_costs.water,
            maintenance_cost,
            overhead_cost,
            waste_cost,
            quality,
            gsm_grade,
            raw_materials: raw_materials.iter().map(|c| (*c).clone()).collect(),
            chemicals: chemicals.iter().map(|c| (*c).clone()).collect(),
            time_losses: losses.iter().map(|l| (*l).clone()).collect(),
            total_time_loss,
            production_efficiency,
            utility_source: utility_costs.source,
            recorded_downtime: utility_costs.recorded_downtime,
        })
    }

    fn utility_costs(&self, production: f64, utility: Option<&UtilityConsumption>) -> UtilityCosts {
        let rates = &self.config.rates;
        let intensity = &self.config.intensity;
        let estimated_electricity =
            production * intensity.electricity_kwh_per_ton * rates.electricity_per_kwh;

        match utility {
            Some(u) => UtilityCosts {
                steam: u.steam_t * rates.steam_per_ton,
                lpg: u.lpg_t * rates.lpg_kg_per_ton * rates.lpg_per_kg,
                electricity: match u.power_kwh {
                    Some(kwh) => kwh * rates.electricity_per_kwh,
                    None => estimated_electricity,
                },
                water: u.water_m3 * rates.water_per_m3,
                source: UtilitySource::Metered,
                recorded_downtime: u.downtime_hours,
            },
            None => UtilityCosts {
                steam: production * intensity.steam_t_per_ton * rates.steam_per_ton,
                lpg: production * intensity.lpg_t_per_ton * rates.lpg_kg_per_ton * rates.lpg_per_kg,
                electricity: estimated_electricity,
                water: production * intensity.water_m3_per_ton * rates.water_per_m3,
                source: UtilitySource::Estimated,
                recorded_downtime: 0.0,
            },
        }
    }
}
