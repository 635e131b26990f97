// ==========================================
// 纸机日成本核算系统 - 日成本记录
// ==========================================
// 职责: 汇总引擎的最终输出对象
// 红线: 每日一条,创建后不可修改,按日期升序输出
// ==========================================

use crate::domain::consumption::{ChemicalConsumption, RawMaterialConsumption};
use crate::domain::production::ProductionLoss;
use crate::domain::types::{CanonicalDate, UtilitySource};
use serde::{Deserialize, Serialize};

// ==========================================
// CostingData - 日成本记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostingData {
    pub date: CanonicalDate,

    // ===== 产量与总成本 =====
    pub total_production: f64, // 吨
    pub total_cost: f64,       // ₹
    pub cost_per_ton: f64,     // ₹/t (PMT)

    // ===== 成本分项 =====
    pub fiber_cost: f64,
    pub chemicals_cost: f64,
    pub steam_cost: f64, // 蒸汽 + LPG
    pub electricity_cost: f64,
    pub labor_cost: f64,
    pub water_cost: f64,
    pub maintenance_cost: f64,
    pub overhead_cost: f64,
    pub waste_cost: f64,

    // ===== 主导品种 =====
    pub quality: String,
    pub gsm_grade: String,

    // ===== 明细 =====
    pub raw_materials: Vec<RawMaterialConsumption>,
    pub chemicals: Vec<ChemicalConsumption>,
    pub time_losses: Vec<ProductionLoss>,

    // ===== 效率 =====
    pub total_time_loss: f64,       // 小时
    pub production_efficiency: f64, // %

    // ===== 公用工程口径 =====
    pub utility_source: UtilitySource,
    pub recorded_downtime: f64, // 公用工程表记录的停机小时（仅展示）
}

impl CostingData {
    /// 分项成本之和（与 total_cost 的累加顺序一致）
    pub fn component_sum(&self) -> f64 {
        self.fiber_cost
            + self.chemicals_cost
            + self.steam_cost
            + self.electricity_cost
            + self.labor_cost
            + self.water_cost
            + self.maintenance_cost
            + self.overhead_cost
            + self.waste_cost
    }
}
