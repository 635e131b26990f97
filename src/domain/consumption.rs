// ==========================================
// 纸机日成本核算系统 - 消耗领域模型
// ==========================================
// 职责: 原料消耗 / 化学品消耗 / 公用工程消耗
// ==========================================

use crate::domain::types::CanonicalDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawMaterialConsumption - 原料消耗
// ==========================================
// 单价取自同一张表的单价行,不做外部查询
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterialConsumption {
    pub date: CanonicalDate,
    pub material: String,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64, // quantity × rate
}

impl RawMaterialConsumption {
    pub fn new(date: CanonicalDate, material: impl Into<String>, quantity: f64, rate: f64) -> Self {
        Self {
            date,
            material: material.into(),
            quantity,
            rate,
            amount: quantity * rate,
        }
    }
}

// ==========================================
// ChemicalConsumption - 化学品消耗
// ==========================================
// 金额不在解析阶段计算,由汇总引擎按化学品单价表折算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalConsumption {
    pub date: CanonicalDate,
    pub chemical: String,
    pub quantity: f64,
    pub unit: String,
}

// ==========================================
// UtilityConsumption - 公用工程消耗（中间结构）
// ==========================================
// 仅供汇总引擎使用,汇总后丢弃
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityConsumption {
    pub date: CanonicalDate,
    pub steam_t: f64,
    pub lpg_t: f64,
    pub water_m3: f64,
    pub power_kwh: Option<f64>,
    pub downtime_hours: f64,
}

impl UtilityConsumption {
    /// 创建全零记录
    pub fn empty(date: CanonicalDate) -> Self {
        Self {
            date,
            steam_t: 0.0,
            lpg_t: 0.0,
            water_m3: 0.0,
            power_kwh: None,
            downtime_hours: 0.0,
        }
    }

    /// 蒸汽/LPG/水全为 0 视为当日无实测数据
    pub fn has_metered_data(&self) -> bool {
        self.steam_t != 0.0 || self.lpg_t != 0.0 || self.water_m3 != 0.0
    }
}
