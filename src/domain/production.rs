// ==========================================
// 纸机日成本核算系统 - 生产领域模型
// ==========================================
// 职责: 产量记录 / 停机损失记录
// 用途: 解析器写入,汇总引擎只读
// ==========================================

use crate::domain::types::{CanonicalDate, LossSource};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRecord - 产量记录
// ==========================================
// 同一天可有多条（不同批次/品种）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date: CanonicalDate,
    pub quality: String,            // 品种
    pub gsm_label: String,          // 定量等级原文（"18" / "18 GSM" / "17/18"）
    pub gsm: Option<f64>,           // 定量 g/m²,仅当原文为纯数值
    pub quantity: f64,              // 产量（吨）
    pub machine_speed: Option<f64>, // 车速 m/min
}

impl ProductionRecord {
    /// 定量等级标签（数值单元格 18.0 → "18"）
    pub fn gsm_grade(&self) -> String {
        self.gsm_label.clone()
    }
}

// ==========================================
// ProductionLoss - 停机损失
// ==========================================
// 红线: duration_hours >= 0,且只有 > 0 的记录才会被产出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLoss {
    pub date: CanonicalDate,
    pub department: String,
    pub duration_hours: f64,
    pub remark: String,
    pub source: LossSource,
}
