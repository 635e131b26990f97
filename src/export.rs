// ==========================================
// 纸机日成本核算系统 - 结果导出
// ==========================================
// 支持: JSON（完整记录）/ CSV（每日一行,分项成本展开）
// ==========================================

use crate::domain::costing::CostingData;
use crate::domain::types::UtilitySource;
use crate::importer::error::{ImportError, ImportResult};
use serde::Serialize;
use std::io::Write;

/// CSV 导出行（明细列表不展开）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostingCsvRow {
    pub date: String,
    pub quality: String,
    pub gsm_grade: String,
    pub total_production: f64,
    pub fiber_cost: f64,
    pub chemicals_cost: f64,
    pub steam_cost: f64,
    pub electricity_cost: f64,
    pub labor_cost: f64,
    pub water_cost: f64,
    pub maintenance_cost: f64,
    pub overhead_cost: f64,
    pub waste_cost: f64,
    pub total_cost: f64,
    pub cost_per_ton: f64,
    pub total_time_loss: f64,
    pub production_efficiency: f64,
    pub utility_source: UtilitySource,
}

impl From<&CostingData> for CostingCsvRow {
    fn from(record: &CostingData) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            quality: record.quality.clone(),
            gsm_grade: record.gsm_grade.clone(),
            total_production: record.total_production,
            fiber_cost: record.fiber_cost,
            chemicals_cost: record.chemicals_cost,
            steam_cost: record.steam_cost,
            electricity_cost: record.electricity_cost,
            labor_cost: record.labor_cost,
            water_cost: record.water_cost,
            maintenance_cost: record.maintenance_cost,
            overhead_cost: record.overhead_cost,
            waste_cost: record.waste_cost,
            total_cost: record.total_cost,
            cost_per_ton: record.cost_per_ton,
            total_time_loss: record.total_time_loss,
            production_efficiency: record.production_efficiency,
            utility_source: record.utility_source,
        }
    }
}

/// 导出为格式化 JSON
pub fn write_json<T, W>(value: &T, mut writer: W) -> ImportResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer).map_err(|e| ImportError::ExportError(e.to_string()))?;
    Ok(())
}

/// 导出为 CSV（含表头）
pub fn write_csv<W: Write>(records: &[CostingData], writer: W) -> ImportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(CostingCsvRow::from(record))
            .map_err(|e| ImportError::ExportError(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| ImportError::ExportError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> CostingData {
        CostingData {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            total_production: 100.0,
            total_cost: 2000.0,
            cost_per_ton: 20.0,
            fiber_cost: 2000.0,
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
            time_losses: vec![],
            total_time_loss: 0.0,
            production_efficiency: 100.0,
            utility_source: UtilitySource::Estimated,
            recorded_downtime: 0.0,
        }
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&[sample()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("date,quality,gsm_grade,total_production"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("2024-01-05,X,18,100.0"));
        assert!(row.ends_with("ESTIMATED"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&vec![sample()], &mut buf).unwrap();
        let parsed: Vec<CostingData> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, vec![sample()]);
    }
}
