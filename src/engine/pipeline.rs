// ==========================================
// 纸机日成本核算系统 - 核算流水线
// ==========================================
// 职责: 五个解析器 → 汇总引擎,产出日成本记录 + 抽取报告
// 顺序: 解析器之间相互独立（只读同一 Workbook）,汇总严格在全部解析之后
// 红线: 除初始解码外无 I/O;表缺失只记入报告,不中断
// ==========================================

use crate::config::costing_config::CostingConfig;
use crate::domain::costing::CostingData;
use crate::domain::types::CanonicalDate;
use crate::domain::workbook::Workbook;
use crate::engine::aggregator::{CostAggregator, ExtractedFacts};
use crate::engine::chemical_parser::ChemicalParser;
use crate::engine::consumption_parser::ConsumptionParser;
use crate::engine::daily_loss_scanner::DailyLossScanner;
use crate::engine::production_parser::ProductionParser;
use crate::engine::utility_parser::UtilityParser;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalWorkbookReader;
use crate::importer::workbook_reader_trait::WorkbookSource;
use crate::perf::{self, PerfGuard};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// ExtractionReport - 抽取报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub run_id: String,

    // ===== 各解析器事实条数 =====
    pub production_records: usize,
    pub summary_losses: usize,
    pub daily_losses: usize,
    pub raw_materials: usize,
    pub chemicals: usize,
    pub utility_days: usize,

    pub missing_sheets: Vec<String>, // 未找到的固定表（取首个候选名）
    pub dropped_dates: Vec<CanonicalDate>,
    pub emitted_records: usize,
}

/// 一次核算运行的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostingRun {
    pub records: Vec<CostingData>,
    pub report: ExtractionReport,
}

fn first_name(candidates: &[String]) -> String {
    candidates.first().cloned().unwrap_or_default()
}

// ==========================================
// CostingPipeline
// ==========================================
pub struct CostingPipeline {
    config: Arc<CostingConfig>,
    reader: Box<dyn WorkbookSource>,
}

impl CostingPipeline {
    /// 创建流水线（默认按扩展名选择读取器）
    pub fn new(config: Arc<CostingConfig>) -> Self {
        Self {
            config,
            reader: Box::new(UniversalWorkbookReader),
        }
    }

    /// 替换工作簿读取器
    pub fn with_reader(mut self, reader: Box<dyn WorkbookSource>) -> Self {
        self.reader = reader;
        self
    }

    pub fn config(&self) -> Arc<CostingConfig> {
        Arc::clone(&self.config)
    }

    /// 解码文件并运行核算
    pub fn run_file(&self, path: &Path) -> ImportResult<CostingRun> {
        let workbook = self.reader.read_workbook(path)?;
        Ok(self.run(&workbook))
    }

    /// 对已解码工作簿运行核算
    pub fn run(&self, workbook: &Workbook) -> CostingRun {
        let _perf = PerfGuard::new("costing_run");
        let layout = &self.config.layout;
        let mut report = ExtractionReport {
            run_id: Uuid::new_v4().to_string(),
            ..Default::default()
        };

        // 1. 生产汇总表
        let production = ProductionParser::new(&layout.production).parse(workbook);
        if !production.sheet_found {
            report
                .missing_sheets
                .push(first_name(&layout.production.sheet_names));
        }

        // 2. 日明细表
        let daily_losses = DailyLossScanner::new(&layout.daily).scan(workbook);

        // 3. 原料消耗表
        let raw_materials = match ConsumptionParser::new(&layout.consumption).parse(workbook) {
            Some(entries) => entries,
            None => {
                report
                    .missing_sheets
                    .push(first_name(&layout.consumption.sheet_names));
                Vec::new()
            }
        };

        // 4/5. 综合表（化学品 + 公用工程）
        let (chemicals, utilities) = match workbook.find_sheet(&layout.mixed_sheet_names) {
            Some(sheet) => (
                ChemicalParser::new(&layout.chemical).parse_sheet(sheet),
                UtilityParser::new(&layout.utility).parse_sheet(sheet),
            ),
            None => {
                tracing::warn!(
                    candidates = ?layout.mixed_sheet_names,
                    "未找到综合消耗表,化学品为空,公用工程按单耗估算"
                );
                report.missing_sheets.push(first_name(&layout.mixed_sheet_names));
                (Vec::new(), Vec::new())
            }
        };

        report.production_records = production.records.len();
        report.summary_losses = production.losses.len();
        report.daily_losses = daily_losses.len();
        report.raw_materials = raw_materials.len();
        report.chemicals = chemicals.len();
        report.utility_days = utilities.len();

        // 两个损失来源按顺序拼接,不去重
        let mut losses = production.losses;
        losses.extend(daily_losses);

        let facts = ExtractedFacts {
            production: production.records,
            losses,
            raw_materials,
            chemicals,
            utilities,
        };
        perf::record_facts(
            facts.production.len()
                + facts.losses.len()
                + facts.raw_materials.len()
                + facts.chemicals.len()
                + facts.utilities.len(),
        );

        // 6. 汇总
        let outcome = CostAggregator::new(self.config()).aggregate(&facts);
        report.dropped_dates = outcome.dropped_dates;
        report.emitted_records = outcome.records.len();

        tracing::info!(
            run_id = %report.run_id,
            records = report.emitted_records,
            dropped = report.dropped_dates.len(),
            missing_sheets = ?report.missing_sheets,
            "日成本核算完成"
        );

        CostingRun {
            records: outcome.records,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workbook::Sheet;

    #[test]
    fn test_empty_workbook_reports_missing_sheets() {
        let pipeline = CostingPipeline::new(Arc::new(CostingConfig::default()));
        let run = pipeline.run(&Workbook::new(vec![Sheet::new("Notes", vec![])]));

        assert!(run.records.is_empty());
        assert_eq!(
            run.report.missing_sheets,
            vec![
                "Production Summary".to_string(),
                "RM Consumption".to_string(),
                "Consumption Details".to_string(),
            ]
        );
        assert!(Uuid::parse_str(&run.report.run_id).is_ok());
    }

    #[test]
    fn test_run_ids_are_unique() {
        let pipeline = CostingPipeline::new(Arc::new(CostingConfig::default()));
        let workbook = Workbook::default();
        let a = pipeline.run(&workbook).report.run_id;
        let b = pipeline.run(&workbook).report.run_id;
        assert_ne!(a, b);
    }

    #[test]
    fn test_run_file_missing() {
        let pipeline = CostingPipeline::new(Arc::new(CostingConfig::default()));
        assert!(pipeline.run_file(Path::new("no_such_report.xlsx")).is_err());
    }
}
