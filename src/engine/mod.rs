// ==========================================
// 纸机日成本核算系统 - 引擎层
// ==========================================
// 职责: 按表类型解析事实,按日期汇总成本与效率
// 红线: 引擎不做文件 I/O（解码在导入层完成）
// 红线: 解析器互相独立,汇总严格在全部解析之后
// ==========================================

pub mod aggregator;
pub mod chemical_parser;
pub mod consumption_parser;
pub mod daily_loss_scanner;
pub mod period_summary;
pub mod pipeline;
pub mod production_parser;
pub mod utility_parser;

// 重导出核心引擎
pub use aggregator::{weighted_mode, AggregationOutcome, CostAggregator, ExtractedFacts};
pub use chemical_parser::ChemicalParser;
pub use consumption_parser::ConsumptionParser;
pub use daily_loss_scanner::{sheet_name_date, DailyLossScanner};
pub use period_summary::{CostComponentTotals, PeriodSummary};
pub use pipeline::{CostingPipeline, CostingRun, ExtractionReport};
pub use production_parser::{ProductionParseResult, ProductionParser};
pub use utility_parser::UtilityParser;
