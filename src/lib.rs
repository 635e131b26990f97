// ==========================================
// 纸机日成本核算系统 - 核心库
// ==========================================
// 输入: 多表生产报表（Excel / CSV）
// 输出: 按日期升序的日成本与效率记录
// 系统定位: 报表抽取 + 成本汇总引擎（不含渲染与界面）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 工作簿视图与解析产物
pub mod domain;

// 配置层 - 费率表与版式偏移
pub mod config;

// 导入层 - 解码与标准化
pub mod importer;

// 引擎层 - 解析器与汇总
pub mod engine;

// 结果导出
pub mod export;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CanonicalDate, CellValue, LossSource, UtilitySource};

// 领域实体
pub use domain::{
    ChemicalConsumption, CostingData, ProductionLoss, ProductionRecord, RawMaterialConsumption,
    Sheet, UtilityConsumption, Workbook,
};

// 配置
pub use config::{ConfigManager, CostingConfig, SheetLayout};

// 导入
pub use importer::{normalize_date, normalize_duration, ImportError, ImportResult, WorkbookSource};

// 引擎
pub use engine::{CostAggregator, CostingPipeline, CostingRun, ExtractionReport, PeriodSummary};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "纸机日成本核算系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
