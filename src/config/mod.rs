// ==========================================
// 纸机日成本核算系统 - 配置层
// ==========================================
// 职责: 费率表、单耗常数、报表版式偏移的加载与校验
// 存储: JSON 文件 / 内置默认值
// ==========================================

pub mod config_manager;
pub mod costing_config;
pub mod rate_table;
pub mod sheet_layout;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager, ConfigSource};
pub use costing_config::CostingConfig;
pub use rate_table::{
    ChemicalRateTable, CostRates, MonthlyFixedCosts, ProductionFlow, UtilityIntensity,
};
pub use sheet_layout::{
    ChemicalBlockLayout, ConsumptionSheetLayout, DailySheetLayout, ProductionSheetLayout,
    SheetLayout, UtilityBlockLayout,
};
