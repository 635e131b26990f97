// ==========================================
// 纸机日成本核算系统 - 领域模型层
// ==========================================
// 职责: 定义工作簿视图、解析产物、日成本记录
// 红线: 不含解析逻辑,不含成本计算逻辑
// ==========================================

pub mod consumption;
pub mod costing;
pub mod production;
pub mod types;
pub mod workbook;

// 重导出核心类型
pub use consumption::{ChemicalConsumption, RawMaterialConsumption, UtilityConsumption};
pub use costing::CostingData;
pub use production::{ProductionLoss, ProductionRecord};
pub use types::{CanonicalDate, CellValue, LossSource, UtilitySource};
pub use workbook::{Sheet, Workbook};
