// ==========================================
// 纸机日成本核算系统 - 导入层
// ==========================================
// 职责: 文件解码、单元格清洗、日期/时长标准化、标记区块定位
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod block_scanner;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod normalizer;
pub mod workbook_reader_trait;

// 重导出核心类型
pub use block_scanner::{extract_marker_block, BlockSpec, MarkerBlock, MarkerMatch};
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvWorkbookReader, ExcelWorkbookReader, UniversalWorkbookReader};
pub use normalizer::{normalize_date, normalize_duration};

// 重导出 Trait 接口
pub use workbook_reader_trait::WorkbookSource;
