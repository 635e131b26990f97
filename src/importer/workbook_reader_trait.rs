// ==========================================
// 纸机日成本核算系统 - 工作簿读取 Trait
// ==========================================
// 职责: 定义文件 → Workbook 的解码接口（不包含实现）
// 红线: 解码失败是唯一的致命错误;解析/汇总阶段不做文件 I/O
// ==========================================

use crate::domain::workbook::Workbook;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// WorkbookSource Trait
// ==========================================
// 用途: 工作簿解码接口
// 实现者: ExcelWorkbookReader, CsvWorkbookReader, UniversalWorkbookReader
pub trait WorkbookSource: Send + Sync {
    /// 解码文件为工作簿
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Workbook): 全部工作表（保留原始顺序,坐标为绝对 A1 坐标）
    /// - Err: 文件不存在、格式不支持、解码失败
    fn read_workbook(&self, file_path: &Path) -> ImportResult<Workbook>;
}
