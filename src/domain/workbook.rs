// ==========================================
// 纸机日成本核算系统 - 工作簿模型
// ==========================================
// 职责: 已解码工作簿的只读视图（表名 → 二维单元格网格）
// 红线: 解析器只读,不修改工作簿
// ==========================================

use crate::domain::types::CellValue;
use serde::{Deserialize, Serialize};

static EMPTY_CELL: CellValue = CellValue::Empty;

// ==========================================
// Sheet - 单张工作表
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>, // 绝对坐标,rows[0][0] 即 A1
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 读取单元格,越界返回 Empty
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 读取整行,越界返回空切片
    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(|r| r.as_slice()).unwrap_or(&[])
    }
}

// ==========================================
// Workbook - 工作簿
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>, // 保留原始表顺序
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// 按名称精确查找
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// 按候选名称查找（忽略大小写与首尾空格,兼容 "Production Report " 这类尾随空格表名）
    pub fn find_sheet(&self, candidates: &[String]) -> Option<&Sheet> {
        candidates.iter().find_map(|wanted| {
            let wanted = wanted.trim();
            self.sheets
                .iter()
                .find(|s| s.name.trim().eq_ignore_ascii_case(wanted))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Workbook {
        Workbook::new(vec![
            Sheet::new("Production Report ", vec![vec![CellValue::from("x")]]),
            Sheet::new("05-01-2024", vec![]),
        ])
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let wb = sample();
        let sheet = wb.sheet("05-01-2024").unwrap();
        assert_eq!(sheet.cell(10, 10), &CellValue::Empty);
        assert!(sheet.row(3).is_empty());
    }

    #[test]
    fn test_find_sheet_tolerates_trailing_space() {
        let wb = sample();
        let found = wb.find_sheet(&["production report".to_string()]);
        assert_eq!(found.map(|s| s.name.as_str()), Some("Production Report "));
        assert!(wb.find_sheet(&["Consumption".to_string()]).is_none());
    }
}
