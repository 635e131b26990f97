// ==========================================
// 纸机日成本核算系统 - 标记区块扫描
// ==========================================
// 职责: 在同一张表内按标记文本切出子表（起始标记 → 结束标记/范围末尾）
// 用途: 化学品区块与公用工程区块共用
// ==========================================

use crate::domain::workbook::Sheet;
use crate::importer::data_cleaner::DataCleaner;
use std::ops::Range;

/// 标记匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMatch {
    Contains, // 标签包含标记文本
    Exact,    // 标签等于标记文本
}

/// 区块扫描参数
#[derive(Debug, Clone)]
pub struct BlockSpec<'a> {
    pub label_col: usize,
    pub start_markers: &'a [String],
    pub end_markers: &'a [String],
    pub match_mode: MarkerMatch,
    pub search_rows: Range<usize>, // 超出表范围部分自动截断
}

/// 扫描得到的区块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBlock {
    pub marker_row: usize,
    pub end_row: usize, // 不含;为结束标记行或扫描范围末尾
    pub end_marker: Option<String>,
}

impl MarkerBlock {
    /// 起始标记之后、结束标记之前的行
    pub fn body_rows(&self) -> Range<usize> {
        (self.marker_row + 1)..self.end_row
    }
}

fn marker_hit(cleaner: &DataCleaner, label: &str, markers: &[String], mode: MarkerMatch) -> bool {
    match mode {
        MarkerMatch::Contains => cleaner.label_contains(label, markers),
        MarkerMatch::Exact => cleaner.label_equals(label, markers),
    }
}

/// 切出标记区块
///
/// # 返回
/// - Some(MarkerBlock): 找到起始标记
/// - None: 范围内无起始标记（调用方按空结果处理）
pub fn extract_marker_block(sheet: &Sheet, spec: &BlockSpec<'_>) -> Option<MarkerBlock> {
    let cleaner = DataCleaner;
    let end = spec.search_rows.end.min(sheet.row_count());
    let start = spec.search_rows.start.min(end);

    let label_at = |row: usize| cleaner.cell_text(sheet.cell(row, spec.label_col));

    let marker_row = (start..end).find(|&row| {
        label_at(row)
            .map(|label| marker_hit(&cleaner, &label, spec.start_markers, spec.match_mode))
            .unwrap_or(false)
    })?;

    let mut block = MarkerBlock {
        marker_row,
        end_row: end,
        end_marker: None,
    };

    for row in (marker_row + 1)..end {
        if let Some(label) = label_at(row) {
            if marker_hit(&cleaner, &label, spec.end_markers, spec.match_mode) {
                block.end_row = row;
                block.end_marker = Some(label);
                break;
            }
        }
    }

    tracing::debug!(
        sheet = %sheet.name,
        marker_row = block.marker_row,
        end_row = block.end_row,
        end_marker = ?block.end_marker,
        "标记区块定位完成"
    );

    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CellValue;

    fn labelled_sheet(labels: &[&str]) -> Sheet {
        let rows = labels
            .iter()
            .map(|label| vec![CellValue::Empty, CellValue::from(*label)])
            .collect();
        Sheet::new("Consumption Details", rows)
    }

    #[test]
    fn test_block_between_markers() {
        let sheet = labelled_sheet(&[
            "Fibre",
            "Solenise Chemicals",
            "Date",
            "Defoamer",
            "Biocide",
            "Packing Materials",
            "Core",
        ]);
        let start = vec!["solenise chemicals".to_string()];
        let end = vec!["packing materials".to_string()];
        let spec = BlockSpec {
            label_col: 1,
            start_markers: &start,
            end_markers: &end,
            match_mode: MarkerMatch::Contains,
            search_rows: 0..usize::MAX,
        };

        let block = extract_marker_block(&sheet, &spec).unwrap();
        assert_eq!(block.marker_row, 1);
        assert_eq!(block.end_row, 5);
        assert_eq!(block.body_rows(), 2..5);
        assert_eq!(block.end_marker.as_deref(), Some("Packing Materials"));
    }

    #[test]
    fn test_block_without_end_marker_runs_to_range_end() {
        let sheet = labelled_sheet(&["Utility Consumption", "Steam Consumption", "Down Time"]);
        let start = vec!["utility consumption".to_string()];
        let spec = BlockSpec {
            label_col: 1,
            start_markers: &start,
            end_markers: &[],
            match_mode: MarkerMatch::Exact,
            search_rows: 0..150,
        };

        let block = extract_marker_block(&sheet, &spec).unwrap();
        assert_eq!(block.marker_row, 0);
        assert_eq!(block.end_row, 3);
        assert_eq!(block.end_marker, None);
    }

    #[test]
    fn test_marker_outside_search_range_not_found() {
        let sheet = labelled_sheet(&["x", "x", "x", "Utility Consumption"]);
        let start = vec!["utility consumption".to_string()];
        let spec = BlockSpec {
            label_col: 1,
            start_markers: &start,
            end_markers: &[],
            match_mode: MarkerMatch::Exact,
            search_rows: 0..3,
        };
        assert!(extract_marker_block(&sheet, &spec).is_none());
    }

    #[test]
    fn test_exact_mode_rejects_partial_label() {
        let sheet = labelled_sheet(&["Utility Consumption Summary"]);
        let start = vec!["utility consumption".to_string()];
        let spec = BlockSpec {
            label_col: 1,
            start_markers: &start,
            end_markers: &[],
            match_mode: MarkerMatch::Exact,
            search_rows: 0..10,
        };
        assert!(extract_marker_block(&sheet, &spec).is_none());
    }
}
