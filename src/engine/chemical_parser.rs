// ==========================================
// 纸机日成本核算系统 - 化学品区块解析器
// ==========================================
// 职责: 综合表中化学品区块 → 化学品消耗明细
// 区块: 起始标记行 → 日期表头行 → 逐行化学品,直到结束标记或空名称
// ==========================================

use crate::config::sheet_layout::ChemicalBlockLayout;
use crate::domain::consumption::ChemicalConsumption;
use crate::domain::types::CanonicalDate;
use crate::domain::workbook::Sheet;
use crate::importer::block_scanner::{extract_marker_block, BlockSpec, MarkerMatch};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::normalizer::normalize_date;

/// 读取表头行中的日期列（从 first_col 起,无法识别的列跳过）
pub(crate) fn date_columns(
    sheet: &Sheet,
    header_row: usize,
    first_col: usize,
) -> Vec<(usize, CanonicalDate)> {
    (first_col..sheet.row(header_row).len())
        .filter_map(|col| normalize_date(sheet.cell(header_row, col)).map(|d| (col, d)))
        .collect()
}

// ==========================================
// ChemicalParser
// ==========================================
pub struct ChemicalParser<'a> {
    layout: &'a ChemicalBlockLayout,
    cleaner: DataCleaner,
}

impl<'a> ChemicalParser<'a> {
    pub fn new(layout: &'a ChemicalBlockLayout) -> Self {
        Self {
            layout,
            cleaner: DataCleaner,
        }
    }

    /// 解析综合表中的化学品区块（无起始标记 → 空）
    pub fn parse_sheet(&self, sheet: &Sheet) -> Vec<ChemicalConsumption> {
        let layout = self.layout;
        let spec = BlockSpec {
            label_col: layout.label_col,
            start_markers: &layout.start_markers,
            end_markers: &layout.end_markers,
            match_mode: MarkerMatch::Contains,
            search_rows: 0..sheet.row_count(),
        };

        let block = match extract_marker_block(sheet, &spec) {
            Some(b) => b,
            None => {
                tracing::debug!(sheet = %sheet.name, "未找到化学品区块");
                return Vec::new();
            }
        };

        let header_row = block.marker_row + layout.header_row_offset;
        if header_row >= block.end_row {
            return Vec::new();
        }
        let dates = date_columns(sheet, header_row, layout.first_date_col);

        let mut consumptions = Vec::new();
        for row in (header_row + 1)..block.end_row {
            // 空名称即区块结束
            let chemical = match self.cleaner.cell_text(sheet.cell(row, layout.label_col)) {
                Some(name) => name,
                None => break,
            };
            let unit = self
                .cleaner
                .cell_text(sheet.cell(row, layout.unit_col))
                .unwrap_or_default();

            for (col, date) in &dates {
                let quantity = match self.cleaner.cell_number(sheet.cell(row, *col)) {
                    Some(q) if q > 0.0 => q,
                    _ => continue,
                };
                consumptions.push(ChemicalConsumption {
                    date: *date,
                    chemical: chemical.clone(),
                    quantity,
                    unit: unit.clone(),
                });
            }
        }

        tracing::debug!(
            sheet = %sheet.name,
            dates = dates.len(),
            entries = consumptions.len(),
            "化学品区块解析完成"
        );

        consumptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CellValue;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn label_row(label: &str, unit: &str, values: &[CellValue]) -> Vec<CellValue> {
        let mut row = vec![CellValue::Empty, CellValue::from(label), CellValue::from(unit)];
        row.extend(values.iter().cloned());
        row
    }

    fn mixed_sheet(extra: Vec<Vec<CellValue>>) -> Sheet {
        let mut rows = vec![
            label_row("Fibre Summary", "", &[]),
            label_row("Solenise Chemicals", "", &[]),
            label_row(
                "Chemical",
                "Unit",
                &[CellValue::Number(45296.0), CellValue::from("06-01-2024")],
            ),
            label_row("Defoamer", "kg", &[CellValue::Number(12.0), CellValue::Number(0.0)]),
            label_row("Biocide", "kg", &[CellValue::Empty, CellValue::Number(3.5)]),
        ];
        rows.extend(extra);
        Sheet::new("Consumption Details", rows)
    }

    #[test]
    fn test_parse_chemical_block() {
        let layout = ChemicalBlockLayout::default();
        let sheet = mixed_sheet(vec![
            label_row("Packing Materials", "", &[]),
            label_row("Core", "pcs", &[CellValue::Number(100.0)]),
        ]);

        let result = ChemicalParser::new(&layout).parse_sheet(&sheet);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].chemical, "Defoamer");
        assert_eq!(result[0].date, ymd(2024, 1, 5));
        assert_eq!(result[0].quantity, 12.0);
        assert_eq!(result[0].unit, "kg");
        assert_eq!(result[1].chemical, "Biocide");
        assert_eq!(result[1].date, ymd(2024, 1, 6));
    }

    #[test]
    fn test_blank_name_ends_block() {
        let layout = ChemicalBlockLayout::default();
        let sheet = mixed_sheet(vec![
            vec![],
            label_row("Softener", "kg", &[CellValue::Number(9.0)]),
        ]);

        let result = ChemicalParser::new(&layout).parse_sheet(&sheet);
        assert!(result.iter().all(|c| c.chemical != "Softener"));
    }

    #[test]
    fn test_no_start_marker() {
        let layout = ChemicalBlockLayout::default();
        let sheet = Sheet::new("Consumption Details", vec![label_row("Defoamer", "kg", &[])]);
        assert!(ChemicalParser::new(&layout).parse_sheet(&sheet).is_empty());
    }
}
