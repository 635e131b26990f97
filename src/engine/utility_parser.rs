// ==========================================
// 纸机日成本核算系统 - 公用工程区块解析器
// ==========================================
// 职责: 综合表中公用工程区块 → 逐日蒸汽/LPG/水/电/停机
// 区块: 起始标记行即日期表头（可缺省）;按精确标签取行
// 红线: 蒸汽、LPG、水均为 0 的日期丢弃,由汇总引擎按单耗估算
// ==========================================

use crate::config::sheet_layout::UtilityBlockLayout;
use crate::domain::consumption::UtilityConsumption;
use crate::domain::workbook::Sheet;
use crate::engine::chemical_parser::date_columns;
use crate::importer::block_scanner::{extract_marker_block, BlockSpec, MarkerMatch};
use crate::importer::data_cleaner::DataCleaner;
use std::ops::Range;

// ==========================================
// UtilityParser
// ==========================================
pub struct UtilityParser<'a> {
    layout: &'a UtilityBlockLayout,
    cleaner: DataCleaner,
}

impl<'a> UtilityParser<'a> {
    pub fn new(layout: &'a UtilityBlockLayout) -> Self {
        Self {
            layout,
            cleaner: DataCleaner,
        }
    }

    /// 解析综合表中的公用工程区块
    ///
    /// # 定位
    /// - 标签行: 扫描范围内按精确标签查找;有起始标记时限定在区块内
    /// - 日期表头: 配置的 header_row > 起始标记行 > 首个标签行的上一行
    pub fn parse_sheet(&self, sheet: &Sheet) -> Vec<UtilityConsumption> {
        let layout = self.layout;
        let spec = BlockSpec {
            label_col: layout.label_col,
            start_markers: &layout.start_markers,
            end_markers: &[],
            match_mode: MarkerMatch::Exact,
            search_rows: layout.scan_start_row..layout.scan_end_row,
        };

        let block = extract_marker_block(sheet, &spec);
        let search_rows = match &block {
            Some(b) => b.body_rows(),
            None => {
                let end = layout.scan_end_row.min(sheet.row_count());
                layout.scan_start_row.min(end)..end
            }
        };

        let steam_row = self.find_row(sheet, search_rows.clone(), &layout.steam_marker);
        let lpg_row = self.find_row(sheet, search_rows.clone(), &layout.lpg_marker);
        let water_row = self.find_row(sheet, search_rows.clone(), &layout.water_marker);
        let power_row = self.find_row(sheet, search_rows.clone(), &layout.power_marker);
        let downtime_row = self.find_row(sheet, search_rows, &layout.downtime_marker);

        let first_marker_row = [steam_row, lpg_row, water_row, power_row, downtime_row]
            .into_iter()
            .flatten()
            .min();
        let first_marker_row = match first_marker_row {
            Some(row) => row,
            None => {
                tracing::debug!(sheet = %sheet.name, "未找到公用工程标签行");
                return Vec::new();
            }
        };

        let header_row = layout
            .header_row
            .or(block.as_ref().map(|b| b.marker_row))
            .or_else(|| first_marker_row.checked_sub(1));
        let header_row = match header_row {
            Some(row) => row,
            None => {
                tracing::warn!(sheet = %sheet.name, "公用工程标签行之上无日期表头");
                return Vec::new();
            }
        };
        if block.is_none() {
            tracing::debug!(
                sheet = %sheet.name,
                header_row,
                "无起始标记,按标签行定位公用工程区块"
            );
        }

        let dates = date_columns(sheet, header_row, layout.first_date_col);
        let mut utilities = Vec::new();
        let mut dropped = 0usize;

        for (col, date) in dates {
            let value_at = |row: Option<usize>| -> f64 {
                row.and_then(|r| self.cleaner.cell_number(sheet.cell(r, col)))
                    .filter(|v| *v > 0.0)
                    .unwrap_or(0.0)
            };

            let mut utility = UtilityConsumption::empty(date);
            utility.steam_t = value_at(steam_row);
            utility.lpg_t = value_at(lpg_row);
            utility.water_m3 = value_at(water_row);
            utility.power_kwh = power_row
                .and_then(|r| self.cleaner.cell_number(sheet.cell(r, col)))
                .filter(|v| *v > 0.0);
            utility.downtime_hours = value_at(downtime_row);

            if utility.has_metered_data() {
                utilities.push(utility);
            } else {
                dropped += 1;
            }
        }

        tracing::debug!(
            sheet = %sheet.name,
            days = utilities.len(),
            dropped,
            "公用工程区块解析完成"
        );

        utilities
    }

    /// 范围内按精确标签定位行（首个命中）
    fn find_row(&self, sheet: &Sheet, mut rows: Range<usize>, marker: &str) -> Option<usize> {
        let markers = [marker.to_string()];
        rows.find(|&row| {
            self.cleaner
                .cell_text(sheet.cell(row, self.layout.label_col))
                .map(|label| self.cleaner.label_equals(&label, &markers))
                .unwrap_or(false)
        })
    }
}
