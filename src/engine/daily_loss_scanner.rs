// ==========================================
// 纸机日成本核算系统 - 日明细表停机扫描
// ==========================================
// 职责: 以日期命名的明细表 → 停机损失（明细表口径）
// 日期来源: 表名（DD-MM-YYYY）,不读单元格
// 红线: 与汇总表损失拼接,不去重
// ==========================================

use crate::config::sheet_layout::DailySheetLayout;
use crate::domain::production::ProductionLoss;
use crate::domain::types::{CanonicalDate, LossSource};
use crate::domain::workbook::{Sheet, Workbook};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::normalizer::normalize_duration;
use chrono::NaiveDate;

/// 表名是否为 DD-MM-YYYY 形式的真实日期
pub fn sheet_name_date(name: &str) -> Option<CanonicalDate> {
    let trimmed = name.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        2 | 5 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%d-%m-%Y").ok()
}

// ==========================================
// DailyLossScanner
// ==========================================
pub struct DailyLossScanner<'a> {
    layout: &'a DailySheetLayout,
    cleaner: DataCleaner,
}

impl<'a> DailyLossScanner<'a> {
    pub fn new(layout: &'a DailySheetLayout) -> Self {
        Self {
            layout,
            cleaner: DataCleaner,
        }
    }

    /// 扫描全部日明细表（按工作簿表顺序）
    pub fn scan(&self, workbook: &Workbook) -> Vec<ProductionLoss> {
        let mut losses = Vec::new();
        let mut sheet_count = 0usize;

        for sheet in &workbook.sheets {
            if let Some(date) = sheet_name_date(&sheet.name) {
                sheet_count += 1;
                losses.extend(self.scan_sheet(sheet, date));
            }
        }

        tracing::debug!(
            sheets = sheet_count,
            losses = losses.len(),
            "日明细表扫描完成"
        );

        losses
    }

    /// 扫描单张日明细表
    pub fn scan_sheet(&self, sheet: &Sheet, date: CanonicalDate) -> Vec<ProductionLoss> {
        let layout = self.layout;
        let mut losses = Vec::new();

        for row in layout.header_rows..sheet.row_count() {
            let department = match self.cleaner.cell_text(sheet.cell(row, layout.department_col)) {
                Some(d) => d,
                None => continue,
            };
            if self
                .cleaner
                .label_equals(&department, &layout.non_data_labels)
            {
                continue;
            }

            let duration_hours = self.row_duration(sheet, row);
            if duration_hours <= 0.0 {
                continue;
            }

            let remark = layout
                .remark_cols
                .iter()
                .find_map(|col| self.cleaner.cell_text(sheet.cell(row, *col)))
                .unwrap_or_default();

            losses.push(ProductionLoss {
                date,
                department,
                duration_hours,
                remark,
                source: LossSource::DailySheet,
            });
        }

        losses
    }

    /// 合并时长单元格优先;为 0 时回退到小时 + 分钟分列
    fn row_duration(&self, sheet: &Sheet, row: usize) -> f64 {
        let layout = self.layout;
        let combined = normalize_duration(sheet.cell(row, layout.duration_col));
        if combined > 0.0 {
            return combined;
        }

        let hours = self
            .cleaner
            .cell_number(sheet.cell(row, layout.hours_col))
            .unwrap_or(0.0);
        let minutes = self
            .cleaner
            .cell_number(sheet.cell(row, layout.minutes_col))
            .unwrap_or(0.0);
        let total = hours + minutes / 60.0;
        if total.is_finite() && total > 0.0 {
            total
        } else {
            0.0
        }
    }
}
