// ==========================================
// 纸机日成本核算系统 - 生产汇总表解析器
// ==========================================
// 职责: 生产汇总表 → 产量记录 + 停机损失（汇总表口径）
// 输入: Workbook + ProductionSheetLayout
// 红线: 表缺失/行不可用 → 空结果,不报错
// ==========================================

use crate::config::sheet_layout::ProductionSheetLayout;
use crate::domain::production::{ProductionLoss, ProductionRecord};
use crate::domain::types::LossSource;
use crate::domain::workbook::{Sheet, Workbook};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::normalizer::{normalize_date, normalize_duration};

/// 生产汇总表解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionParseResult {
    pub records: Vec<ProductionRecord>,
    pub losses: Vec<ProductionLoss>,
    pub sheet_found: bool,
}

// ==========================================
// ProductionParser
// ==========================================
pub struct ProductionParser<'a> {
    layout: &'a ProductionSheetLayout,
    cleaner: DataCleaner,
}

impl<'a> ProductionParser<'a> {
    pub fn new(layout: &'a ProductionSheetLayout) -> Self {
        Self {
            layout,
            cleaner: DataCleaner,
        }
    }

    /// 解析工作簿中的生产汇总表
    pub fn parse(&self, workbook: &Workbook) -> ProductionParseResult {
        match workbook.find_sheet(&self.layout.sheet_names) {
            Some(sheet) => {
                let mut result = self.parse_sheet(sheet);
                result.sheet_found = true;
                result
            }
            None => {
                tracing::warn!(
                    candidates = ?self.layout.sheet_names,
                    "未找到生产汇总表,产量与汇总损失为空"
                );
                ProductionParseResult::default()
            }
        }
    }

    /// 解析单张生产汇总表
    pub fn parse_sheet(&self, sheet: &Sheet) -> ProductionParseResult {
        let layout = self.layout;
        let mut result = ProductionParseResult::default();

        for row in layout.header_rows..sheet.row_count() {
            // 标记行（PM-01-A 等）跳过
            if self.cleaner.is_marker_code(sheet.cell(row, layout.marker_col)) {
                continue;
            }

            let date = match normalize_date(sheet.cell(row, layout.date_col)) {
                Some(d) => d,
                None => continue,
            };

            if let Some(record) = self.read_record(sheet, row, date) {
                result.records.push(record);
            }
            if let Some(loss) = self.read_loss(sheet, row, date) {
                result.losses.push(loss);
            }
        }

        tracing::debug!(
            sheet = %sheet.name,
            records = result.records.len(),
            losses = result.losses.len(),
            "生产汇总表解析完成"
        );

        result
    }

    fn read_record(
        &self,
        sheet: &Sheet,
        row: usize,
        date: chrono::NaiveDate,
    ) -> Option<ProductionRecord> {
        let layout = self.layout;
        let quality = self.cleaner.cell_text(sheet.cell(row, layout.quality_col))?;
        // 定量是等级标签,非数值文本同样有效
        let gsm_cell = sheet.cell(row, layout.gsm_col);
        let gsm_label = self.cleaner.cell_text(gsm_cell)?;
        let gsm = self.cleaner.cell_number(gsm_cell);
        let quantity = self.cleaner.cell_number(sheet.cell(row, layout.quantity_col))?;
        let machine_speed = self.cleaner.cell_number(sheet.cell(row, layout.speed_col));

        Some(ProductionRecord {
            date,
            quality,
            gsm_label,
            gsm,
            quantity,
            machine_speed,
        })
    }

    fn read_loss(
        &self,
        sheet: &Sheet,
        row: usize,
        date: chrono::NaiveDate,
    ) -> Option<ProductionLoss> {
        let layout = self.layout;
        let department = self
            .cleaner
            .cell_text(sheet.cell(row, layout.department_col))?;
        if self
            .cleaner
            .label_equals(&department, &layout.non_data_labels)
        {
            return None;
        }

        let loss_cell = sheet.cell(row, layout.time_loss_col);
        if loss_cell.is_empty() {
            return None;
        }
        let duration_hours = normalize_duration(loss_cell);
        if duration_hours <= 0.0 {
            return None;
        }

        let remark = self
            .cleaner
            .cell_text(sheet.cell(row, layout.remark_col))
            .unwrap_or_default();

        Some(ProductionLoss {
            date,
            department,
            duration_hours,
            remark,
            source: LossSource::SummarySheet,
        })
    }
}
