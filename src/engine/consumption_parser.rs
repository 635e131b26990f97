// ==========================================
// 纸机日成本核算系统 - 原料消耗表解析器
// ==========================================
// 职责: 原料消耗表 → 原料消耗明细（金额 = 数量 × 单价）
// 版式: 表头行为原料名称,表头下方固定行为单价,其后为逐日数据
// ==========================================

use crate::config::sheet_layout::ConsumptionSheetLayout;
use crate::domain::consumption::RawMaterialConsumption;
use crate::domain::workbook::{Sheet, Workbook};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::normalizer::normalize_date;

/// 原料列（列号 + 名称 + 单价）
#[derive(Debug, Clone, PartialEq)]
struct MaterialColumn {
    col: usize,
    name: String,
    rate: f64,
}

// ==========================================
// ConsumptionParser
// ==========================================
pub struct ConsumptionParser<'a> {
    layout: &'a ConsumptionSheetLayout,
    cleaner: DataCleaner,
}

impl<'a> ConsumptionParser<'a> {
    pub fn new(layout: &'a ConsumptionSheetLayout) -> Self {
        Self {
            layout,
            cleaner: DataCleaner,
        }
    }

    /// 解析工作簿中的原料消耗表
    ///
    /// # 返回
    /// - Some(Vec): 找到表（可能为空）
    /// - None: 表缺失
    pub fn parse(&self, workbook: &Workbook) -> Option<Vec<RawMaterialConsumption>> {
        match workbook.find_sheet(&self.layout.sheet_names) {
            Some(sheet) => Some(self.parse_sheet(sheet)),
            None => {
                tracing::warn!(
                    candidates = ?self.layout.sheet_names,
                    "未找到原料消耗表,纤维成本为 0"
                );
                None
            }
        }
    }

    /// 解析单张原料消耗表
    pub fn parse_sheet(&self, sheet: &Sheet) -> Vec<RawMaterialConsumption> {
        let layout = self.layout;
        let columns = self.material_columns(sheet);
        let mut consumptions = Vec::new();

        for row in layout.first_data_row()..sheet.row_count() {
            let date = match normalize_date(sheet.cell(row, layout.date_col)) {
                Some(d) => d,
                None => continue,
            };

            for column in &columns {
                let quantity = match self.cleaner.cell_number(sheet.cell(row, column.col)) {
                    Some(q) if q > 0.0 => q,
                    _ => continue,
                };
                consumptions.push(RawMaterialConsumption::new(
                    date,
                    column.name.clone(),
                    quantity,
                    column.rate,
                ));
            }
        }

        tracing::debug!(
            sheet = %sheet.name,
            materials = columns.len(),
            entries = consumptions.len(),
            "原料消耗表解析完成"
        );

        consumptions
    }

    /// 读取表头原料名称与单价行（单价缺失按 0）
    fn material_columns(&self, sheet: &Sheet) -> Vec<MaterialColumn> {
        let layout = self.layout;
        let header = sheet.row(layout.header_row);

        (layout.first_material_col..header.len())
            .filter_map(|col| {
                let name = self.cleaner.cell_text(sheet.cell(layout.header_row, col))?;
                let rate = self
                    .cleaner
                    .cell_number(sheet.cell(layout.rate_row(), col))
                    .unwrap_or(0.0);
                Some(MaterialColumn { col, name, rate })
            })
            .collect()
    }
}
