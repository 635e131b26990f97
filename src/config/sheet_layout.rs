// ==========================================
// 纸机日成本核算系统 - 报表版式偏移表
// ==========================================
// 职责: 按表类型集中定义行列偏移与标记文本
// 红线: 版式漂移只改这里;版式不匹配一律解析为空,不报错
// ==========================================
// 行列号均为 0 起始（A 列 = 0,第 1 行 = 0）
// ==========================================

use serde::{Deserialize, Serialize};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ==========================================
// 生产汇总表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionSheetLayout {
    pub sheet_names: Vec<String>,
    pub header_rows: usize,
    pub marker_col: usize, // 标记行代码（如 PM-01-A）所在列
    pub date_col: usize,
    pub quality_col: usize,
    pub gsm_col: usize,
    pub quantity_col: usize,
    pub speed_col: usize,
    pub department_col: usize,
    pub time_loss_col: usize,
    pub remark_col: usize,
    pub non_data_labels: Vec<String>,
}

impl Default for ProductionSheetLayout {
    fn default() -> Self {
        Self {
            sheet_names: strings(&["Production Summary"]),
            header_rows: 3,
            marker_col: 0,
            date_col: 1,
            quality_col: 2,
            gsm_col: 3,
            quantity_col: 4,
            speed_col: 5,
            department_col: 8,
            time_loss_col: 9,
            remark_col: 10,
            non_data_labels: strings(&["day total", "total", "grand total", "month total"]),
        }
    }
}

// ==========================================
// 日明细表（以 DD-MM-YYYY 命名）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySheetLayout {
    pub header_rows: usize,
    pub department_col: usize,
    pub duration_col: usize, // 合并时长单元格
    pub hours_col: usize,    // 分列时长: 小时
    pub minutes_col: usize,  // 分列时长: 分钟
    pub remark_cols: Vec<usize>,
    pub non_data_labels: Vec<String>,
}

impl Default for DailySheetLayout {
    fn default() -> Self {
        Self {
            header_rows: 4,
            department_col: 1,
            duration_col: 2,
            hours_col: 3,
            minutes_col: 4,
            remark_cols: vec![5, 6],
            non_data_labels: strings(&[
                "total",
                "day total",
                "grand total",
                "department",
                "total time loss",
            ]),
        }
    }
}

// ==========================================
// 原料消耗表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionSheetLayout {
    pub sheet_names: Vec<String>,
    pub header_row: usize,      // 原料名称行
    pub rate_row_offset: usize, // 单价行 = header_row + offset
    pub first_material_col: usize,
    pub date_col: usize,
}

impl ConsumptionSheetLayout {
    pub fn rate_row(&self) -> usize {
        self.header_row + self.rate_row_offset
    }

    pub fn first_data_row(&self) -> usize {
        self.rate_row() + 1
    }
}

impl Default for ConsumptionSheetLayout {
    fn default() -> Self {
        Self {
            sheet_names: strings(&["RM Consumption"]),
            header_row: 2,
            rate_row_offset: 2,
            first_material_col: 1,
            date_col: 0,
        }
    }
}

// ==========================================
// 化学品区块（综合表内）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemicalBlockLayout {
    pub label_col: usize,
    pub unit_col: usize,
    pub first_date_col: usize,
    pub header_row_offset: usize, // 日期表头相对起始标记行的偏移
    pub start_markers: Vec<String>,
    pub end_markers: Vec<String>,
}

impl Default for ChemicalBlockLayout {
    fn default() -> Self {
        Self {
            label_col: 1,
            unit_col: 2,
            first_date_col: 3,
            header_row_offset: 1,
            start_markers: strings(&["solenise chemicals"]),
            end_markers: strings(&["packing materials", "machine production"]),
        }
    }
}

// ==========================================
// 公用工程区块（综合表内,限定扫描行范围）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityBlockLayout {
    pub label_col: usize,
    pub first_date_col: usize,
    pub scan_start_row: usize,
    pub scan_end_row: usize,        // 不含
    pub header_row: Option<usize>,  // 日期表头行;缺省取起始标记行或首个标签行的上一行
    pub start_markers: Vec<String>, // 可为空
    pub steam_marker: String,
    pub lpg_marker: String,
    pub water_marker: String,
    pub power_marker: String,
    pub downtime_marker: String,
}

impl Default for UtilityBlockLayout {
    fn default() -> Self {
        Self {
            label_col: 1,
            first_date_col: 2,
            scan_start_row: 0,
            scan_end_row: 150,
            header_row: None,
            start_markers: strings(&["utility consumption"]),
            steam_marker: "steam consumption".to_string(),
            lpg_marker: "lpg consumption".to_string(),
            water_marker: "water consumption".to_string(),
            power_marker: "power consumption".to_string(),
            downtime_marker: "down time".to_string(),
        }
    }
}

// ==========================================
// SheetLayout - 全部表类型的版式
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub production: ProductionSheetLayout,
    pub daily: DailySheetLayout,
    pub consumption: ConsumptionSheetLayout,
    pub mixed_sheet_names: Vec<String>, // 化学品 + 公用工程综合表
    pub chemical: ChemicalBlockLayout,
    pub utility: UtilityBlockLayout,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            production: ProductionSheetLayout::default(),
            daily: DailySheetLayout::default(),
            consumption: ConsumptionSheetLayout::default(),
            mixed_sheet_names: strings(&["Consumption Details"]),
            chemical: ChemicalBlockLayout::default(),
            utility: UtilityBlockLayout::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumption_rows_derived_from_header() {
        let layout = ConsumptionSheetLayout::default();
        assert_eq!(layout.rate_row(), 4);
        assert_eq!(layout.first_data_row(), 5);
    }

    #[test]
    fn test_layout_override_from_json() {
        let layout: SheetLayout =
            serde_json::from_str(r#"{"production": {"sheet_names": ["PM3 Production"]}}"#)
                .unwrap();
        assert_eq!(layout.production.sheet_names, vec!["PM3 Production".to_string()]);
        // 未覆写的字段保持默认
        assert_eq!(layout.production.header_rows, 3);
        assert_eq!(layout.utility.scan_end_row, 150);
    }
}
