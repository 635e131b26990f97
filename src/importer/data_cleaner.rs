// ==========================================
// 纸机日成本核算系统 - 单元格清洗器
// ==========================================
// 职责: TRIM / 数值提取 / 标记行识别 / 标签匹配
// 红线: 无法识别的单元格一律返回 None/false,不报错
// ==========================================

use crate::domain::types::CellValue;

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本（TRIM）
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 单元格 → 非空文本
    pub fn cell_text(&self, cell: &CellValue) -> Option<String> {
        match cell {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = self.clean_text(s);
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            other => Some(other.to_string()),
        }
    }

    /// 单元格 → 数值（文本中的千分位逗号会被去掉）
    pub fn cell_number(&self, cell: &CellValue) -> Option<f64> {
        match cell {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Text(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                if cleaned.is_empty() {
                    return None;
                }
                cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            _ => None,
        }
    }

    /// 是否为标记行代码（两字母-两数字-一字母,如 PM-01-A）
    pub fn is_marker_code(&self, cell: &CellValue) -> bool {
        let text = match cell {
            CellValue::Text(s) => s.trim(),
            _ => return false,
        };
        let parts: Vec<&str> = text.split('-').collect();
        match parts.as_slice() {
            [letters, digits, suffix] => {
                letters.len() == 2
                    && letters.chars().all(|c| c.is_ascii_alphabetic())
                    && digits.len() == 2
                    && digits.chars().all(|c| c.is_ascii_digit())
                    && suffix.len() == 1
                    && suffix.chars().all(|c| c.is_ascii_alphabetic())
            }
            _ => false,
        }
    }

    /// 标签精确匹配（忽略大小写与首尾空格）
    pub fn label_equals(&self, value: &str, labels: &[String]) -> bool {
        let value = value.trim();
        labels
            .iter()
            .any(|label| label.trim().eq_ignore_ascii_case(value))
    }

    /// 标签包含匹配（忽略大小写）
    pub fn label_contains(&self, value: &str, markers: &[String]) -> bool {
        let value = value.trim().to_lowercase();
        markers
            .iter()
            .map(|m| m.trim().to_lowercase())
            .any(|m| !m.is_empty() && value.contains(&m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.cell_text(&CellValue::Text("  Stock Prep  ".to_string())),
            Some("Stock Prep".to_string())
        );
        assert_eq!(cleaner.cell_text(&CellValue::Text("   ".to_string())), None);
        assert_eq!(cleaner.cell_text(&CellValue::Empty), None);
        assert_eq!(
            cleaner.cell_text(&CellValue::Number(18.0)),
            Some("18".to_string())
        );
    }

    #[test]
    fn test_cell_number() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.cell_number(&CellValue::Number(42.5)), Some(42.5));
        assert_eq!(
            cleaner.cell_number(&CellValue::Text(" 1,250.5 ".to_string())),
            Some(1250.5)
        );
        assert_eq!(cleaner.cell_number(&CellValue::Text("abc".to_string())), None);
        assert_eq!(cleaner.cell_number(&CellValue::Text("".to_string())), None);
        assert_eq!(cleaner.cell_number(&CellValue::Number(f64::INFINITY)), None);
        assert_eq!(cleaner.cell_number(&CellValue::Empty), None);
    }

    #[test]
    fn test_is_marker_code() {
        let cleaner = DataCleaner;
        assert!(cleaner.is_marker_code(&CellValue::from("PM-01-A")));
        assert!(cleaner.is_marker_code(&CellValue::from(" tm-12-b ")));
        assert!(!cleaner.is_marker_code(&CellValue::from("PM-1-A")));
        assert!(!cleaner.is_marker_code(&CellValue::from("PMX-01-A")));
        assert!(!cleaner.is_marker_code(&CellValue::from("05-01-2024")));
        assert!(!cleaner.is_marker_code(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_label_matching() {
        let cleaner = DataCleaner;
        let labels = vec!["day total".to_string()];
        assert!(cleaner.label_equals(" Day Total ", &labels));
        assert!(!cleaner.label_equals("Day Total Loss", &labels));

        let markers = vec!["Solenise Chemicals".to_string()];
        assert!(cleaner.label_contains("SOLENISE CHEMICALS (kg)", &markers));
        assert!(!cleaner.label_contains("Packing Materials", &markers));
    }
}
