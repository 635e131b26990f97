// ==========================================
// 纸机日成本核算系统 - 领域类型定义
// ==========================================
// 职责: 单元格原始值、日期键、来源标记等基础类型
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 规范日期（所有解析器之间唯一的关联键）
pub type CanonicalDate = NaiveDate;

// ==========================================
// 单元格原始值 (Cell Value)
// ==========================================
// 由工作簿读取器产出,解析器只读
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// 是否为空（空白字符串同样视为空）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        if v.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(v.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::from(v.as_str())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

// ==========================================
// 停机损失来源 (Loss Source)
// ==========================================
// 两个来源独立追加,不去重
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LossSource {
    SummarySheet, // 月度汇总表
    DailySheet,   // 日明细表（以日期命名）
}

impl fmt::Display for LossSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossSource::SummarySheet => write!(f, "SUMMARY_SHEET"),
            LossSource::DailySheet => write!(f, "DAILY_SHEET"),
        }
    }
}

// ==========================================
// 公用工程成本口径 (Utility Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtilitySource {
    Metered,   // 当日有实测用量
    Estimated, // 按吨纸单耗估算
}

impl fmt::Display for UtilitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilitySource::Metered => write!(f, "METERED"),
            UtilitySource::Estimated => write!(f, "ESTIMATED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text("   ".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
        assert!(!CellValue::from("PM-01").is_empty());
    }

    #[test]
    fn test_cell_from_empty_str() {
        assert_eq!(CellValue::from(""), CellValue::Empty);
    }

    #[test]
    fn test_display() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(CellValue::Date(d).to_string(), "2024-03-05");
        assert_eq!(LossSource::DailySheet.to_string(), "DAILY_SHEET");
        assert_eq!(UtilitySource::Estimated.to_string(), "ESTIMATED");
    }
}
