// ==========================================
// 纸机日成本核算系统 - 日期/时长标准化
// ==========================================
// 职责: 任意单元格编码 → 规范日期 / 十进制小时
// 红线: 纯函数;无法解析时降级（日期 → None,时长 → 0）,不返回错误
// ==========================================

use crate::domain::types::{CanonicalDate, CellValue};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

/// Excel 序列日期纪元（1899-12-30,已吸收 1900 闰年缺陷的偏移）
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Excel 可表示的最大序列日（9999-12-31）
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

/// 字符串日期格式（日在前优先;两位年份格式须排在四位年份之前,
/// 否则 "%Y" 会把 "24" 解析为公元 24 年）
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%Y/%m/%d",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

fn excel_epoch() -> Option<NaiveDateTime> {
    let (y, m, d) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)
}

/// Excel 序列值 → 日期时间（小数部分为当日时刻）
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > EXCEL_MAX_SERIAL {
        return None;
    }
    let days = serial.floor();
    let seconds = ((serial - days) * 86_400.0).round() as i64;
    excel_epoch()?
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Excel 序列值 → 规范日期（舍弃时刻）
pub fn excel_serial_to_date(serial: f64) -> Option<CanonicalDate> {
    excel_serial_to_datetime(serial).map(|dt| dt.date())
}

/// 低于该年份的解析结果视为把两位年份误读为四位年份
const MIN_PLAUSIBLE_YEAR: i32 = 100;

/// 宽松解析日期字符串
pub fn parse_date_text(value: &str) -> Option<CanonicalDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        match NaiveDate::parse_from_str(trimmed, fmt) {
            Ok(date) if date.year() >= MIN_PLAUSIBLE_YEAR => return Some(date),
            _ => continue,
        }
    }

    // 带时刻的 ISO 串: 取前 10 位日期部分
    if let (Some(head), Some(sep)) = (trimmed.get(..10), trimmed.get(10..11)) {
        if sep == " " || sep == "T" {
            if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
                return Some(date);
            }
        }
    }

    // 纯数字串按序列日处理
    trimmed.parse::<f64>().ok().and_then(excel_serial_to_date)
}

/// 规范化日期
///
/// # 规则
/// - 数值: Excel 序列日
/// - 字符串: 宽松日期解析
/// - 原生日期/日期时间: 直接取日期
/// - 其他: None（下游无法关联,等同丢弃）
pub fn normalize_date(raw: &CellValue) -> Option<CanonicalDate> {
    match raw {
        CellValue::Number(v) => excel_serial_to_date(*v),
        CellValue::Text(s) => parse_date_text(s),
        CellValue::Date(d) => Some(*d),
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Empty => None,
    }
}

/// 解析时长字符串（H:MM / H:MM:SS / 十进制小时）
fn parse_duration_text(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if trimmed.contains(':') {
        let parts: Vec<&str> = trimmed.split(':').map(str::trim).collect();
        let num = |idx: usize| -> Option<f64> {
            match parts.get(idx) {
                Some(p) if p.is_empty() => Some(0.0),
                Some(p) => p.parse::<f64>().ok(),
                None => Some(0.0),
            }
        };
        if parts.len() > 3 {
            return 0.0;
        }
        return match (num(0), num(1), num(2)) {
            (Some(h), Some(m), Some(s)) => h + m / 60.0 + s / 3600.0,
            _ => 0.0,
        };
    }

    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// 规范化时长（小时,>= 0）
///
/// # 规则
/// - 数值 < 1: 视为一天的比例,×24
/// - 数值 >= 1: 已是小时
/// - 含冒号字符串: H:MM（分钟/60 累加）
/// - 不含冒号字符串: 十进制小时
/// - 原生时刻: 取当日时刻的小时数
/// - 无法解析/负数: 0（视为无损失）
pub fn normalize_duration(raw: &CellValue) -> f64 {
    let hours = match raw {
        CellValue::Number(v) if *v < 1.0 => v * 24.0,
        CellValue::Number(v) => *v,
        CellValue::Text(s) => parse_duration_text(s),
        CellValue::DateTime(dt) => {
            dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0
        }
        CellValue::Date(_) | CellValue::Empty => 0.0,
    };

    if hours.is_finite() && hours > 0.0 {
        hours
    } else {
        0.0
    }
}
