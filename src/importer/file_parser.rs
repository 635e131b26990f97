// ==========================================
// 纸机日成本核算系统 - 工作簿读取器实现
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls/.ods) / CSV (.csv)
// ==========================================

use crate::domain::types::CellValue;
use crate::domain::workbook::{Sheet, Workbook};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::workbook_reader_trait::WorkbookSource;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// Excel Reader 实现
// ==========================================
pub struct ExcelWorkbookReader;

impl ExcelWorkbookReader {
    /// calamine 单元格 → CellValue
    ///
    /// 时刻/时长格式单元格（序列值 < 1 或标记为时长）保留为数值,
    /// 由时长标准化按"一天的比例"处理;日期按工作簿的日期系统（1900/1904）换算
    pub fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) => CellValue::from(s.as_str()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                if dt.is_duration() || serial < 1.0 {
                    CellValue::Number(serial)
                } else {
                    dt.as_datetime()
                        .map(CellValue::DateTime)
                        .unwrap_or(CellValue::Number(serial))
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
        }
    }
}

impl WorkbookSource for ExcelWorkbookReader {
    fn read_workbook(&self, file_path: &Path) -> ImportResult<Workbook> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(path)?;
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError("Excel 文件无工作表".to_string()));
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;

            // calamine 的 Range 从首个非空单元格开始,这里补齐为绝对坐标
            let (row0, col0) = range
                .start()
                .map(|(r, c)| (r as usize, c as usize))
                .unwrap_or((0, 0));

            let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row0];
            for data_row in range.rows() {
                let mut row = vec![CellValue::Empty; col0];
                row.extend(data_row.iter().map(Self::convert_cell));
                rows.push(row);
            }

            tracing::debug!(sheet = %sheet_name, rows = rows.len(), "工作表读取完成");
            sheets.push(Sheet::new(sheet_name, rows));
        }

        tracing::info!(
            file = %path.display(),
            sheets = sheets.len(),
            "Excel 工作簿解码完成"
        );

        Ok(Workbook::new(sheets))
    }
}

// ==========================================
// CSV Reader 实现
// ==========================================
// 单表工作簿,表名取文件名（不含扩展名）
pub struct CsvWorkbookReader;

impl CsvWorkbookReader {
    fn convert_field(value: &str) -> CellValue {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }
}

impl WorkbookSource for CsvWorkbookReader {
    fn read_workbook(&self, file_path: &Path) -> ImportResult<Workbook> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 CSV 文件（无表头,按绝对行列读取）
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(Self::convert_field).collect());
        }

        let sheet_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet1")
            .to_string();

        Ok(Workbook::new(vec![Sheet::new(sheet_name, rows)]))
    }
}

// ==========================================
// 通用读取器（根据扩展名自动选择）
// ==========================================
pub struct UniversalWorkbookReader;

impl WorkbookSource for UniversalWorkbookReader {
    fn read_workbook(&self, file_path: &Path) -> ImportResult<Workbook> {
        let ext = extension_of(file_path);
        match ext.as_str() {
            "csv" => CsvWorkbookReader.read_workbook(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelWorkbookReader.read_workbook(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_csv_reader_absolute_grid() {
        let temp_file = csv_file("Date,Pulp,Broke\n,,\n05-01-2024,50,1,250\n");
        let workbook = CsvWorkbookReader.read_workbook(temp_file.path()).unwrap();

        assert_eq!(workbook.sheets.len(), 1);
        let sheet = &workbook.sheets[0];
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.cell(0, 1), &CellValue::Text("Pulp".to_string()));
        // 空行保留,保证行号与原表一致
        assert_eq!(sheet.cell(1, 0), &CellValue::Empty);
        assert_eq!(sheet.cell(2, 1), &CellValue::Number(50.0));
        // 行长度不一致也允许
        assert_eq!(sheet.cell(2, 3), &CellValue::Number(250.0));
    }

    #[test]
    fn test_csv_reader_sheet_named_after_file() {
        let temp_file = csv_file("a\n");
        let workbook = CsvWorkbookReader.read_workbook(temp_file.path()).unwrap();
        let stem = temp_file.path().file_stem().unwrap().to_str().unwrap();
        assert_eq!(workbook.sheets[0].name, stem);
    }

    #[test]
    fn test_reader_file_not_found() {
        let result = UniversalWorkbookReader.read_workbook(Path::new("non_existent.xlsx"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_reader_unsupported_extension() {
        let result = UniversalWorkbookReader.read_workbook(Path::new("report.pdf"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_convert_excel_datetime_cells() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};
        use chrono::NaiveDate;

        let jan5 = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let dt_1900 = ExcelDateTime::new(45296.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            ExcelWorkbookReader::convert_cell(&Data::DateTime(dt_1900)),
            CellValue::DateTime(jan5)
        );

        // 1904 日期系统: 序列值相差 1462 天
        let dt_1904 = ExcelDateTime::new(43834.0, ExcelDateTimeType::DateTime, true);
        assert_eq!(
            ExcelWorkbookReader::convert_cell(&Data::DateTime(dt_1904)),
            CellValue::DateTime(jan5)
        );

        // 时长与当日时刻保留为天的比例
        let duration = ExcelDateTime::new(1.25, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(
            ExcelWorkbookReader::convert_cell(&Data::DateTime(duration)),
            CellValue::Number(1.25)
        );
        let time_of_day = ExcelDateTime::new(0.0625, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            ExcelWorkbookReader::convert_cell(&Data::DateTime(time_of_day)),
            CellValue::Number(0.0625)
        );
    }

    #[test]
    fn test_convert_cell_variants() {
        assert_eq!(ExcelWorkbookReader::convert_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(
            ExcelWorkbookReader::convert_cell(&Data::String(String::new())),
            CellValue::Empty
        );
        assert_eq!(
            ExcelWorkbookReader::convert_cell(&Data::DateTimeIso("2024-01-05".to_string())),
            CellValue::Text("2024-01-05".to_string())
        );
        assert_eq!(ExcelWorkbookReader::convert_cell(&Data::Empty), CellValue::Empty);
    }
}
