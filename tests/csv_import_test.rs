// ==========================================
// CSV 读取与导出集成测试
// ==========================================
// 测试目标: CSV 文件 → 单表工作簿 → 核算;核算结果 → CSV/JSON 文件
// ==========================================


use std::fs;
use tempfile::tempdir;
use tissue_costing::domain::CostingData;
use tissue_costing::export;
use tissue_costing::importer::{CsvWorkbookReader, WorkbookSource};
use tissue_costing::ImportError;
use test_helpers::*;

const PRODUCTION_CSV: &str = "\
Tissue Mill - Production Summary,,,,,
Machine: PM1,,,,,
Code,Date,Quality,GSM,Production (t),Speed
PM-01-A,05-01-2024,ignored,1,999,
,05-01-2024,X,18,70,900
,05-01-2024,Y,22,30,880
,06-01-2024,Y,22,50,870
";

#[test]
fn test_csv_production_sheet_runs_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Production Summary.csv");
    fs::write(&path, PRODUCTION_CSV).unwrap();

    let run = default_pipeline().run_file(&path).expect("CSV 核算失败");

    assert_eq!(run.records.len(), 2);
    assert_eq!(run.records[0].date, ymd(2024, 1, 5));
    assert_eq!(run.records[0].total_production, 100.0);
    assert_eq!(run.records[0].quality, "X");
    assert_eq!(run.records[1].total_production, 50.0);
    // CSV 只含一张表,其余固定表记为缺失
    assert_eq!(run.report.missing_sheets.len(), 2);
}

#[test]
fn test_csv_reader_numbers_and_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("RM Consumption.csv");
    fs::write(&path, "Date,Pulp\n05-01-2024,\"1,250\"\n").unwrap();

    let wb = CsvWorkbookReader.read_workbook(&path).unwrap();
    let sheet = &wb.sheets[0];
    assert_eq!(sheet.name, "RM Consumption");
    // 含千分位的数字保留为文本,由清洗器解析
    assert_eq!(sheet.cell(1, 1), &text("1,250"));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.txt");
    fs::write(&path, "x").unwrap();

    let result = default_pipeline().run_file(&path);
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_export_round_trip_files() {
    let d = ymd(2024, 1, 5);
    let wb = workbook(vec![
        production_sheet(vec![production_row(serial(d), "X", 18.0, 100.0)]),
        consumption_sheet(&[("Pulp", 40.0)], vec![(serial(d), vec![50.0])]),
    ]);
    let run = default_pipeline().run(&wb);

    let dir = tempdir().unwrap();

    // JSON: 完整记录可反序列化
    let json_path = dir.path().join("costing.json");
    export::write_json(&run.records, fs::File::create(&json_path).unwrap()).unwrap();
    let parsed: Vec<CostingData> =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed, run.records);

    // CSV: 每日一行
    let csv_path = dir.path().join("costing.csv");
    export::write_csv(&run.records, fs::File::create(&csv_path).unwrap()).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);

    let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
    assert_eq!(&rows[0][col("date")], "2024-01-05");
    assert_eq!(rows[0][col("fiber_cost")].parse::<f64>().unwrap(), 2000.0);
    assert_eq!(&rows[0][col("utility_source")], "ESTIMATED");
}
