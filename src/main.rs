// ==========================================
// 纸机日成本核算系统 - 命令行入口
// ==========================================
// 用法: tissue-costing <WORKBOOK> [--config PATH] [--format json|csv|summary]
//                      [--output PATH] [--log-json]
// ==========================================

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tissue_costing::config::ConfigManager;
use tissue_costing::engine::{CostingPipeline, ExtractionReport, PeriodSummary};
use tissue_costing::{export, logging};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 完整日成本记录（JSON）
    Json,
    /// 每日一行的分项成本（CSV）
    Csv,
    /// 期间汇总 + 抽取报告（JSON）
    Summary,
}

#[derive(Parser)]
#[command(name = "tissue-costing")]
#[command(about = "纸机日成本核算: 生产报表 → 日成本与效率记录", long_about = None)]
#[command(version)]
struct Cli {
    /// 生产报表文件（.xlsx/.xlsm/.xlsb/.xls/.ods/.csv）
    workbook: PathBuf,

    /// 配置文件（JSON）;缺省时依次尝试环境变量与系统配置目录
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// 输出文件;缺省写到标准输出
    #[arg(long)]
    output: Option<PathBuf>,

    /// 以 JSON 行格式输出日志
    #[arg(long)]
    log_json: bool,
}

/// summary 格式的输出结构
#[derive(Serialize)]
struct SummaryOutput<'a> {
    summary: Option<PeriodSummary>,
    report: &'a ExtractionReport,
}

fn open_output(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("无法创建输出文件 {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(
        app = tissue_costing::APP_NAME,
        version = tissue_costing::VERSION,
        "启动"
    );

    let manager = ConfigManager::load(cli.config.as_deref()).context("加载成本核算配置失败")?;
    tracing::info!(source = ?manager.source(), "配置已加载");
    let config = manager.config();

    let pipeline = CostingPipeline::new(config.clone());
    let run = pipeline
        .run_file(&cli.workbook)
        .with_context(|| format!("无法读取生产报表 {}", cli.workbook.display()))?;

    let mut out = open_output(cli.output.as_ref())?;
    match cli.format {
        OutputFormat::Json => export::write_json(&run.records, &mut out)?,
        OutputFormat::Csv => export::write_csv(&run.records, &mut out)?,
        OutputFormat::Summary => {
            let payload = SummaryOutput {
                summary: PeriodSummary::from_records(&run.records, &config),
                report: &run.report,
            };
            export::write_json(&payload, &mut out)?;
        }
    }
    out.flush().context("写出结果失败")?;

    Ok(())
}
