//! 사이클 결과 출력
//!
//! 완성된 `CycleReport` 만 받아 표/CSV 로 내보낸다.

pub mod csv_sink;
pub mod table;

use std::fs::OpenOptions;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::ScannerError;
use crate::models::record::CycleReport;

pub use csv_sink::CsvReportSink;
pub use table::{render_table, TableReportSink};

pub trait ReportSink: Send {
    fn emit(&mut self, report: &CycleReport) -> Result<(), ScannerError>;
}

/// 출력 설정으로 싱크 생성 (파일 경로가 없으면 표준 출력)
pub fn build_sink(config: &OutputConfig) -> Result<Box<dyn ReportSink>, ScannerError> {
    match &config.file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(match config.format {
                OutputFormat::Table => Box::new(TableReportSink::new(file)),
                OutputFormat::Csv => {
                    // 기존 내용이 있으면 헤더 생략
                    let fresh = file.metadata()?.len() == 0;
                    Box::new(CsvReportSink::with_headers(file, fresh))
                }
            })
        }
        None => Ok(match config.format {
            OutputFormat::Table => Box::new(TableReportSink::stdout()),
            OutputFormat::Csv => Box::new(CsvReportSink::new(std::io::stdout())),
        }),
    }
}
