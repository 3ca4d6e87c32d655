use std::io::Write;

use crate::error::ScannerError;
use crate::models::record::CycleReport;
use super::ReportSink;

/// CSV 출력. 헤더는 첫 레코드 앞에 한 번만 쓰고 없는 값은 빈 칸.
pub struct CsvReportSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReportSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_headers(writer, true)
    }

    /// 이미 헤더가 있는 파일에 이어 쓸 때는 `has_headers = false`
    pub fn with_headers(writer: W, has_headers: bool) -> Self {
        Self {
            writer: csv::WriterBuilder::new().has_headers(has_headers).from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, ScannerError> {
        self.writer
            .into_inner()
            .map_err(|e| ScannerError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))
    }
}

impl<W: Write + Send> ReportSink for CsvReportSink<W> {
    fn emit(&mut self, report: &CycleReport) -> Result<(), ScannerError> {
        for record in report.iter() {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
