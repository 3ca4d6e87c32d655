use std::io::Write;

use crate::error::ScannerError;
use crate::models::record::{CycleReport, Record};
use crate::utils::format_datetime;
use super::ReportSink;

pub const COLUMNS: [&str; 10] = [
    "Ticker", "RSI", "Signal", "Price", "50_MA", "200_MA", "Volume", "Avg_Volume", "MACD", "MACD_Signal",
];

// 문자열 열 (왼쪽 정렬)
const LEFT_ALIGNED: [usize; 2] = [0, 2];

const ABSENT: &str = "NaN";

fn fixed(value: f64) -> String {
    format!("{:.2}", value)
}

fn fixed_opt(value: Option<f64>) -> String {
    value.map(fixed).unwrap_or_else(|| ABSENT.to_string())
}

/// 레코드 한 줄을 열 순서대로 문자열화
pub fn record_cells(record: &Record) -> [String; 10] {
    [
        record.symbol.clone(),
        fixed(record.rsi),
        record.signal.clone(),
        fixed(record.price),
        fixed_opt(record.ma_50),
        fixed_opt(record.ma_200),
        record.volume.to_string(),
        record.avg_volume.map(|v| v.to_string()).unwrap_or_else(|| ABSENT.to_string()),
        fixed(record.macd),
        fixed(record.macd_signal),
    ]
}

/// 고정폭 텍스트 표
pub struct TableReportSink<W: Write> {
    writer: W,
}

impl<W: Write> TableReportSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TableReportSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

/// 표 전체를 문자열로 렌더링
pub fn render_table(report: &CycleReport) -> String {
    let rows: Vec<[String; 10]> = report.iter().map(record_cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if LEFT_ALIGNED.contains(&i) {
                    format!("{:<width$}", cell, width = widths[i])
                } else {
                    format!("{:>width$}", cell, width = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut out = String::new();
    out.push_str(&format_row(&header));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

impl<W: Write + Send> ReportSink for TableReportSink<W> {
    fn emit(&mut self, report: &CycleReport) -> Result<(), ScannerError> {
        writeln!(
            self.writer,
            "=== 스캔 결과 {} ({}건, 건너뜀 {}, 실패 {}) ===",
            format_datetime(&report.started_at),
            report.len(),
            report.skipped,
            report.failed
        )?;

        if report.is_empty() {
            writeln!(self.writer, "(결과 없음)")?;
        } else {
            write!(self.writer, "{}", render_table(report))?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(symbol: &str, ma_200: Option<f64>) -> Record {
        Record {
            symbol: symbol.to_string(),
            rsi: 25.5,
            signal: "BUY (Oversold) - Near Support Level".to_string(),
            price: 40.0,
            ma_50: Some(70.0),
            ma_200,
            volume: 3_000_000,
            avg_volume: Some(1_100_000.0),
            macd: -4.2,
            macd_signal: -3.9,
        }
    }

    #[test]
    fn test_record_cells() {
        let cells = record_cells(&record("XYZ", None));

        assert_eq!(cells[1], "25.50");
        assert_eq!(cells[4], "70.00");
        assert_eq!(cells[5], "NaN");
        assert_eq!(cells[6], "3000000");
        assert_eq!(cells[7], "1100000");
    }

    #[test]
    fn test_render_table_layout() {
        let mut report = CycleReport::new(Utc::now());
        report.insert(record("XYZ", None));
        report.insert(record("LONGNAME", Some(12.5)));

        let table = render_table(&report);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Ticker"));
        assert!(lines[1].starts_with("XYZ     "));
        assert!(lines[2].starts_with("LONGNAME"));
        assert!(lines[2].contains("12.50"));
        assert!(lines[1].contains("NaN"));
    }

    #[test]
    fn test_emit_empty_report() {
        let mut sink = TableReportSink::new(Vec::new());
        sink.emit(&CycleReport::new(Utc::now())).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("(결과 없음)"));
    }
}
