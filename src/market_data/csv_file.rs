use std::path::{Path, PathBuf};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ScannerError;
use crate::models::market_data::{Bar, Series};
use crate::utils::lookback_start;
use super::provider::HistoricalDataProvider;

/// 종목별 CSV 파일(`{dir}/{SYMBOL}.csv`, 헤더 `date,close,volume`) 제공자
pub struct CsvDataProvider {
    dir: PathBuf,
    delimiter: u8,
}

impl CsvDataProvider {
    pub fn new(dir: impl Into<PathBuf>, delimiter: char) -> Result<Self, ScannerError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(ScannerError::ConfigError(format!(
                "CSV data directory does not exist: {}",
                dir.display()
            )));
        }
        Ok(Self { dir, delimiter: delimiter as u8 })
    }

    fn file_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol))
    }

    fn read_bars(&self, path: &Path) -> Result<Vec<Bar>, ScannerError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut bars = Vec::new();
        for rec in rdr.deserialize() {
            let row: CsvRow = rec.map_err(|e| ScannerError::ParseError(format!("{}: {}", path.display(), e)))?;
            bars.push(Bar::new(row.date, row.close, row.volume));
        }
        Ok(bars)
    }
}

/// 최신 바 기준 `lookback_days` 달력일 안의 바만 남긴다
pub fn trim_to_lookback(mut bars: Vec<Bar>, lookback_days: u32) -> Vec<Bar> {
    bars.sort_by_key(|b| b.date);

    let latest = match bars.last() {
        Some(bar) => bar.date,
        None => return bars,
    };
    let start = lookback_start(latest, lookback_days);

    bars.retain(|b| b.date > start);
    bars
}

#[async_trait]
impl HistoricalDataProvider for CsvDataProvider {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_series(&self, symbol: &str, lookback_days: u32) -> Result<Series, ScannerError> {
        let path = self.file_for(symbol);
        if !path.exists() {
            return Ok(Series::empty(symbol));
        }

        let bars = self.read_bars(&path)?;
        Ok(Series::new(symbol, trim_to_lookback(bars, lookback_days)))
    }
}

#[derive(serde::Deserialize)]
struct CsvRow {
    date: NaiveDate,
    close: f64,
    volume: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_trim_to_lookback() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let bars: Vec<Bar> = (0..100)
            .rev()
            .map(|i| Bar::new(start + Duration::days(i), 10.0 + i as f64, 100))
            .collect();

        let trimmed = trim_to_lookback(bars, 50);

        assert_eq!(trimmed.len(), 50);
        assert_eq!(trimmed.first().unwrap().date, start + Duration::days(50));
        assert_eq!(trimmed.last().unwrap().date, start + Duration::days(99));
    }

    #[test]
    fn test_missing_directory_rejected() {
        assert!(CsvDataProvider::new("/definitely/not/here", ',').is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_series() {
        let dir = std::env::temp_dir();
        let provider = CsvDataProvider::new(&dir, ',').unwrap();

        let series = provider.fetch_series("NO_SUCH_TICKER_XSCAN", 50).await.unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_reads_csv_file() {
        let dir = std::env::temp_dir().join(format!("xscan-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("ACME.csv"),
            "date,close,volume\n2025-05-02,11.0,200\n2025-05-01,10.0,100\n",
        )
        .unwrap();

        let provider = CsvDataProvider::new(&dir, ',').unwrap();
        let series = provider.fetch_series("ACME", 50).await.unwrap();

        assert_eq!(series.closes(), vec![10.0, 11.0]);
        assert_eq!(series.volumes(), vec![100, 200]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
