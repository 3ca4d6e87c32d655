//! 스캔 사이클 통합 테스트
//!
//! 제공자 → 지표 → 분류 → 결과 전체 흐름 검증

use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use mockall::mock;
use tokio::sync::watch;

use xScan::indicators::IndicatorParams;
use xScan::market_data::{HistoricalDataProvider, InMemoryDataProvider};
use xScan::models::market_data::{Bar, Series};
use xScan::models::record::CycleReport;
use xScan::report::ReportSink;
use xScan::scanner::{Scanner, Scheduler};
use xScan::signals::Classifier;
use xScan::ScannerError;

mock! {
  pub Provider {}

  #[async_trait]
  impl HistoricalDataProvider for Provider {
    fn name(&self) -> &str;
    async fn fetch_series(&self, symbol: &str, lookback_days: u32) -> Result<Series, ScannerError>;
  }
}

fn bars(closes: &[f64], volumes: &[u64]) -> Vec<Bar> {
  let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
  closes
    .iter()
    .zip(volumes)
    .enumerate()
    .map(|(i, (c, v))| Bar::new(start + Duration::days(i as i64), *c, *v))
    .collect()
}

fn flat_bars() -> Vec<Bar> {
  bars(&[10.0; 60], &[1_000_000; 60])
}

fn declining_bars() -> Vec<Bar> {
  // 100 → 40, 60개 바, 마지막 바 거래량 3배
  let closes: Vec<f64> = (0..60).map(|i| 100.0 - 60.0 * i as f64 / 59.0).collect();
  let mut volumes = vec![1_000_000u64; 60];
  volumes[59] = 3_000_000;
  bars(&closes, &volumes)
}

fn rising_bars() -> Vec<Bar> {
  let closes: Vec<f64> = (0..60).map(|i| 50.0 + i as f64).collect();
  bars(&closes, &[500_000; 60])
}

fn scanner_with(provider: impl HistoricalDataProvider + 'static) -> Scanner {
  Scanner::new(Arc::new(provider), IndicatorParams::default(), Classifier::default())
    .with_lookback_days(365)
}

fn tickers(list: &[&str]) -> Vec<String> {
  list.iter().map(|t| t.to_string()).collect()
}

#[derive(Clone, Default)]
struct CollectingSink {
  reports: Arc<Mutex<Vec<CycleReport>>>,
}

impl ReportSink for CollectingSink {
  fn emit(&mut self, report: &CycleReport) -> Result<(), ScannerError> {
    self.reports.lock().unwrap().push(report.clone());
    Ok(())
  }
}

struct FailingSink;

impl ReportSink for FailingSink {
  fn emit(&mut self, _report: &CycleReport) -> Result<(), ScannerError> {
    Err(ScannerError::IoError(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed")))
  }
}

#[tokio::test]
async fn test_flat_series_is_neutral() {
  let scanner = scanner_with(InMemoryDataProvider::new().with_series("FLAT", flat_bars()));

  let report = scanner.run_cycle(&tickers(&["FLAT"])).await;
  let record = report.get("FLAT").expect("flat series should produce a record");

  assert_eq!(record.rsi, 50.0);
  assert_eq!(record.ma_50, Some(10.0));
  assert_eq!(record.ma_200, None);
  assert_eq!(record.price, 10.0);
  assert_eq!(record.avg_volume, Some(1_000_000.0));
  assert_eq!(record.macd, 0.0);
  assert_eq!(record.signal, "NEUTRAL (Stable)");
}

#[tokio::test]
async fn test_declining_series_with_volume_spike_is_buy() {
  let scanner = scanner_with(InMemoryDataProvider::new().with_series("DROP", declining_bars()));

  let report = scanner.run_cycle(&tickers(&["DROP"])).await;
  let record = report.get("DROP").unwrap();

  assert!(record.rsi < 30.0);
  assert!(record.signal.starts_with("BUY (Oversold)"));
  assert!(record.signal.contains("Volume Surge"));
  assert!(record.signal.contains("Near Support Level"));
  assert!(!record.signal.contains("Above MAs"));
  assert_eq!(record.signal, "BUY (Oversold) - Volume Surge - Near Support Level");
  assert_eq!(record.price, 40.0);
  assert_eq!(record.volume, 3_000_000);
  assert_eq!(record.avg_volume, Some(1_100_000.0));
}

#[tokio::test]
async fn test_rising_series_is_sell() {
  let scanner = scanner_with(InMemoryDataProvider::new().with_series("MOON", rising_bars()));

  let report = scanner.run_cycle(&tickers(&["MOON"])).await;
  let record = report.get("MOON").unwrap();

  assert_eq!(record.rsi, 100.0);
  assert_eq!(record.signal, "SELL (Overbought)");
}

#[tokio::test]
async fn test_empty_and_failing_instruments_do_not_abort_cycle() {
  let provider = InMemoryDataProvider::new()
    .with_series("FLAT", flat_bars())
    .with_series("EMPTY", Vec::new())
    .with_series("DROP", declining_bars())
    .with_failure("DOWN");
  let scanner = scanner_with(provider);

  let report = scanner
    .run_cycle(&tickers(&["EMPTY", "FLAT", "DOWN", "UNKNOWN", "DROP"]))
    .await;

  assert_eq!(report.symbols(), vec!["FLAT", "DROP"]);
  assert!(!report.contains("EMPTY"));
  assert_eq!(report.skipped, 2);
  assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn test_insufficient_history_is_skipped() {
  let provider = InMemoryDataProvider::new().with_series("IPO", bars(&[20.0, 21.0, 22.0], &[10, 10, 10]));
  let scanner = scanner_with(provider);

  let report = scanner.run_cycle(&tickers(&["IPO"])).await;

  assert!(report.is_empty());
  assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn test_non_finite_data_is_isolated() {
  let mut broken = flat_bars();
  broken[30].close = f64::NAN;
  let provider = InMemoryDataProvider::new()
    .with_series("BROKEN", broken)
    .with_series("FLAT", flat_bars());
  let scanner = scanner_with(provider);

  let report = scanner.run_cycle(&tickers(&["BROKEN", "FLAT"])).await;

  assert_eq!(report.symbols(), vec!["FLAT"]);
  assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn test_duplicate_tickers_overwrite() {
  let scanner = scanner_with(InMemoryDataProvider::new().with_series("FLAT", flat_bars()));

  let report = scanner.run_cycle(&tickers(&["FLAT", "FLAT"])).await;

  assert_eq!(report.len(), 1);
}

#[tokio::test]
async fn test_mock_provider_receives_lookback_and_errors_are_isolated() {
  let mut provider = MockProvider::new();
  provider
    .expect_fetch_series()
    .times(3)
    .returning(|symbol, lookback_days| {
      assert_eq!(lookback_days, 365);
      match symbol {
        "FLAT" => Ok(Series::new("FLAT", flat_bars())),
        "TIMEOUT" => Err(ScannerError::HttpError("timed out".to_string())),
        other => Ok(Series::empty(other)),
      }
    });

  let scanner = scanner_with(provider).with_max_concurrent_fetches(2);
  let report = scanner.run_cycle(&tickers(&["TIMEOUT", "FLAT", "GHOST"])).await;

  assert_eq!(report.symbols(), vec!["FLAT"]);
  assert_eq!(report.failed, 1);
  assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn test_scheduler_run_once_emits_report() {
  let sink = CollectingSink::default();
  let reports = sink.reports.clone();
  let scanner = scanner_with(InMemoryDataProvider::new().with_series("FLAT", flat_bars()));

  let mut scheduler = Scheduler::new(scanner, tickers(&["FLAT"]), StdDuration::from_secs(900), Box::new(sink));
  let report = scheduler.run_once().await;

  assert_eq!(report.len(), 1);
  assert_eq!(scheduler.cycles_completed(), 1);
  assert_eq!(reports.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_scheduler_survives_sink_failure() {
  let scanner = scanner_with(InMemoryDataProvider::new().with_series("FLAT", flat_bars()));
  let mut scheduler = Scheduler::new(scanner, tickers(&["FLAT"]), StdDuration::from_secs(900), Box::new(FailingSink));

  scheduler.run_once().await;
  scheduler.run_once().await;

  assert_eq!(scheduler.cycles_completed(), 2);
}

#[tokio::test]
async fn test_scheduler_repeats_until_shutdown() {
  let sink = CollectingSink::default();
  let reports = sink.reports.clone();
  let scanner = scanner_with(InMemoryDataProvider::new().with_series("FLAT", flat_bars()));
  let mut scheduler = Scheduler::new(scanner, tickers(&["FLAT"]), StdDuration::from_millis(10), Box::new(sink));

  let (tx, rx) = watch::channel(false);
  tokio::spawn(async move {
    tokio::time::sleep(StdDuration::from_millis(80)).await;
    let _ = tx.send(true);
  });

  tokio::time::timeout(StdDuration::from_secs(5), scheduler.run(rx))
    .await
    .expect("scheduler should stop after shutdown");

  let emitted = reports.lock().unwrap().len() as u64;
  assert!(emitted >= 2);
  assert_eq!(emitted, scheduler.cycles_completed());
}

#[tokio::test]
async fn test_scheduler_stops_immediately_when_already_shut_down() {
  let scanner = scanner_with(InMemoryDataProvider::new());
  let mut scheduler = Scheduler::new(
    scanner,
    tickers(&["FLAT"]),
    StdDuration::from_secs(900),
    Box::new(CollectingSink::default()),
  );

  let (_tx, rx) = watch::channel(true);
  scheduler.run(rx).await;

  assert_eq!(scheduler.cycles_completed(), 0);
}
