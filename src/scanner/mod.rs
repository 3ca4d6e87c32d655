/**
* filename : mod
* author : HAMA
* date: 2025. 5. 12.
* description: 종목 목록 → 사이클 결과
**/

pub mod scheduler;

pub use scheduler::Scheduler;

use std::sync::Arc;
use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::config::Config;
use crate::error::ScannerError;
use crate::indicators::{IndicatorParams, IndicatorSet};
use crate::market_data::HistoricalDataProvider;
use crate::models::market_data::Series;
use crate::models::record::{CycleReport, Record};
use crate::signals::Classifier;
use crate::utils::logging;

/// 한 종목 시리즈를 레코드로 변환 (순수 함수).
///
/// 빈 시리즈나 RSI 미정의는 `Ok(None)`.
pub fn evaluate_series(
  series: &Series,
  params: &IndicatorParams,
  classifier: &Classifier,
) -> Result<Option<Record>, ScannerError> {
  let set = match IndicatorSet::from_series(series, params)? {
    Some(set) => set,
    None => return Ok(None),
  };

  let computed = [Some(set.macd), Some(set.macd_signal), set.rsi, set.ma_short, set.ma_long, set.volume_avg];
  if computed.iter().flatten().any(|v| !v.is_finite()) {
    return Err(ScannerError::CalculationError(format!("{}: non-finite indicator value", series.symbol)));
  }

  let signal = match classifier.classify(&set) {
    Some(signal) => signal,
    None => return Ok(None),
  };

  Ok(Record::from_indicators(series.symbol.clone(), &set, &signal))
}

/// 종목 하나의 처리 결과
#[derive(Debug)]
pub enum InstrumentOutcome {
  Recorded(Record),
  Skipped(&'static str),
  Failed(ScannerError),
}

pub struct Scanner {
  provider: Arc<dyn HistoricalDataProvider>,
  params: IndicatorParams,
  classifier: Classifier,
  lookback_days: u32,
  max_concurrent_fetches: usize,
}

impl Scanner {
  pub fn new(provider: Arc<dyn HistoricalDataProvider>, params: IndicatorParams, classifier: Classifier) -> Self {
    Scanner {
      provider,
      params,
      classifier,
      lookback_days: 50,
      max_concurrent_fetches: 4,
    }
  }

  pub fn from_config(provider: Arc<dyn HistoricalDataProvider>, config: &Config) -> Self {
    Scanner::new(provider, config.indicators.clone(), Classifier::new(config.thresholds.clone()))
      .with_lookback_days(config.scanner.lookback_days)
      .with_max_concurrent_fetches(config.scanner.max_concurrent_fetches)
  }

  pub fn with_lookback_days(mut self, days: u32) -> Self {
    self.lookback_days = days;
    self
  }

  pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
    self.max_concurrent_fetches = limit.max(1);
    self
  }

  pub fn provider_name(&self) -> &str {
    self.provider.name()
  }

  // 조회 → 지표 → 분류. 오류는 이 종목에만 국한된다.
  pub async fn evaluate_symbol(&self, symbol: &str) -> InstrumentOutcome {
    let series = match self.provider.fetch_series(symbol, self.lookback_days).await {
      Ok(series) => series,
      Err(e) => return InstrumentOutcome::Failed(e),
    };

    if series.is_empty() {
      return InstrumentOutcome::Skipped("no data");
    }

    match evaluate_series(&series, &self.params, &self.classifier) {
      Ok(Some(record)) => InstrumentOutcome::Recorded(record),
      Ok(None) => InstrumentOutcome::Skipped("RSI undefined (insufficient history)"),
      Err(e) => InstrumentOutcome::Failed(e),
    }
  }

  /// 한 사이클 실행. 실패한 종목은 로그만 남기고 결과에서 빠진다.
  pub async fn run_cycle(&self, tickers: &[String]) -> CycleReport {
    let mut report = CycleReport::new(Utc::now());

    let outcomes: Vec<(&String, InstrumentOutcome)> = stream::iter(tickers.iter())
      .map(|symbol| async move { (symbol, self.evaluate_symbol(symbol).await) })
      .buffered(self.max_concurrent_fetches)
      .collect()
      .await;

    for (symbol, outcome) in outcomes {
      match outcome {
        InstrumentOutcome::Recorded(record) => report.insert(record),
        InstrumentOutcome::Skipped(reason) => {
          logging::log_instrument_skipped(symbol, reason);
          report.skipped += 1;
        }
        InstrumentOutcome::Failed(e) => {
          logging::log_error(symbol, &e);
          report.failed += 1;
        }
      }
    }

    report
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, NaiveDate};
  use crate::market_data::InMemoryDataProvider;
  use crate::models::market_data::Bar;

  fn bars(closes: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    closes
      .iter()
      .enumerate()
      .map(|(i, c)| Bar::new(start + Duration::days(i as i64), *c, 1_000))
      .collect()
  }

  #[test]
  fn test_evaluate_series_short_history_is_skipped() {
    let series = Series::new("NEW", bars(&[10.0; 14]));
    let record = evaluate_series(&series, &IndicatorParams::default(), &Classifier::default()).unwrap();
    assert!(record.is_none());
  }

  #[tokio::test]
  async fn test_outcomes() {
    let provider = InMemoryDataProvider::new()
      .with_series("FLAT", bars(&[10.0; 30]))
      .with_series("NEW", bars(&[10.0; 5]))
      .with_failure("DOWN");
    let scanner = Scanner::new(Arc::new(provider), IndicatorParams::default(), Classifier::default());

    assert!(matches!(scanner.evaluate_symbol("FLAT").await, InstrumentOutcome::Recorded(_)));
    assert!(matches!(scanner.evaluate_symbol("NEW").await, InstrumentOutcome::Skipped(_)));
    assert!(matches!(scanner.evaluate_symbol("NONE").await, InstrumentOutcome::Skipped("no data")));
    assert!(matches!(scanner.evaluate_symbol("DOWN").await, InstrumentOutcome::Failed(_)));
  }
}
