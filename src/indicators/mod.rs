/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 가격/거래량 시리즈 → 기술 지표
**/
pub mod moving_averages;
pub mod oscillators;
pub mod support;
pub mod trend;
pub mod volume;
pub mod utils;

pub use moving_averages::*;
pub use oscillators::*;
pub use support::*;
pub use trend::*;
pub use volume::*;
pub use utils::*;

use std::fmt::Debug;
use serde::{Deserialize, Serialize};

use crate::error::ScannerError;
use crate::models::market_data::Series;

pub trait Indicator: Debug + Send + Sync {
  fn name(&self) -> &str;

  // 새로운 값으로 지표 업데이트
  fn update(&mut self, value: f64) -> Result<(), ScannerError>;

  // 현재 지표 값 (데이터 부족 시 None)
  fn value(&self) -> Option<f64>;

  // 지표가 계산 가능한지 (충분한 데이터가 있는지) 확인
  fn is_ready(&self) -> bool {
    self.value().is_some()
  }

  // 지표 상태 리셋
  fn reset(&mut self);
}

/// 지표 기간 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
  pub rsi_period: usize,
  pub macd_fast: usize,
  pub macd_slow: usize,
  pub macd_signal: usize,
  pub ma_short: usize,
  pub ma_long: usize,
  pub volume_window: usize,
}

impl Default for IndicatorParams {
  fn default() -> Self {
    IndicatorParams {
      rsi_period: 14,
      macd_fast: MACD_FAST,
      macd_slow: MACD_SLOW,
      macd_signal: MACD_SIGNAL,
      ma_short: 50,
      ma_long: 200,
      volume_window: VOLUME_WINDOW,
    }
  }
}

impl IndicatorParams {
  pub fn validate(&self) -> Result<(), ScannerError> {
    let periods = [
      ("rsi_period", self.rsi_period),
      ("macd_fast", self.macd_fast),
      ("macd_slow", self.macd_slow),
      ("macd_signal", self.macd_signal),
      ("ma_short", self.ma_short),
      ("ma_long", self.ma_long),
      ("volume_window", self.volume_window),
    ];

    for (key, period) in periods {
      if period == 0 {
        return Err(ScannerError::InvalidParameter(format!("'{}' must be > 0", key)));
      }
    }

    if self.macd_fast >= self.macd_slow {
      return Err(ScannerError::InvalidParameter(format!(
        "macd_fast ({}) must be smaller than macd_slow ({})",
        self.macd_fast, self.macd_slow
      )));
    }

    Ok(())
  }
}

/// 가장 최근 바 기준 지표 값 묶음
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
  pub rsi: Option<f64>,
  pub macd: f64,
  pub macd_signal: f64,
  pub ma_short: Option<f64>,
  pub ma_long: Option<f64>,
  pub volume_avg: Option<f64>,
  pub latest_close: f64,
  pub latest_volume: u64,
  pub support_level: f64,
}

impl IndicatorSet {
  /// 시리즈 전체로 지표를 계산해 마지막 바 값을 모은다. 빈 시리즈는 `Ok(None)`.
  pub fn from_series(series: &Series, params: &IndicatorParams) -> Result<Option<Self>, ScannerError> {
    let last_bar = match series.last() {
      Some(bar) => bar,
      None => return Ok(None),
    };

    let closes = series.closes();
    let volumes = series.volumes();

    let rsi = compute_rsi(&closes, params.rsi_period)?;
    let (macd, macd_signal) = compute_macd_with(
      &closes,
      params.macd_fast,
      params.macd_slow,
      params.macd_signal,
    )?;
    let ma_short = compute_moving_average(&closes, params.ma_short)?;
    let ma_long = compute_moving_average(&closes, params.ma_long)?;
    let volume_avg = compute_volume_average(&volumes, params.volume_window)?;

    let support_level = compute_support_level(&closes)
      .ok_or_else(|| ScannerError::CalculationError(format!("{}: no closes for support level", series.symbol)))?;

    let (macd, macd_signal) = match (macd.last(), macd_signal.last()) {
      (Some(m), Some(s)) => (*m, *s),
      _ => {
        return Err(ScannerError::CalculationError(format!("{}: MACD series is empty", series.symbol)));
      }
    };

    Ok(Some(IndicatorSet {
      rsi: latest(&rsi),
      macd,
      macd_signal,
      ma_short: latest(&ma_short),
      ma_long: latest(&ma_long),
      volume_avg: latest(&volume_avg),
      latest_close: last_bar.close,
      latest_volume: last_bar.volume,
      support_level,
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, NaiveDate};
  use crate::models::market_data::Bar;

  fn series_from(closes: &[f64]) -> Series {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let bars = closes
      .iter()
      .enumerate()
      .map(|(i, c)| Bar::new(start + Duration::days(i as i64), *c, 1_000))
      .collect();
    Series::new("TEST", bars)
  }

  #[test]
  fn test_empty_series_yields_none() {
    let set = IndicatorSet::from_series(&Series::empty("TEST"), &IndicatorParams::default()).unwrap();
    assert!(set.is_none());
  }

  #[test]
  fn test_short_series_has_undefined_windows() {
    let set = IndicatorSet::from_series(&series_from(&[10.0, 11.0, 12.0]), &IndicatorParams::default())
      .unwrap()
      .unwrap();

    assert_eq!(set.rsi, None);
    assert_eq!(set.ma_short, None);
    assert_eq!(set.ma_long, None);
    assert_eq!(set.volume_avg, None);
    assert_eq!(set.latest_close, 12.0);
    assert_eq!(set.support_level, 10.0);
  }

  #[test]
  fn test_nan_close_is_an_error() {
    let result = IndicatorSet::from_series(&series_from(&[10.0, f64::NAN, 12.0]), &IndicatorParams::default());
    assert!(matches!(result, Err(ScannerError::InvalidInput(_))));
  }

  #[test]
  fn test_params_validation() {
    assert!(IndicatorParams::default().validate().is_ok());

    let zero = IndicatorParams { rsi_period: 0, ..IndicatorParams::default() };
    assert!(zero.validate().is_err());

    let inverted = IndicatorParams { macd_fast: 30, ..IndicatorParams::default() };
    assert!(inverted.validate().is_err());
  }
}
