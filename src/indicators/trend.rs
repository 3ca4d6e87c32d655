/**
* filename : trend
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::ScannerError;
use super::{Indicator, moving_averages::ExponentialMovingAverage};

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// MACD 라인(빠른 EMA - 느린 EMA)과 시그널 라인(MACD 의 EMA).
///
/// 세 EMA 모두 첫 입력으로 시드되므로 첫 바부터 값이 있다.
#[derive(Debug)]
pub struct MACD {
  name: String,
  fast_ema: ExponentialMovingAverage,
  slow_ema: ExponentialMovingAverage,
  signal_ema: ExponentialMovingAverage,
}

impl MACD {
  pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
    MACD {
      name: format!("MACD-{}-{}-{}", fast_period, slow_period, signal_period),
      fast_ema: ExponentialMovingAverage::new(fast_period),
      slow_ema: ExponentialMovingAverage::new(slow_period),
      signal_ema: ExponentialMovingAverage::new(signal_period),
    }
  }

  pub fn macd_line(&self) -> Option<f64> {
    match (self.fast_ema.value(), self.slow_ema.value()) {
      (Some(fast), Some(slow)) => Some(fast - slow),
      _ => None,
    }
  }

  pub fn signal_line(&self) -> Option<f64> {
    self.signal_ema.value()
  }
}

impl Default for MACD {
  fn default() -> Self {
    MACD::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
  }
}

impl Indicator for MACD {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64) -> Result<(), ScannerError> {
    self.fast_ema.update(price)?;
    self.slow_ema.update(price)?;

    // 두 EMA 가 갱신되면 MACD 라인으로 시그널 EMA 갱신
    if let Some(macd_line) = self.macd_line() {
      self.signal_ema.update(macd_line)?;
    }

    Ok(())
  }

  // 주 값은 MACD 라인
  fn value(&self) -> Option<f64> {
    self.macd_line()
  }

  fn reset(&mut self) {
    self.fast_ema.reset();
    self.slow_ema.reset();
    self.signal_ema.reset();
  }
}

/// 표준 12/26/9 MACD. (MACD 시리즈, 시그널 시리즈)
pub fn compute_macd(closes: &[f64]) -> Result<(Vec<f64>, Vec<f64>), ScannerError> {
  compute_macd_with(closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)
}

pub fn compute_macd_with(
  closes: &[f64],
  fast: usize,
  slow: usize,
  signal: usize,
) -> Result<(Vec<f64>, Vec<f64>), ScannerError> {
  if fast == 0 || slow == 0 || signal == 0 {
    return Err(ScannerError::InvalidParameter("MACD periods must be > 0".to_string()));
  }

  let mut macd = MACD::new(fast, slow, signal);
  let mut macd_series = Vec::with_capacity(closes.len());
  let mut signal_series = Vec::with_capacity(closes.len());

  for &close in closes {
    macd.update(close)?;

    match (macd.macd_line(), macd.signal_line()) {
      (Some(line), Some(sig)) => {
        macd_series.push(line);
        signal_series.push(sig);
      }
      _ => {
        return Err(ScannerError::CalculationError(format!("{} produced no value", macd.name())));
      }
    }
  }

  Ok((macd_series, signal_series))
}
