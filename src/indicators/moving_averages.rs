/**
* filename : moving_averages
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use std::collections::VecDeque;
use crate::error::ScannerError;
use super::{Indicator, utils::{ensure_finite, run_series}};

/// 후행 `period` 개 값의 단순 산술 평균.
///
/// 창이 다 차기 전에는 값이 없다.
#[derive(Debug)]
pub struct SimpleMovingAverage {
  name: String,
  period: usize,
  values: VecDeque<f64>,
}

impl SimpleMovingAverage {
  pub fn new(period: usize) -> Self {
    SimpleMovingAverage {
      name: format!("SMA-{}", period),
      period,
      values: VecDeque::with_capacity(period),
    }
  }
}

impl Indicator for SimpleMovingAverage {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, value: f64) -> Result<(), ScannerError> {
    ensure_finite(&self.name, value)?;

    self.values.push_back(value);

    // 오래된 값 제거
    if self.values.len() > self.period {
      self.values.pop_front();
    }

    Ok(())
  }

  fn value(&self) -> Option<f64> {
    if !self.is_ready() {
      return None;
    }

    // 누적합 대신 창 내용으로 매번 합산 (오차 누적 없음)
    let sum: f64 = self.values.iter().sum();
    Some(sum / self.period as f64)
  }

  fn is_ready(&self) -> bool {
    self.period > 0 && self.values.len() >= self.period
  }

  fn reset(&mut self) {
    self.values.clear();
  }
}

/// 지수 이동 평균 (alpha = 2 / (span + 1)).
///
/// 첫 입력 값으로 시드하므로 첫 바부터 값이 정의된다.
#[derive(Debug)]
pub struct ExponentialMovingAverage {
  name: String,
  alpha: f64,
  current_ema: Option<f64>,
}

impl ExponentialMovingAverage {
  pub fn new(span: usize) -> Self {
    let alpha = 2.0 / (span as f64 + 1.0);

    ExponentialMovingAverage {
      name: format!("EMA-{}", span),
      alpha,
      current_ema: None,
    }
  }
}

impl Indicator for ExponentialMovingAverage {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, value: f64) -> Result<(), ScannerError> {
    ensure_finite(&self.name, value)?;

    let next = match self.current_ema {
      Some(prev_ema) => value * self.alpha + prev_ema * (1.0 - self.alpha),
      None => value,
    };
    self.current_ema = Some(next);

    Ok(())
  }

  fn value(&self) -> Option<f64> {
    self.current_ema
  }

  fn reset(&mut self) {
    self.current_ema = None;
  }
}

/// 종가 시리즈의 단순 이동 평균. 앞의 `window - 1` 개는 None.
pub fn compute_moving_average(closes: &[f64], window: usize) -> Result<Vec<Option<f64>>, ScannerError> {
  if window == 0 {
    return Err(ScannerError::InvalidParameter("moving average window must be > 0".to_string()));
  }

  run_series(&mut SimpleMovingAverage::new(window), closes)
}

/// 종가 시리즈의 EMA (첫 값 시드). 비어 있지 않은 입력에 대해 모든 위치가 정의된다.
pub fn compute_ema(values: &[f64], span: usize) -> Result<Vec<f64>, ScannerError> {
  if span == 0 {
    return Err(ScannerError::InvalidParameter("EMA span must be > 0".to_string()));
  }

  let mut ema = ExponentialMovingAverage::new(span);
  let mut out = Vec::with_capacity(values.len());

  for &value in values {
    ema.update(value)?;
    if let Some(v) = ema.value() {
      out.push(v);
    }
  }

  Ok(out)
}
