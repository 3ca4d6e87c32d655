/**
* filename : oscillators
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use std::collections::VecDeque;
use crate::error::ScannerError;
use super::{Indicator, utils::{ensure_finite, run_series}};

/// 평균 상승/하락폭이 모두 0인 평탄 구간의 RSI
pub const FLAT_RSI: f64 = 50.0;

/// 상대강도지수 (RSI).
///
/// 평균 상승폭/하락폭은 최근 `period` 개 가격 변화의 단순 평균이다
/// (Wilder 스무딩 아님). 첫 값은 `period + 1` 개 종가가 쌓여야 나온다.
#[derive(Debug)]
pub struct RelativeStrengthIndex {
  name: String,
  period: usize,
  gains: VecDeque<f64>,
  losses: VecDeque<f64>,
  prev_price: Option<f64>,
}

impl RelativeStrengthIndex {
  pub fn new(period: usize) -> Self {
    RelativeStrengthIndex {
      name: format!("RSI-{}", period),
      period,
      gains: VecDeque::with_capacity(period),
      losses: VecDeque::with_capacity(period),
      prev_price: None,
    }
  }

  // (평균 상승폭, 평균 하락폭)
  fn averages(&self) -> Option<(f64, f64)> {
    if !self.is_ready() {
      return None;
    }

    let n = self.period as f64;
    let avg_gain = self.gains.iter().sum::<f64>() / n;
    let avg_loss = self.losses.iter().sum::<f64>() / n;

    Some((avg_gain, avg_loss))
  }
}

/// 평균 상승/하락폭으로 RSI 계산. 0 나눗셈은 값으로 정한다.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
  if avg_loss == 0.0 {
    if avg_gain == 0.0 {
      return FLAT_RSI;
    }
    return 100.0;
  }

  // RSI = 100 - (100 / (1 + RS))
  let rs = avg_gain / avg_loss;
  100.0 - (100.0 / (1.0 + rs))
}

impl Indicator for RelativeStrengthIndex {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64) -> Result<(), ScannerError> {
    ensure_finite(&self.name, price)?;

    // 이전 가격과 비교하여 gain/loss 계산
    if let Some(prev_price) = self.prev_price {
      let change = price - prev_price;

      self.gains.push_back(change.max(0.0));
      self.losses.push_back((-change).max(0.0));

      if self.gains.len() > self.period {
        self.gains.pop_front();
        self.losses.pop_front();
      }
    }

    self.prev_price = Some(price);

    Ok(())
  }

  fn value(&self) -> Option<f64> {
    self.averages()
      .map(|(avg_gain, avg_loss)| rsi_from_averages(avg_gain, avg_loss))
  }

  fn is_ready(&self) -> bool {
    self.period > 0 && self.gains.len() >= self.period
  }

  fn reset(&mut self) {
    self.gains.clear();
    self.losses.clear();
    self.prev_price = None;
  }
}

/// 종가 시리즈의 RSI. 앞의 `period` 개는 None.
pub fn compute_rsi(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, ScannerError> {
  if period == 0 {
    return Err(ScannerError::InvalidParameter("RSI period must be > 0".to_string()));
  }

  run_series(&mut RelativeStrengthIndex::new(period), closes)
}
