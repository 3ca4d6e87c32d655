//! 수학 관련 유틸리티
//!
//! 최소값, 소수점 반올림 함수 제공

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 슬라이스 최소값 (빈 슬라이스는 None)
pub fn min_value(values: &[f64]) -> Option<f64> {
  values.iter().copied().reduce(f64::min)
}

/// 소수점 `dp` 자리 반올림 (round-half-to-even)
///
/// 바이너리 값 그대로를 기준으로 반올림하므로 2.675 는 2.67 이 된다.
/// 유한하지 않은 값은 그대로 돌려준다.
pub fn round_dp(value: f64, dp: u32) -> f64 {
  match Decimal::from_f64_retain(value) {
    Some(d) => d
      .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
      .to_f64()
      .unwrap_or(value),
    None => value,
  }
}

/// Option 값 반올림
pub fn round_opt(value: Option<f64>, dp: u32) -> Option<f64> {
  value.map(|v| round_dp(v, dp))
}
