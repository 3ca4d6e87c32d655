/**
* filename : utils
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::ScannerError;
use super::Indicator;

// 입력 값 검증 (NaN/무한대 거부)
pub fn ensure_finite(name: &str, value: f64) -> Result<(), ScannerError> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(ScannerError::InvalidInput(format!("{} received non-finite value {}", name, value)))
  }
}

// 초기 상태에서 입력 시퀀스 전체로 지표를 갱신하며 바마다 현재 값을 수집
pub fn run_series(indicator: &mut dyn Indicator, values: &[f64]) -> Result<Vec<Option<f64>>, ScannerError> {
  indicator.reset();
  let mut out = Vec::with_capacity(values.len());

  for &value in values {
    indicator.update(value)?;
    out.push(indicator.value());
  }

  Ok(out)
}

// 시리즈 마지막 값 (정의되지 않았으면 None)
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
  series.last().copied().flatten()
}
