/**
* filename : volume
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::ScannerError;
use super::{moving_averages::SimpleMovingAverage, utils::run_series};

pub const VOLUME_WINDOW: usize = 20;

/// 거래량 단순 이동 평균. 앞의 `window - 1` 개는 None.
pub fn compute_volume_average(volumes: &[u64], window: usize) -> Result<Vec<Option<f64>>, ScannerError> {
  if window == 0 {
    return Err(ScannerError::InvalidParameter("volume window must be > 0".to_string()));
  }

  let as_f64: Vec<f64> = volumes.iter().map(|&v| v as f64).collect();
  let mut sma = SimpleMovingAverage::new(window);

  run_series(&mut sma, &as_f64)
}

/// 최근 거래량이 평균의 `multiplier` 배를 넘는지 (평균이 없으면 false)
pub fn is_volume_surge(latest_volume: u64, average: Option<f64>, multiplier: f64) -> bool {
  match average {
    Some(avg) => latest_volume as f64 > multiplier * avg,
    None => false,
  }
}
