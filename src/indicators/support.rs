/**
* filename : support
* author : HAMA
* date: 2025. 5. 11.
* description: 단순 지지선 (조회 구간 최저 종가)
**/

use crate::utils::math::min_value;

/// 조회 구간 전체의 최저 종가. 빈 입력은 None.
pub fn compute_support_level(closes: &[f64]) -> Option<f64> {
  min_value(closes)
}

/// 종가가 지지선 * `tolerance` 이하인지
pub fn is_near_support(close: f64, support_level: f64, tolerance: f64) -> bool {
  close <= support_level * tolerance
}
