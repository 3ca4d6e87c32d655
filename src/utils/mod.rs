//! 시간 관련 유틸리티
//!
//! 타임스탬프 변환, 조회 구간 계산 함수 제공

pub mod logging;
pub mod math;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// 유닉스 타임스탬프(초)를 UTC 날짜로 변환
pub fn timestamp_to_date(timestamp_secs: i64) -> Option<NaiveDate> {
  DateTime::<Utc>::from_timestamp(timestamp_secs, 0).map(|dt| dt.date_naive())
}

/// 기준일로부터 `lookback_days` 일 전 날짜 (달력 기준)
pub fn lookback_start(latest: NaiveDate, lookback_days: u32) -> NaiveDate {
  latest - Duration::days(i64::from(lookback_days))
}

/// 로그/리포트용 시각 포맷
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
  dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
