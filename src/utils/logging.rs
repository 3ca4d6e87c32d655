//! 로깅 유틸리티
//!
//! 로그 초기화 및 스캐너 이벤트 로그 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::ScannerError;

/// 로그 레벨 문자열 파싱 (알 수 없는 값은 Info)
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화
///
/// `RUST_LOG` 환경변수가 설정되어 있으면 설정 파일의 레벨보다 우선한다.
pub fn init(config_level: &str) -> Result<(), ScannerError> {
    let mut builder = Builder::from_default_env();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config_level.to_string());
    let level_filter = parse_level(&log_level);

    builder
        .filter_level(level_filter)
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| ScannerError::ConfigError(format!("Failed to initialise logger: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 사이클 시작 로그
pub fn log_cycle_start(cycle: u64, instrument_count: usize) {
    log::info!("스캔 사이클 #{} 시작 - 종목 수: {}", cycle, instrument_count);
}

/// 사이클 종료 로그
pub fn log_cycle_end(cycle: u64, records: usize, skipped: usize, failed: usize) {
    log::info!(
        "스캔 사이클 #{} 종료 - 결과: {} - 건너뜀: {} - 실패: {}",
        cycle, records, skipped, failed
    );
}

/// 종목 건너뜀 로그
pub fn log_instrument_skipped(symbol: &str, reason: &str) {
    log::debug!("종목 건너뜀: {} - 사유: {}", symbol, reason);
}

/// 오류 로그
pub fn log_error(context: &str, error: &ScannerError) {
    log::warn!("오류 발생 - {}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
