//! 기술 지표 스캐너 라이브러리
//!
//! 종목별 일봉 시리즈로 RSI/MACD/이동평균을 계산하고 매수/매도/중립 신호로 분류합니다.

pub mod config;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod models;
pub mod report;
pub mod scanner;
pub mod signals;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::ScannerError;
pub use crate::indicators::{IndicatorParams, IndicatorSet};
pub use crate::market_data::HistoricalDataProvider;
pub use crate::models::market_data::{Bar, Series};
pub use crate::models::record::{CycleReport, Record};
pub use crate::report::ReportSink;
pub use crate::scanner::{evaluate_series, Scanner, Scheduler};
pub use crate::signals::{Classifier, ClassifierThresholds, Signal, SignalLabel};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ScannerError>;
