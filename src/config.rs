/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::ScannerError;
use crate::indicators::IndicatorParams;
use crate::market_data::yahoo::DEFAULT_BASE_URL;
use crate::signals::ClassifierThresholds;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub data_source: DataSourceConfig,
    pub indicators: IndicatorParams,
    pub thresholds: ClassifierThresholds,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub tickers: Vec<String>,
    pub lookback_days: u32,
    pub interval_secs: u64,
    pub max_concurrent_fetches: usize,
    pub run_once: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    Yahoo,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    pub kind: DataSourceKind,
    pub base_url: String,
    pub csv_dir: Option<String>,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// 로거 초기화 전에 생긴 설정 관련 메시지. 호출 측이 로깅 준비 후 출력한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNotice {
    pub level: log::Level,
    pub message: String,
}

impl ConfigNotice {
    fn new(level: log::Level, message: String) -> Self {
        ConfigNotice { level, message }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults when it is absent.
    ///
    /// Returns the notices collected while loading so they can be logged once
    /// the logger (whose level comes from this config) is up.
    pub fn load(path: Option<&Path>) -> Result<(Self, Vec<ConfigNotice>), ScannerError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let mut notices = Vec::new();

        let mut cfg = if path.exists() {
            let settings = config::Config::builder()
                .add_source(config::File::from(path).required(true))
                .build()
                .map_err(|e| ScannerError::ConfigError(format!("Failed to read config file: {}", e)))?;

            settings
                .try_deserialize::<Config>()
                .map_err(|e| ScannerError::ConfigError(format!("Failed to parse config file: {}", e)))?
        } else {
            notices.push(ConfigNotice::new(
                log::Level::Info,
                format!("설정 파일 없음 ({}), 기본값 사용", path.display()),
            ));
            Config::default()
        };

        cfg.normalize_tickers();

        // environment overrides
        notices.extend(cfg.apply_overrides(|key| env::var(key).ok()));
        cfg.validate()?;
        Ok((cfg, notices))
    }

    /// 파일에서 읽은 종목도 환경 변수와 같은 규칙으로 정리 (공백 제거, 대문자)
    pub fn normalize_tickers(&mut self) {
        for ticker in self.scanner.tickers.iter_mut() {
            *ticker = ticker.trim().to_uppercase();
        }
    }

    /// Apply overrides for runtime fields. `lookup` resolves a variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<ConfigNotice>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut notices = Vec::new();
        let mut ignored = |key: &str, value: &str| {
            notices.push(ConfigNotice::new(log::Level::Warn, format!("{} 값 무시: {}", key, value)));
        };

        if let Some(v) = lookup("SCANNER_TICKERS") {
            let tickers = parse_ticker_list(&v);
            if tickers.is_empty() { ignored("SCANNER_TICKERS", &v); } else { self.scanner.tickers = tickers; }
        }
        if let Some(v) = lookup("SCANNER_INTERVAL_SECS") {
            match v.trim().parse() {
                Ok(secs) => self.scanner.interval_secs = secs,
                Err(_) => ignored("SCANNER_INTERVAL_SECS", &v),
            }
        }
        if let Some(v) = lookup("SCANNER_LOOKBACK_DAYS") {
            match v.trim().parse() {
                Ok(days) => self.scanner.lookback_days = days,
                Err(_) => ignored("SCANNER_LOOKBACK_DAYS", &v),
            }
        }
        if let Some(v) = lookup("DATA_SOURCE_KIND") {
            match v.trim().to_lowercase().as_str() {
                "yahoo" => self.data_source.kind = DataSourceKind::Yahoo,
                "csv" => self.data_source.kind = DataSourceKind::Csv,
                _ => ignored("DATA_SOURCE_KIND", &v),
            }
        }
        if let Some(v) = lookup("DATA_SOURCE_BASE_URL") { if !v.is_empty() { self.data_source.base_url = v; } }
        if let Some(v) = lookup("DATA_SOURCE_CSV_DIR") { if !v.is_empty() { self.data_source.csv_dir = Some(v); } }
        if let Some(v) = lookup("LOG_LEVEL") { if !v.is_empty() { self.logging.level = v; } }

        notices
    }

    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.scanner.tickers.is_empty() {
            return Err(ScannerError::ConfigError("scanner.tickers must not be empty".to_string()));
        }
        if let Some(blank) = self.scanner.tickers.iter().position(|t| t.trim().is_empty()) {
            return Err(ScannerError::ConfigError(format!("scanner.tickers[{}] is blank", blank)));
        }
        if self.scanner.lookback_days == 0 {
            return Err(ScannerError::ConfigError("scanner.lookback_days must be > 0".to_string()));
        }
        if self.scanner.interval_secs == 0 {
            return Err(ScannerError::ConfigError("scanner.interval_secs must be > 0".to_string()));
        }
        if self.scanner.max_concurrent_fetches == 0 {
            return Err(ScannerError::ConfigError("scanner.max_concurrent_fetches must be > 0".to_string()));
        }
        if self.data_source.kind == DataSourceKind::Csv && self.data_source.csv_dir.is_none() {
            return Err(ScannerError::ConfigError("data_source.csv_dir is required for the csv source".to_string()));
        }

        self.indicators.validate()?;
        self.thresholds.validate()?;
        Ok(())
    }
}

/// 쉼표 구분 종목 목록 파싱 (공백 제거, 빈 항목 무시)
pub fn parse_ticker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            tickers: ["AAPL", "MSFT", "NVDA", "GOOGL", "AMZN", "TSLA", "META", "JPM", "XOM", "SPY", "QQQ"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            lookback_days: 50,
            interval_secs: 900,
            max_concurrent_fetches: 4,
            run_once: false,
        }
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        DataSourceConfig {
            kind: DataSourceKind::Yahoo,
            base_url: DEFAULT_BASE_URL.to_string(),
            csv_dir: None,
            timeout_ms: 10_000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Table,
            file_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}
