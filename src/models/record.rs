use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::indicators::IndicatorSet;
use crate::signals::Signal;
use crate::utils::math::{round_dp, round_opt};

const PRICE_DP: u32 = 2;

/// 종목별 최종 결과 한 줄. 실수 값은 소수점 2자리 반올림 (Avg_Volume 제외).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "Ticker")]
    pub symbol: String,
    #[serde(rename = "RSI")]
    pub rsi: f64,
    #[serde(rename = "Signal")]
    pub signal: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "50_MA")]
    pub ma_50: Option<f64>,
    #[serde(rename = "200_MA")]
    pub ma_200: Option<f64>,
    #[serde(rename = "Volume")]
    pub volume: u64,
    #[serde(rename = "Avg_Volume")]
    pub avg_volume: Option<f64>,
    #[serde(rename = "MACD")]
    pub macd: f64,
    #[serde(rename = "MACD_Signal")]
    pub macd_signal: f64,
}

impl Record {
    /// 분류된 지표 묶음으로 레코드 생성. RSI 가 없으면 None.
    pub fn from_indicators(symbol: impl Into<String>, set: &IndicatorSet, signal: &Signal) -> Option<Self> {
        let rsi = set.rsi?;

        Some(Record {
            symbol: symbol.into(),
            rsi: round_dp(rsi, PRICE_DP),
            signal: signal.to_string(),
            price: round_dp(set.latest_close, PRICE_DP),
            ma_50: round_opt(set.ma_short, PRICE_DP),
            ma_200: round_opt(set.ma_long, PRICE_DP),
            volume: set.latest_volume,
            avg_volume: set.volume_avg,
            macd: round_dp(set.macd, PRICE_DP),
            macd_signal: round_dp(set.macd_signal, PRICE_DP),
        })
    }
}

/// 한 사이클의 결과: 종목 → 레코드.
///
/// 같은 종목이 다시 들어오면 값은 덮어쓰고 위치는 처음 자리를 유지한다.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    records: IndexMap<String, Record>,
    pub skipped: usize,
    pub failed: usize,
}

impl CycleReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        CycleReport {
            started_at,
            records: IndexMap::new(),
            skipped: 0,
            failed: 0,
        }
    }

    pub fn insert(&mut self, record: Record) {
        self.records.insert(record.symbol.clone(), record);
    }

    pub fn get(&self, symbol: &str) -> Option<&Record> {
        self.records.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.records.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 삽입 순서대로 레코드 순회
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }
}
