use std::collections::{HashMap, HashSet};
use async_trait::async_trait;

use crate::error::ScannerError;
use crate::models::market_data::{Bar, Series};
use super::csv_file::trim_to_lookback;
use super::provider::HistoricalDataProvider;

/// 메모리에 올려둔 바 데이터로 응답하는 제공자 (테스트/오프라인 실행용)
#[derive(Debug, Default, Clone)]
pub struct InMemoryDataProvider {
    data: HashMap<String, Vec<Bar>>,
    failing: HashSet<String>,
}

impl InMemoryDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        self.insert(symbol, bars);
        self
    }

    /// 조회 시 항상 오류를 돌려줄 종목 등록
    pub fn with_failure(mut self, symbol: impl Into<String>) -> Self {
        self.failing.insert(symbol.into());
        self
    }

    pub fn insert(&mut self, symbol: impl Into<String>, bars: Vec<Bar>) {
        self.data.insert(symbol.into(), bars);
    }
}

#[async_trait]
impl HistoricalDataProvider for InMemoryDataProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_series(&self, symbol: &str, lookback_days: u32) -> Result<Series, ScannerError> {
        if self.failing.contains(symbol) {
            return Err(ScannerError::DataNotFound(format!("{}: simulated provider failure", symbol)));
        }

        let bars = self
            .data
            .get(symbol)
            .cloned()
            .map(|bars| trim_to_lookback(bars, lookback_days))
            .unwrap_or_default();

        Ok(Series::new(symbol, bars))
    }
}
