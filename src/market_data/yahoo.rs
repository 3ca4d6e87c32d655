/**
* filename : yahoo
* author : HAMA
* date: 2025. 5. 11.
* description: Yahoo Finance chart API 일봉 제공자
**/

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::ScannerError;
use crate::models::market_data::{Bar, Series};
use crate::utils::timestamp_to_date;
use super::provider::HistoricalDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; xScan/0.1)";

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default)]
    pub adjclose: Vec<AdjClose>,
}

/// 분할/배당 보정 종가
#[derive(Debug, Deserialize)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl YahooChartProvider {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, ScannerError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, symbol)
    }
}

/// chart 응답 → Series. 보정 종가가 있으면 그것을 쓴다.
/// 종가가 null 인 행은 버리고, null 거래량은 0.
pub fn parse_chart_response(symbol: &str, response: ChartResponse) -> Result<Series, ScannerError> {
    if let Some(err) = response.chart.error {
        if err.code.eq_ignore_ascii_case("Not Found") {
            return Ok(Series::empty(symbol));
        }
        return Err(ScannerError::DataNotFound(format!(
            "{}: {} {}",
            symbol,
            err.code,
            err.description.unwrap_or_default()
        )));
    }

    let result = match response.chart.result.and_then(|r| r.into_iter().next()) {
        Some(result) => result,
        None => return Ok(Series::empty(symbol)),
    };

    let adjusted = result.indicators.adjclose.into_iter().next().map(|a| a.adjclose);
    let quote = match result.indicators.quote.into_iter().next() {
        Some(quote) => quote,
        None => return Ok(Series::empty(symbol)),
    };

    let mut bars: Vec<Bar> = Vec::with_capacity(result.timestamp.len());

    for (i, ts) in result.timestamp.iter().enumerate() {
        // 보정 종가 우선, 없으면 원 종가
        let close = match adjusted
            .as_ref()
            .and_then(|adj| adj.get(i).copied().flatten())
            .or_else(|| quote.close.get(i).copied().flatten())
        {
            Some(c) => c,
            None => continue,
        };
        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .map(|v| v.max(0.0).round() as u64)
            .unwrap_or(0);
        let date = timestamp_to_date(*ts)
            .ok_or_else(|| ScannerError::ParseError(format!("{}: invalid timestamp {}", symbol, ts)))?;

        // 같은 날짜가 반복되면 뒤의 값 사용 (장중 갱신 바)
        match bars.last_mut() {
            Some(last) if last.date == date => *last = Bar::new(date, close, volume),
            _ => bars.push(Bar::new(date, close, volume)),
        }
    }

    bars.sort_by_key(|b| b.date);

    Ok(Series::new(symbol, bars))
}

#[async_trait]
impl HistoricalDataProvider for YahooChartProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_series(&self, symbol: &str, lookback_days: u32) -> Result<Series, ScannerError> {
        let url = self.chart_url(symbol);
        let range = format!("{}d", lookback_days);

        log::debug!("조회: {} (range={})", url, range);

        let response = self
            .client
            .get(&url)
            .query(&[("range", range.as_str()), ("interval", "1d")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Series::empty(symbol));
        }
        if !status.is_success() {
            return Err(ScannerError::HttpError(format!("{}: status {}", symbol, status)));
        }

        // 본문 파싱 오류는 전송 오류와 구분
        let text = response.text().await?;
        let body: ChartResponse = serde_json::from_str(&text)?;
        parse_chart_response(symbol, body)
    }
}
