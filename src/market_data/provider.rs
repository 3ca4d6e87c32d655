use async_trait::async_trait;

use crate::error::ScannerError;
use crate::models::market_data::Series;

/// 과거 일봉 데이터 제공자 인터페이스
///
/// 데이터가 없는 종목은 오류가 아니라 빈 `Series` 로 돌려준다.
#[async_trait]
pub trait HistoricalDataProvider: Send + Sync {
    /// 제공자 이름 (로그용)
    fn name(&self) -> &str;

    /// 최근 `lookback_days` 달력일 동안의 일봉 조회 (오래된 것부터)
    async fn fetch_series(&self, symbol: &str, lookback_days: u32) -> Result<Series, ScannerError>;
}
