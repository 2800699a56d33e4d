use crate::domain::ticker::Ticker;
use crate::error::ReportError;
use crate::time::window::ReportWindow;

pub mod provider;

pub use provider::HttpMarketData;

#[async_trait::async_trait]
pub trait MarketDataClient: Send + Sync {
    /// One serialized price payload for `ticker` over `window`. Exactly one
    /// outbound request per call; no retries, no caching.
    async fn fetch_window(
        &self,
        ticker: &Ticker,
        window: &ReportWindow,
    ) -> Result<String, ReportError>;
}
