use crate::config::Settings;
use crate::domain::ticker::Ticker;
use crate::error::{server_error_message, ReportError};
use crate::market::MarketDataClient;
use crate::time::window::ReportWindow;
use anyhow::Context;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Request-tracking identifier the proxy attaches to every response body. It
/// differs per request, so it is removed before the payload is forwarded
/// downstream to keep aggregate output comparable between runs.
pub const VOLATILE_TRACKING_FIELD: &str = "request_id";

#[derive(Debug, Clone)]
pub struct HttpMarketData {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMarketData {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = settings.require_market_data_url()?.to_string();

        let timeout_secs = std::env::var("MARKET_DATA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build market data http client")?;

        Ok(Self { http, base_url })
    }

    /// Client with default settings against an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl MarketDataClient for HttpMarketData {
    async fn fetch_window(
        &self,
        ticker: &Ticker,
        window: &ReportWindow,
    ) -> Result<String, ReportError> {
        let res = self
            .http
            .get(self.base_url.trim_end_matches('/'))
            .query(&[
                ("ticker", ticker.as_str().to_string()),
                ("startDate", window.start_date.to_string()),
                ("endDate", window.end_date.to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(ReportError::DataFetch {
                ticker: ticker.to_string(),
                message: server_error_message(&text)
                    .unwrap_or_else(|| format!("HTTP {status}")),
            });
        }

        let mut record: Value = serde_json::from_str(&text)?;
        strip_tracking_field(&mut record, ticker);
        Ok(record.to_string())
    }
}

// Best-effort: a missing key is schema drift worth flagging, not a failure.
fn strip_tracking_field(record: &mut Value, ticker: &Ticker) {
    if let Some(obj) = record.as_object_mut() {
        if obj.remove(VOLATILE_TRACKING_FIELD).is_none() {
            tracing::debug!(
                %ticker,
                field = VOLATILE_TRACKING_FIELD,
                "market data response carried no tracking field"
            );
        }
    }
}
