use crate::config::Settings;
use crate::error::{server_error_message, ReportError};
use crate::summary::{ChatMessage, SummaryClient};
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct HttpSummaryClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    content: Option<String>,
}

impl HttpSummaryClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = settings.require_summary_url()?.to_string();

        let timeout_secs = std::env::var("SUMMARY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build summary http client")?;

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
impl SummaryClient for HttpSummaryClient {
    async fn summarize(&self, messages: &[ChatMessage]) -> Result<String, ReportError> {
        // The proxy takes the bare message array as its request body.
        let res = self
            .http
            .post(&self.base_url)
            .json(&messages)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(ReportError::Summary(
                server_error_message(&text).unwrap_or_else(|| format!("HTTP {status}")),
            ));
        }

        let body: SummaryResponse = serde_json::from_str(&text)?;
        body.content.ok_or_else(|| {
            ReportError::Unexpected("summary response carried no content field".to_string())
        })
    }
}
