pub mod domain;
pub mod error;
pub mod market;
pub mod pipeline;
pub mod summary;
pub mod time;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub market_data_url: Option<String>,
        pub summary_url: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                market_data_url: std::env::var("MARKET_DATA_URL").ok(),
                summary_url: std::env::var("SUMMARY_URL").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_market_data_url(&self) -> anyhow::Result<&str> {
            self.market_data_url
                .as_deref()
                .context("MARKET_DATA_URL is required")
        }

        pub fn require_summary_url(&self) -> anyhow::Result<&str> {
            self.summary_url
                .as_deref()
                .context("SUMMARY_URL is required")
        }
    }
}
