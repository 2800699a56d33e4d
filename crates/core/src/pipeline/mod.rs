use crate::domain::report::Report;
use crate::domain::ticker::TickerSet;
use crate::error::ReportError;
use crate::market::MarketDataClient;
use crate::summary::SummaryClient;
use crate::time::window::ReportWindow;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub mod prompt;

/// Per-ticker payloads are joined by a blank line, in input order.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Fan out one fetch per ticker concurrently and join the serialized payloads
/// into one data block. All-or-nothing: the first failure aborts the whole
/// aggregation and sibling results are discarded.
pub async fn aggregate(
    market: &dyn MarketDataClient,
    tickers: &TickerSet,
    window: &ReportWindow,
) -> Result<String, ReportError> {
    if tickers.is_empty() {
        return Err(ReportError::Validation(
            "no tickers entered; please enter at least one stock ticker".to_string(),
        ));
    }

    // All requests go out at once. `try_join_all` keeps input order in its
    // output regardless of completion order.
    let fetches = tickers
        .iter()
        .map(|ticker| market.fetch_window(ticker, window));
    let payloads = futures::future::try_join_all(fetches).await?;

    Ok(payloads.join(BLOCK_SEPARATOR))
}

/// Drives one generation run end to end: parse tickers, compute the lookback
/// window, aggregate market data, then summarize. Stateless and re-entrant;
/// single-flight concerns belong to the caller.
pub struct ReportEngine {
    market: Arc<dyn MarketDataClient>,
    summary: Arc<dyn SummaryClient>,
}

impl ReportEngine {
    pub fn new(market: Arc<dyn MarketDataClient>, summary: Arc<dyn SummaryClient>) -> Self {
        Self { market, summary }
    }

    pub async fn generate(
        &self,
        raw_tickers: &[String],
        now: DateTime<Utc>,
    ) -> Result<Report, ReportError> {
        let tickers = TickerSet::parse(raw_tickers)?;
        let window = ReportWindow::lookback(now);

        let block = aggregate(self.market.as_ref(), &tickers, &window).await?;

        // Summarization starts only after every fetch has settled.
        let messages = prompt::build_messages(&block);
        let narrative = self.summary.summarize(&messages).await?;

        Ok(Report {
            start_date: window.start_date,
            end_date: window.end_date,
            tickers: tickers.into_vec(),
            generated_at: now,
            narrative,
        })
    }
}
