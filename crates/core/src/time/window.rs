use chrono::{DateTime, Duration, NaiveDate, Utc};

// The proxy serves daily bars, so the freshest complete day is yesterday.
const LOOKBACK_START_DAYS: i64 = 3;
const LOOKBACK_END_DAYS: i64 = 1;

/// Calendar-date bounds for one price-history request, inclusive on both
/// ends. `NaiveDate` renders as zero-padded `YYYY-MM-DD`, which is exactly
/// the wire format the market data proxy expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportWindow {
    /// Trailing three-day window relative to the caller's "now": start is
    /// three days ago, end is yesterday. Recomputed on every invocation so a
    /// report always reflects the day it was generated.
    pub fn lookback(now_utc: DateTime<Utc>) -> Self {
        let today = now_utc.date_naive();
        Self {
            start_date: today - Duration::days(LOOKBACK_START_DAYS),
            end_date: today - Duration::days(LOOKBACK_END_DAYS),
        }
    }
}
