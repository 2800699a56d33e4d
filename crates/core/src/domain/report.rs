use crate::domain::ticker::Ticker;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One finished generation run. Replaced wholesale on the next run; never
/// persisted or appended to. Outbound only, so it serializes but is never
/// read back.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub tickers: Vec<Ticker>,
    pub generated_at: DateTime<Utc>,
    pub narrative: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn serializes_with_plain_string_tickers_and_wire_dates() {
        let report = Report {
            start_date: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            tickers: vec![Ticker::new("AAPL").unwrap()],
            generated_at: Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap(),
            narrative: "Hold AAPL.".to_string(),
        };

        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["start_date"], json!("2026-08-27"));
        assert_eq!(v["end_date"], json!("2026-08-29"));
        assert_eq!(v["tickers"], json!(["AAPL"]));
        assert_eq!(v["narrative"], json!("Hold AAPL."));
    }
}
