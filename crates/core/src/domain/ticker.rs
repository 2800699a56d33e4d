use crate::error::ReportError;
use serde::Serialize;
use std::fmt;

/// Upper bound enforced at the API boundary, not inside the pipeline.
pub const MAX_TICKERS: usize = 3;

const MAX_SYMBOL_LEN: usize = 5;

/// A normalized ticker symbol: trimmed, upper-cased, 1 to 5 ASCII
/// alphanumeric characters. Only constructible through `new`, which is the
/// sole place the invariant is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: &str) -> Result<Self, ReportError> {
        let symbol = raw.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return Err(ReportError::Validation(
                "ticker symbol must be non-empty".to_string(),
            ));
        }
        if symbol.len() > MAX_SYMBOL_LEN || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ReportError::Validation(format!(
                "invalid ticker symbol: {}",
                raw.trim()
            )));
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered ticker sequence. Duplicates are allowed and fetched independently;
/// blank entries are discarded at parse time. May be empty — the pipeline
/// rejects an empty set before issuing any request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickerSet(Vec<Ticker>);

impl TickerSet {
    pub fn parse<I, S>(raw: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for entry in raw {
            let entry = entry.as_ref();
            if entry.trim().is_empty() {
                continue;
            }
            out.push(Ticker::new(entry)?);
        }
        Ok(Self(out))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ticker> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Ticker> {
        self.0
    }
}
