use std::fmt;

/// Pipeline failure taxonomy. Collaborator failures map onto the first three
/// variants; transport faults, malformed bodies, and anything else
/// unclassified fold into `Unexpected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// No usable ticker was supplied. Recoverable by editing input; raised
    /// before any network call.
    Validation(String),

    /// A market data request failed, carrying the server-reported message.
    /// Aborts the whole run; partial results are discarded.
    DataFetch { ticker: String, message: String },

    /// The summarization request failed, carrying the server-reported message.
    Summary(String),

    /// Unrecognized fault, normalized at the orchestration boundary.
    Unexpected(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Validation(message) => write!(f, "{message}"),
            ReportError::DataFetch { ticker, message } => {
                write!(f, "market data request for {ticker} failed: {message}")
            }
            ReportError::Summary(message) => {
                write!(f, "failed to get analysis: {message}")
            }
            ReportError::Unexpected(message) => write!(f, "unexpected error: {message}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        ReportError::Unexpected(format!("http transport failure: {err}"))
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Unexpected(format!("malformed JSON response: {err}"))
    }
}

/// Best-effort extraction of the `error` field both proxies put in failure
/// bodies. Returns `None` when the body is not JSON or lacks the field.
pub fn server_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_fetch_display_includes_server_message() {
        let err = ReportError::DataFetch {
            ticker: "AAPL".to_string(),
            message: "rate limited".to_string(),
        };
        let s = err.to_string();
        assert!(s.contains("AAPL"));
        assert!(s.contains("rate limited"));
    }

    #[test]
    fn extracts_error_field_from_failure_body() {
        assert_eq!(
            server_error_message(r#"{"error":"rate limited"}"#),
            Some("rate limited".to_string())
        );
        assert_eq!(server_error_message(r#"{"message":"nope"}"#), None);
        assert_eq!(server_error_message("not json"), None);
    }
}
