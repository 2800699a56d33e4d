use crate::error::ReportError;
use serde::Serialize;

pub mod http;

pub use http::HttpSummaryClient;

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";

/// One role-tagged prompt block. The pipeline only ever builds two of these
/// per run: a system instruction and a user message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_SYSTEM,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER,
            content: content.into(),
        }
    }
}

#[async_trait::async_trait]
pub trait SummaryClient: Send + Sync {
    /// Narrative text for the assembled prompt, returned verbatim. The 150
    /// word ceiling lives in the instruction message and is not re-checked
    /// here.
    async fn summarize(&self, messages: &[ChatMessage]) -> Result<String, ReportError>;
}
