use shared::error::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("claim text is empty")]
    EmptyClaim,
    #[error("an analysis request is already in flight")]
    AnalysisInFlight,
    #[error("no analyzed claim is available for feedback")]
    NoActiveClaim,
    #[error("feedback is not available for the current view")]
    FeedbackUnavailable,
    #[error("feedback was already submitted for this result")]
    FeedbackAlreadySubmitted,
    #[error("a feedback request is already in flight")]
    FeedbackInFlight,
    #[error("invalid backend url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}{}", detail_suffix(.detail))]
    Status {
        endpoint: &'static str,
        status: u16,
        detail: Option<String>,
    },
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

impl ClientError {
    /// True when the error was raised before any request left the client.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::EmptyClaim
                | Self::AnalysisInFlight
                | Self::NoActiveClaim
                | Self::FeedbackUnavailable
                | Self::FeedbackAlreadySubmitted
                | Self::FeedbackInFlight
                | Self::InvalidBaseUrl { .. }
        )
    }
}

impl From<ProtocolError> for ClientError {
    fn from(value: ProtocolError) -> Self {
        match value {
            ProtocolError::EmptyClaim => Self::EmptyClaim,
        }
    }
}
