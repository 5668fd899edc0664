use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Claim, FeedbackJudgment},
    error::ApiErrorBody,
    protocol::{
        AnalysisResult, AnalyzeClaimRequest, FeedbackAck, HealthResponse, SubmitFeedbackRequest,
        ANALYZE_CLAIM_PATH, HEALTH_PATH, SUBMIT_FEEDBACK_PATH,
    },
};
use tracing::debug;
use url::Url;

pub mod classify;
pub mod controller;
pub mod error;
pub mod evidence;
pub mod render;
pub mod sanitize;
pub mod session;

pub use controller::{
    events::{ControllerEvent, Notice, NoticeKind},
    orchestration::ClaimController,
    view::{FeedbackView, MessageTone, ResultsView, ViewModel},
};
pub use error::ClientError;

/// Where the analysis backend listens unless configured otherwise.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// The analysis service as seen by the controller.
#[async_trait]
pub trait ClaimBackend: Send + Sync {
    async fn analyze_claim(&self, claim: &Claim) -> Result<AnalysisResult, ClientError>;
    async fn submit_feedback(
        &self,
        claim: &Claim,
        judgment: FeedbackJudgment,
    ) -> Result<FeedbackAck, ClientError>;
}

pub struct HttpClaimBackend {
    http: Client,
    base_url: String,
}

impl HttpClaimBackend {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let res = self
            .http
            .get(format!("{}{HEALTH_PATH}", self.base_url))
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: HEALTH_PATH,
                source,
            })?;
        read_json(HEALTH_PATH, res).await
    }

    async fn post_json<B, T>(&self, endpoint: &'static str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self
            .http
            .post(format!("{}{endpoint}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        read_json(endpoint, res).await
    }
}

#[async_trait]
impl ClaimBackend for HttpClaimBackend {
    async fn analyze_claim(&self, claim: &Claim) -> Result<AnalysisResult, ClientError> {
        self.post_json(ANALYZE_CLAIM_PATH, &AnalyzeClaimRequest { claim_text: claim })
            .await
    }

    async fn submit_feedback(
        &self,
        claim: &Claim,
        judgment: FeedbackJudgment,
    ) -> Result<FeedbackAck, ClientError> {
        self.post_json(
            SUBMIT_FEEDBACK_PATH,
            &SubmitFeedbackRequest {
                claim_text: claim,
                feedback_type: judgment,
            },
        )
        .await
    }
}

async fn read_json<T: DeserializeOwned>(
    endpoint: &'static str,
    res: reqwest::Response,
) -> Result<T, ClientError> {
    let status = res.status();
    let bytes = res
        .bytes()
        .await
        .map_err(|source| ClientError::Transport { endpoint, source })?;

    if !status.is_success() {
        let detail = ApiErrorBody::detail_from_bytes(&bytes);
        debug!(endpoint, status = status.as_u16(), ?detail, "backend returned error status");
        return Err(ClientError::Status {
            endpoint,
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { endpoint, source })
}

/// Trims whitespace and trailing slashes and checks the result is an absolute
/// http(s) URL with a host.
pub fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: &str| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(trimmed).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
