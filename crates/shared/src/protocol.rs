use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Claim, FeedbackJudgment};

pub const ANALYZE_CLAIM_PATH: &str = "/analyze_claim";
pub const SUBMIT_FEEDBACK_PATH: &str = "/submit_feedback";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeClaimRequest<'a> {
    pub claim_text: &'a Claim,
}

/// Backend response to `POST /analyze_claim`.
///
/// Every field is optional on the wire; presentation defaults are applied by
/// the client, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, rename = "search_results", deserialize_with = "null_as_default")]
    pub evidence_items: Vec<EvidenceItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_claim: Option<String>,
}

impl AnalysisResult {
    /// False only when the backend reports analyzing different text than was sent.
    pub fn echoes(&self, claim: &Claim) -> bool {
        self.received_claim
            .as_deref()
            .map_or(true, |received| received == claim.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitFeedbackRequest<'a> {
    pub claim_text: &'a Claim,
    pub feedback_type: FeedbackJudgment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
