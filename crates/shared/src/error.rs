use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("claim text must not be empty")]
    EmptyClaim,
}

/// Error body returned by the analysis backend on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// Best-effort parse; a body that is not the expected shape yields `None`.
    pub fn detail_from_bytes(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<ApiErrorBody>(bytes)
            .ok()
            .and_then(|body| body.detail)
    }
}
