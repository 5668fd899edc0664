//! The one piece of context that outlives a single request: which claim the
//! currently displayed verdict belongs to.

use chrono::{DateTime, Utc};
use shared::domain::{AnalysisId, Claim};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAnalysis {
    pub analysis_id: AnalysisId,
    pub claim: Claim,
    pub completed_at: DateTime<Utc>,
}

/// Immutable by replacement: a successful analysis yields a fresh value via
/// [`SessionState::activated`]; nothing mutates an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    active: Option<ActiveAnalysis>,
}

impl SessionState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn activated(
        analysis_id: AnalysisId,
        claim: Claim,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            active: Some(ActiveAnalysis {
                analysis_id,
                claim,
                completed_at,
            }),
        }
    }

    pub fn active(&self) -> Option<&ActiveAnalysis> {
        self.active.as_ref()
    }

    pub fn active_claim(&self) -> Option<&Claim> {
        self.active.as_ref().map(|active| &active.claim)
    }
}
