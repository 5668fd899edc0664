//! Pure state machine for the analysis and feedback flows.
//!
//! Two user events ([`Event::ClaimSubmitted`], [`Event::FeedbackChosen`]) and
//! two response events ([`Event::AnalysisResolved`],
//! [`Event::FeedbackResolved`]) drive [`ControllerState::transition`]. The
//! reducer never performs I/O; requests it wants issued come back as an
//! [`Effect`].

use chrono::{DateTime, Utc};
use shared::{
    domain::{AnalysisId, Claim, FeedbackJudgment, VerdictCategory},
    protocol::{AnalysisResult, FeedbackAck},
};

use crate::{
    classify::classify_verdict,
    evidence::{non_empty_or, EvidenceGroups},
    session::SessionState,
};

pub const UNKNOWN_VERDICT_LABEL: &str = "Unknown";
pub const NO_EXPLANATION: &str = "No explanation provided.";
pub const ERROR_VERDICT_LABEL: &str = "Error";
pub const ANALYSIS_FAILURE_MESSAGE: &str = "An error occurred while analyzing the claim. Please check if the backend server is running and try again.";
pub const FEEDBACK_PENDING_MESSAGE: &str = "Submitting feedback...";
pub const FEEDBACK_SUCCESS_MESSAGE: &str = "Feedback submitted successfully!";
pub const FEEDBACK_FAILURE_MESSAGE: &str = "Failed to submit feedback. Please try again.";

/// A successful analysis, already reduced to what gets displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedAnalysis {
    pub analysis_id: AnalysisId,
    pub verdict_label: String,
    pub category: VerdictCategory,
    pub explanation: String,
    pub evidence: EvidenceGroups,
}

impl DisplayedAnalysis {
    pub fn from_result(analysis_id: AnalysisId, result: &AnalysisResult) -> Self {
        Self {
            analysis_id,
            verdict_label: non_empty_or(result.verdict.as_deref(), UNKNOWN_VERDICT_LABEL),
            category: classify_verdict(result.verdict.as_deref()),
            explanation: non_empty_or(result.explanation.as_deref(), NO_EXPLANATION),
            evidence: EvidenceGroups::group(&result.evidence_items),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackState {
    /// Controls enabled, no message.
    Collecting,
    Pending {
        judgment: FeedbackJudgment,
    },
    /// Terminal for this result; controls stay disabled.
    Submitted {
        judgment: FeedbackJudgment,
        message: String,
    },
    /// Controls re-enabled so the user can retry.
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting {
        analysis_id: AnalysisId,
        claim: Claim,
    },
    ShowingResults {
        analysis: DisplayedAnalysis,
        feedback: FeedbackState,
    },
    ShowingError {
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub phase: Phase,
    pub session: SessionState,
}

#[derive(Debug, Clone)]
pub enum Event {
    ClaimSubmitted {
        raw_text: String,
        analysis_id: AnalysisId,
    },
    AnalysisResolved {
        analysis_id: AnalysisId,
        outcome: Result<AnalysisResult, String>,
        resolved_at: DateTime<Utc>,
    },
    FeedbackChosen {
        judgment: FeedbackJudgment,
    },
    FeedbackResolved {
        analysis_id: AnalysisId,
        outcome: Result<FeedbackAck, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendAnalysis {
        analysis_id: AnalysisId,
        claim: Claim,
    },
    SendFeedback {
        analysis_id: AnalysisId,
        claim: Claim,
        judgment: FeedbackJudgment,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyClaim,
    AnalysisInFlight,
    NoActiveClaim,
    FeedbackUnavailable,
    FeedbackInFlight,
    FeedbackAlreadySubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and a request must be issued.
    Effect(Effect),
    /// State changed, nothing to send.
    Applied,
    /// Event refused; state unchanged.
    Rejected(Rejection),
    /// Response for a request the current state no longer waits on.
    Stale,
}

impl Outcome {
    pub fn into_effect(self) -> Option<Effect> {
        match self {
            Self::Effect(effect) => Some(effect),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: ControllerState,
    pub outcome: Outcome,
}

impl ControllerState {
    pub fn transition(&self, event: Event) -> Transition {
        match event {
            Event::ClaimSubmitted {
                raw_text,
                analysis_id,
            } => self.on_claim_submitted(&raw_text, analysis_id),
            Event::AnalysisResolved {
                analysis_id,
                outcome,
                resolved_at,
            } => self.on_analysis_resolved(analysis_id, outcome, resolved_at),
            Event::FeedbackChosen { judgment } => self.on_feedback_chosen(judgment),
            Event::FeedbackResolved {
                analysis_id,
                outcome,
            } => self.on_feedback_resolved(analysis_id, outcome),
        }
    }

    fn on_claim_submitted(&self, raw_text: &str, analysis_id: AnalysisId) -> Transition {
        if matches!(self.phase, Phase::Submitting { .. }) {
            return self.unchanged(Outcome::Rejected(Rejection::AnalysisInFlight));
        }
        let Ok(claim) = Claim::parse(raw_text) else {
            return self.unchanged(Outcome::Rejected(Rejection::EmptyClaim));
        };

        Transition {
            state: ControllerState {
                phase: Phase::Submitting {
                    analysis_id,
                    claim: claim.clone(),
                },
                session: self.session.clone(),
            },
            outcome: Outcome::Effect(Effect::SendAnalysis { analysis_id, claim }),
        }
    }

    fn on_analysis_resolved(
        &self,
        analysis_id: AnalysisId,
        outcome: Result<AnalysisResult, String>,
        resolved_at: DateTime<Utc>,
    ) -> Transition {
        let Phase::Submitting {
            analysis_id: pending_id,
            claim,
        } = &self.phase
        else {
            return self.unchanged(Outcome::Stale);
        };
        if *pending_id != analysis_id {
            return self.unchanged(Outcome::Stale);
        }

        let state = match outcome {
            Ok(result) => ControllerState {
                phase: Phase::ShowingResults {
                    analysis: DisplayedAnalysis::from_result(analysis_id, &result),
                    feedback: FeedbackState::Collecting,
                },
                session: SessionState::activated(analysis_id, claim.clone(), resolved_at),
            },
            Err(_) => ControllerState {
                phase: Phase::ShowingError {
                    message: ANALYSIS_FAILURE_MESSAGE.to_string(),
                },
                session: self.session.clone(),
            },
        };
        Transition {
            state,
            outcome: Outcome::Applied,
        }
    }

    fn on_feedback_chosen(&self, judgment: FeedbackJudgment) -> Transition {
        let Some(active) = self.session.active() else {
            return self.unchanged(Outcome::Rejected(Rejection::NoActiveClaim));
        };
        let Phase::ShowingResults { analysis, feedback } = &self.phase else {
            return self.unchanged(Outcome::Rejected(Rejection::FeedbackUnavailable));
        };
        if analysis.analysis_id != active.analysis_id {
            return self.unchanged(Outcome::Rejected(Rejection::FeedbackUnavailable));
        }

        match feedback {
            FeedbackState::Collecting | FeedbackState::Failed { .. } => Transition {
                state: ControllerState {
                    phase: Phase::ShowingResults {
                        analysis: analysis.clone(),
                        feedback: FeedbackState::Pending { judgment },
                    },
                    session: self.session.clone(),
                },
                outcome: Outcome::Effect(Effect::SendFeedback {
                    analysis_id: active.analysis_id,
                    claim: active.claim.clone(),
                    judgment,
                }),
            },
            FeedbackState::Pending { .. } => {
                self.unchanged(Outcome::Rejected(Rejection::FeedbackInFlight))
            }
            FeedbackState::Submitted { .. } => {
                self.unchanged(Outcome::Rejected(Rejection::FeedbackAlreadySubmitted))
            }
        }
    }

    fn on_feedback_resolved(
        &self,
        analysis_id: AnalysisId,
        outcome: Result<FeedbackAck, String>,
    ) -> Transition {
        let Phase::ShowingResults {
            analysis,
            feedback: FeedbackState::Pending { judgment },
        } = &self.phase
        else {
            return self.unchanged(Outcome::Stale);
        };
        if analysis.analysis_id != analysis_id {
            return self.unchanged(Outcome::Stale);
        }

        let feedback = match outcome {
            Ok(ack) => FeedbackState::Submitted {
                judgment: *judgment,
                message: non_empty_or(ack.message.as_deref(), FEEDBACK_SUCCESS_MESSAGE),
            },
            Err(_) => FeedbackState::Failed {
                message: FEEDBACK_FAILURE_MESSAGE.to_string(),
            },
        };
        Transition {
            state: ControllerState {
                phase: Phase::ShowingResults {
                    analysis: analysis.clone(),
                    feedback,
                },
                session: self.session.clone(),
            },
            outcome: Outcome::Applied,
        }
    }

    fn unchanged(&self, outcome: Outcome) -> Transition {
        Transition {
            state: self.clone(),
            outcome,
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
