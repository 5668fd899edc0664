//! Events published by the controller to rendering adapters.

use super::{reducer::Rejection, view::ViewModel};
use crate::error::ClientError;

pub const NO_ACTIVE_CLAIM_MESSAGE: &str = "Error: No claim available for feedback.";
pub const VALIDATION_PROMPT: &str = "Please enter a news claim to analyze.";

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    ViewChanged(ViewModel),
    Notice(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Re-prompt for input; nothing on screen changes.
    Prompt,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Rejection {
    pub fn notice(self) -> Notice {
        let (kind, text) = match self {
            Rejection::EmptyClaim => (NoticeKind::Prompt, VALIDATION_PROMPT),
            Rejection::AnalysisInFlight => {
                (NoticeKind::Info, "An analysis is already in progress.")
            }
            Rejection::NoActiveClaim => (NoticeKind::Error, NO_ACTIVE_CLAIM_MESSAGE),
            Rejection::FeedbackUnavailable => (
                NoticeKind::Info,
                "Feedback is available once an analysis has completed.",
            ),
            Rejection::FeedbackInFlight => {
                (NoticeKind::Info, "Feedback is already being submitted.")
            }
            Rejection::FeedbackAlreadySubmitted => (
                NoticeKind::Info,
                "Feedback has already been recorded for this result.",
            ),
        };
        Notice {
            kind,
            text: text.to_string(),
        }
    }
}

impl From<Rejection> for ClientError {
    fn from(value: Rejection) -> Self {
        match value {
            Rejection::EmptyClaim => Self::EmptyClaim,
            Rejection::AnalysisInFlight => Self::AnalysisInFlight,
            Rejection::NoActiveClaim => Self::NoActiveClaim,
            Rejection::FeedbackUnavailable => Self::FeedbackUnavailable,
            Rejection::FeedbackInFlight => Self::FeedbackInFlight,
            Rejection::FeedbackAlreadySubmitted => Self::FeedbackAlreadySubmitted,
        }
    }
}
