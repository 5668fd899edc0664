//! Rendering-agnostic description of what is on screen.

use chrono::{DateTime, Utc};
use shared::domain::VerdictCategory;

use crate::evidence::{display_sections, EvidenceSection};

use super::reducer::{
    ControllerState, FeedbackState, Phase, ERROR_VERDICT_LABEL, FEEDBACK_PENDING_MESSAGE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub loading_visible: bool,
    pub analyze_enabled: bool,
    pub results: Option<ResultsView>,
    pub feedback: Option<FeedbackView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub verdict_label: String,
    pub category: VerdictCategory,
    pub explanation: String,
    pub sections: Vec<EvidenceSection>,
    pub show_no_results: bool,
    pub analyzed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub controls_enabled: bool,
    pub message: Option<FeedbackMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    pub tone: MessageTone,
    pub text: String,
}

impl FeedbackMessage {
    fn new(tone: MessageTone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

impl ViewModel {
    pub fn from_state(state: &ControllerState) -> Self {
        match &state.phase {
            Phase::Idle => Self {
                loading_visible: false,
                analyze_enabled: true,
                results: None,
                feedback: None,
            },
            Phase::Submitting { .. } => Self {
                loading_visible: true,
                analyze_enabled: false,
                results: None,
                feedback: None,
            },
            Phase::ShowingResults { analysis, feedback } => {
                let sections = display_sections(&analysis.evidence);
                let (controls_enabled, message) = match feedback {
                    FeedbackState::Collecting => (true, None),
                    FeedbackState::Pending { .. } => (
                        false,
                        Some(FeedbackMessage::new(
                            MessageTone::Pending,
                            FEEDBACK_PENDING_MESSAGE,
                        )),
                    ),
                    FeedbackState::Submitted { message, .. } => (
                        false,
                        Some(FeedbackMessage::new(MessageTone::Success, message.clone())),
                    ),
                    FeedbackState::Failed { message } => (
                        true,
                        Some(FeedbackMessage::new(MessageTone::Error, message.clone())),
                    ),
                };
                Self {
                    loading_visible: false,
                    analyze_enabled: true,
                    results: Some(ResultsView {
                        verdict_label: analysis.verdict_label.clone(),
                        category: analysis.category,
                        explanation: analysis.explanation.clone(),
                        show_no_results: sections.is_empty(),
                        sections,
                        analyzed_at: state.session.active().map(|active| active.completed_at),
                    }),
                    feedback: Some(FeedbackView {
                        controls_enabled,
                        message,
                    }),
                }
            }
            Phase::ShowingError { message } => Self {
                loading_visible: false,
                analyze_enabled: true,
                results: Some(ResultsView {
                    verdict_label: ERROR_VERDICT_LABEL.to_string(),
                    category: VerdictCategory::Error,
                    explanation: message.clone(),
                    sections: Vec::new(),
                    show_no_results: true,
                    analyzed_at: None,
                }),
                feedback: None,
            },
        }
    }

    pub fn section(&self, provider: shared::domain::Provider) -> Option<&EvidenceSection> {
        self.results
            .as_ref()?
            .sections
            .iter()
            .find(|section| section.provider == provider)
    }
}
