//! Drives the reducer against a [`ClaimBackend`].
//!
//! State lives behind a mutex that is only held while a transition is applied,
//! never across a request. The in-flight guards in the reducer are what stop a
//! second analysis (or feedback) request from being issued concurrently.

use std::sync::Arc;

use chrono::Utc;
use shared::domain::{AnalysisId, FeedbackJudgment};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use super::{
    events::ControllerEvent,
    reducer::{ControllerState, Effect, Event, Outcome, Transition},
    view::ViewModel,
};
use crate::{
    error::ClientError, evidence::EvidenceGroups, session::SessionState, ClaimBackend,
};

pub struct ClaimController {
    backend: Arc<dyn ClaimBackend>,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl ClaimController {
    pub fn new(backend: Arc<dyn ClaimBackend>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            backend,
            inner: Mutex::new(ControllerState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn view(&self) -> ViewModel {
        ViewModel::from_state(&*self.inner.lock().await)
    }

    pub async fn session(&self) -> SessionState {
        self.inner.lock().await.session.clone()
    }

    /// Validates and analyzes `raw_text`.
    ///
    /// Rejections (blank input, analysis already running) return before any
    /// request is made and leave the view untouched. A failed request is
    /// reflected in the view as an error verdict and also returned.
    pub async fn submit_claim(&self, raw_text: &str) -> Result<ViewModel, ClientError> {
        self.drive(Event::ClaimSubmitted {
            raw_text: raw_text.to_string(),
            analysis_id: AnalysisId::new(),
        })
        .await
    }

    /// Sends `judgment` for the claim behind the verdict currently shown.
    pub async fn submit_feedback(
        &self,
        judgment: FeedbackJudgment,
    ) -> Result<ViewModel, ClientError> {
        self.drive(Event::FeedbackChosen { judgment }).await
    }

    async fn drive(&self, event: Event) -> Result<ViewModel, ClientError> {
        let (effect, view) = self.dispatch(event).await?;
        let Some(effect) = effect else {
            return Ok(view);
        };

        let (resolution, failure) = self.execute(effect).await;
        let (_, view) = self.dispatch(resolution).await?;
        match failure {
            Some(err) => Err(err),
            None => Ok(view),
        }
    }

    async fn dispatch(&self, event: Event) -> Result<(Option<Effect>, ViewModel), ClientError> {
        let mut guard = self.inner.lock().await;
        let Transition { state, outcome } = guard.transition(event);
        match outcome {
            Outcome::Rejected(rejection) => {
                debug!(?rejection, "event rejected");
                let _ = self
                    .events
                    .send(ControllerEvent::Notice(rejection.notice()));
                Err(rejection.into())
            }
            Outcome::Stale => {
                debug!("ignoring response for a request the view no longer waits on");
                Ok((None, ViewModel::from_state(&guard)))
            }
            Outcome::Applied | Outcome::Effect(_) => {
                *guard = state;
                let view = ViewModel::from_state(&guard);
                let _ = self.events.send(ControllerEvent::ViewChanged(view.clone()));
                Ok((outcome.into_effect(), view))
            }
        }
    }

    async fn execute(&self, effect: Effect) -> (Event, Option<ClientError>) {
        match effect {
            Effect::SendAnalysis { analysis_id, claim } => {
                info!(%analysis_id, claim = claim.preview(), "analyzing claim");
                match self.backend.analyze_claim(&claim).await {
                    Ok(result) => {
                        let dropped = EvidenceGroups::group(&result.evidence_items).unrecognized();
                        if dropped > 0 {
                            debug!(
                                %analysis_id,
                                dropped,
                                "evidence from unrecognized sources is not displayed"
                            );
                        }
                        info!(
                            %analysis_id,
                            verdict = result.verdict.as_deref().unwrap_or_default(),
                            evidence = result.evidence_items.len(),
                            claim_echoed = result.echoes(&claim),
                            "analysis completed"
                        );
                        (
                            Event::AnalysisResolved {
                                analysis_id,
                                outcome: Ok(result),
                                resolved_at: Utc::now(),
                            },
                            None,
                        )
                    }
                    Err(err) => {
                        warn!(%analysis_id, error = %err, "analysis request failed");
                        (
                            Event::AnalysisResolved {
                                analysis_id,
                                outcome: Err(err.to_string()),
                                resolved_at: Utc::now(),
                            },
                            Some(err),
                        )
                    }
                }
            }
            Effect::SendFeedback {
                analysis_id,
                claim,
                judgment,
            } => {
                info!(%analysis_id, %judgment, "submitting feedback");
                match self.backend.submit_feedback(&claim, judgment).await {
                    Ok(ack) => (
                        Event::FeedbackResolved {
                            analysis_id,
                            outcome: Ok(ack),
                        },
                        None,
                    ),
                    Err(err) => {
                        warn!(%analysis_id, error = %err, "feedback request failed");
                        (
                            Event::FeedbackResolved {
                                analysis_id,
                                outcome: Err(err.to_string()),
                            },
                            Some(err),
                        )
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
