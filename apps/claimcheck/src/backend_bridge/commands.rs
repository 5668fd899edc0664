//! Commands queued from the input loop to the backend worker.

use crossbeam_channel::{Sender, TrySendError};
use shared::domain::FeedbackJudgment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    AnalyzeClaim { text: String },
    SubmitFeedback { judgment: FeedbackJudgment },
}

impl BackendCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::AnalyzeClaim { .. } => "analyze_claim",
            Self::SubmitFeedback { .. } => "submit_feedback",
        }
    }
}

/// Queues `cmd` without blocking; the error is a message for the user.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued input->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("Command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend worker disconnected (possible startup/runtime failure); restart claimcheck"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (tx, rx) = bounded(1);
        dispatch_backend_command(
            &tx,
            BackendCommand::AnalyzeClaim {
                text: "first".to_string(),
            },
        )
        .expect("queued");

        let full = dispatch_backend_command(
            &tx,
            BackendCommand::SubmitFeedback {
                judgment: FeedbackJudgment::Accurate,
            },
        )
        .expect_err("full");
        assert!(full.contains("full"));

        assert_eq!(
            rx.recv().expect("command"),
            BackendCommand::AnalyzeClaim {
                text: "first".to_string()
            }
        );
        drop(rx);
        let gone = dispatch_backend_command(
            &tx,
            BackendCommand::SubmitFeedback {
                judgment: FeedbackJudgment::Inaccurate,
            },
        )
        .expect_err("disconnected");
        assert!(gone.contains("disconnected"));
    }
}
