//! Backend worker: owns the tokio runtime and the controller, runs each queued
//! command as its own task and prints controller events as they arrive.
//!
//! Requests are never cancelled. When input closes the worker waits for every
//! outstanding command, then lets the printer drain the final events.

use std::{
    io::{self, Write},
    sync::Arc,
    thread,
};

use client_core::{
    render::Renderer, ClaimBackend, ClaimController, ControllerEvent, HttpClaimBackend,
};
use crossbeam_channel::Receiver;
use tokio::{runtime::Runtime, sync::broadcast::error::RecvError, task::JoinSet};
use tracing::{debug, error, info, warn};

use super::commands::BackendCommand;

/// Where rendered output goes; stdout outside of tests.
pub type OutputSink = Arc<dyn Fn(&str) + Send + Sync>;

pub fn spawn_backend_thread(
    backend: HttpClaimBackend,
    renderer: Arc<dyn Renderer>,
    cmd_rx: Receiver<BackendCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                emit(&format!("[!] Backend worker failed to start: {err}\n"));
                return;
            }
        };

        let backend = Arc::new(backend);
        runtime.block_on(probe_health(&backend));
        run_commands(&runtime, backend, renderer, cmd_rx, Arc::new(emit));
    })
}

/// Runs queued commands until `cmd_rx` disconnects and every started command
/// has finished. Blocks the calling thread, which must not be a runtime thread.
pub fn run_commands(
    runtime: &Runtime,
    backend: Arc<dyn ClaimBackend>,
    renderer: Arc<dyn Renderer>,
    cmd_rx: Receiver<BackendCommand>,
    output: OutputSink,
) {
    let controller = ClaimController::new(backend);
    let mut events = controller.subscribe_events();
    let printer = runtime.spawn(async move {
        loop {
            match events.recv().await {
                Ok(ControllerEvent::ViewChanged(view)) => output(&renderer.render_view(&view)),
                Ok(ControllerEvent::Notice(notice)) => output(&renderer.render_notice(&notice)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "renderer fell behind controller events")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut in_flight = JoinSet::new();
    for cmd in cmd_rx.iter() {
        let controller = Arc::clone(&controller);
        in_flight.spawn_on(
            async move {
                let result = match cmd {
                    BackendCommand::AnalyzeClaim { text } => controller.submit_claim(&text).await,
                    BackendCommand::SubmitFeedback { judgment } => {
                        controller.submit_feedback(judgment).await
                    }
                };
                if let Err(err) = result {
                    debug!(error = %err, local = err.is_local(), "command finished with error");
                }
            },
            runtime.handle(),
        );
    }

    info!(pending = in_flight.len(), "input closed; waiting for outstanding requests");
    runtime.block_on(async {
        while let Some(joined) = in_flight.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "backend command task failed");
            }
        }
    });

    // Last sender goes with the controller, which ends the printer loop.
    drop(controller);
    if let Err(err) = runtime.block_on(printer) {
        warn!(error = %err, "event printer task failed");
    }
    info!("backend worker stopped");
}

async fn probe_health(backend: &HttpClaimBackend) {
    match backend.health().await {
        Ok(health) if health.is_ok() => info!(url = backend.base_url(), "backend is healthy"),
        Ok(health) => {
            warn!(url = backend.base_url(), status = %health.status, "backend reported unhealthy status");
            emit(&format!(
                "[!] Backend at {} reports status '{}'.\n",
                backend.base_url(),
                health.status
            ));
        }
        Err(err) => {
            warn!(url = backend.base_url(), error = %err, "backend health probe failed");
            emit(&format!(
                "[!] Backend at {} is not reachable yet; analyses will fail until it is running.\n",
                backend.base_url()
            ));
        }
    }
}

fn emit(text: &str) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
