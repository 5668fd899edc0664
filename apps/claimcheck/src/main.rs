mod backend_bridge;
mod config;
mod input;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    render::{HtmlRenderer, Renderer, TextRenderer},
    ClaimController, ControllerEvent, HttpClaimBackend, Notice, NoticeKind,
};
use shared::domain::FeedbackJudgment;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::{
        commands::{dispatch_backend_command, BackendCommand},
        runtime::spawn_backend_thread,
    },
    config::{load_settings, OutputFormat},
    input::{parse_input, unknown_command_notice, InputAction, HELP_TEXT},
};

const COMMAND_QUEUE_CAPACITY: usize = 16;

#[derive(Debug, Parser)]
#[command(name = "claimcheck", about = "Check news claims against a fact-checking backend")]
struct Cli {
    /// Path to a TOML config file (defaults to ./claimcheck.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL of the fact-checking backend
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive prompt (the default)
    Repl,
    /// Analyze one claim, optionally send feedback, then exit
    Check {
        claim: String,
        #[arg(long, value_enum)]
        feedback: Option<JudgmentArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum JudgmentArg {
    Accurate,
    Inaccurate,
}

impl From<JudgmentArg> for FeedbackJudgment {
    fn from(value: JudgmentArg) -> Self {
        match value {
            JudgmentArg::Accurate => FeedbackJudgment::Accurate,
            JudgmentArg::Inaccurate => FeedbackJudgment::Inaccurate,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?.with_overrides(cli.backend_url, cli.format);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let backend = HttpClaimBackend::new(&settings.backend_url)
        .with_context(|| format!("invalid backend url {}", settings.backend_url))?;
    let renderer: Arc<dyn Renderer> = match settings.format {
        OutputFormat::Text => Arc::new(TextRenderer),
        OutputFormat::Html => Arc::new(HtmlRenderer),
    };
    tracing::info!(url = backend.base_url(), format = ?settings.format, "claimcheck starting");

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => run_repl(backend, renderer),
        Command::Check { claim, feedback } => {
            run_check(backend, renderer, &claim, feedback.map(Into::into))
        }
    }
}

fn run_check(
    backend: HttpClaimBackend,
    renderer: Arc<dyn Renderer>,
    claim: &str,
    feedback: Option<FeedbackJudgment>,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(async move {
        let controller = ClaimController::new(Arc::new(backend));
        let mut events = controller.subscribe_events();
        let mut stdout = io::stdout().lock();

        let analysis = controller.submit_claim(claim).await;
        print_notices(&mut events, renderer.as_ref(), &mut stdout)?;
        if let Err(err) = &analysis {
            if err.is_local() {
                anyhow::bail!("{err}");
            }
        }
        let view = controller.view().await;
        write!(stdout, "{}", renderer.render_view(&view))?;
        analysis.context("analysis failed")?;

        if let Some(judgment) = feedback {
            let sent = controller.submit_feedback(judgment).await;
            print_notices(&mut events, renderer.as_ref(), &mut stdout)?;
            if let Err(err) = &sent {
                if err.is_local() {
                    anyhow::bail!("{err}");
                }
            }
            let view = controller.view().await;
            write!(stdout, "{}", renderer.render_view(&view))?;
            sent.context("feedback failed")?;
        }
        stdout.flush()?;
        Ok(())
    })
}

fn print_notices(
    events: &mut tokio::sync::broadcast::Receiver<ControllerEvent>,
    renderer: &dyn Renderer,
    out: &mut impl Write,
) -> io::Result<()> {
    while let Ok(event) = events.try_recv() {
        if let ControllerEvent::Notice(notice) = event {
            write!(out, "{}", renderer.render_notice(&notice))?;
        }
    }
    Ok(())
}

fn run_repl(backend: HttpClaimBackend, renderer: Arc<dyn Renderer>) -> anyhow::Result<()> {
    let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(COMMAND_QUEUE_CAPACITY);
    let worker = spawn_backend_thread(backend, Arc::clone(&renderer), cmd_rx);

    println!("{HELP_TEXT}");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        let cmd = match parse_input(&line) {
            InputAction::Claim(text) => BackendCommand::AnalyzeClaim { text },
            InputAction::Feedback(judgment) => BackendCommand::SubmitFeedback { judgment },
            InputAction::Help => {
                println!("{HELP_TEXT}");
                continue;
            }
            InputAction::Quit => break,
            InputAction::Unknown(command) => {
                print_notice(renderer.as_ref(), &unknown_command_notice(&command))?;
                continue;
            }
        };
        if let Err(text) = dispatch_backend_command(&cmd_tx, cmd) {
            let notice = Notice {
                kind: NoticeKind::Error,
                text,
            };
            print_notice(renderer.as_ref(), &notice)?;
        }
    }

    drop(cmd_tx);
    if worker.join().is_err() {
        anyhow::bail!("backend worker panicked");
    }
    Ok(())
}

fn print_notice(renderer: &dyn Renderer, notice: &Notice) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", renderer.render_notice(notice))?;
    stdout.flush()
}
