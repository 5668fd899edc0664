//! Line input from the interactive prompt.

use client_core::{Notice, NoticeKind};
use shared::domain::FeedbackJudgment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Claim(String),
    Feedback(FeedbackJudgment),
    Help,
    Quit,
    Unknown(String),
}

/// Lines starting with `/` are commands; anything else, including a blank
/// line, is claim text and is validated by the controller.
pub fn parse_input(line: &str) -> InputAction {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return InputAction::Claim(line.to_string());
    };
    match command.to_ascii_lowercase().as_str() {
        "accurate" | "a" => InputAction::Feedback(FeedbackJudgment::Accurate),
        "inaccurate" | "i" => InputAction::Feedback(FeedbackJudgment::Inaccurate),
        "help" | "h" | "?" => InputAction::Help,
        "quit" | "exit" | "q" => InputAction::Quit,
        _ => InputAction::Unknown(trimmed.to_string()),
    }
}

pub const HELP_TEXT: &str = "\
Type a news claim and press Enter to analyze it.
  /accurate   (/a)  mark the last verdict as accurate
  /inaccurate (/i)  mark the last verdict as inaccurate
  /help       (/h)  show this help
  /quit       (/q)  exit";

pub fn unknown_command_notice(command: &str) -> Notice {
    Notice {
        kind: NoticeKind::Error,
        text: format!("Unknown command {command}; type /help for the list."),
    }
}
