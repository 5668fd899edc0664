//! Rendering adapters. Every string that originates from the backend passes
//! through the adapter's sanitiser before it is emitted.

use std::fmt::Write as _;

use shared::domain::VerdictCategory;

use crate::{
    controller::{
        events::{Notice, NoticeKind},
        view::{MessageTone, ViewModel},
    },
    sanitize::{escape_html, sanitize_terminal},
};

pub const NO_RESULTS_TEXT: &str = "No search results found.";
pub const LOADING_TEXT: &str = "Analyzing claim...";

pub trait Renderer: Send + Sync {
    fn render_view(&self, view: &ViewModel) -> String;
    fn render_notice(&self, notice: &Notice) -> String;
}

/// Plain text for a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render_view(&self, view: &ViewModel) -> String {
        let mut out = String::new();
        if view.loading_visible {
            out.push_str(LOADING_TEXT);
            out.push('\n');
        }

        if let Some(results) = &view.results {
            let _ = writeln!(
                out,
                "Verdict: {} [{}]",
                sanitize_terminal(&results.verdict_label),
                category_tag(results.category)
            );
            let _ = writeln!(out, "Explanation: {}", sanitize_terminal(&results.explanation));
            if let Some(analyzed_at) = results.analyzed_at {
                let _ = writeln!(out, "Analyzed at: {}", analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            for section in &results.sections {
                let _ = writeln!(out, "-- {} --", section.provider.display_name());
                for entry in &section.entries {
                    let _ = writeln!(
                        out,
                        "  {}. {}",
                        entry.number,
                        sanitize_terminal(&entry.title)
                    );
                    let _ = writeln!(out, "     {}", sanitize_terminal(&entry.snippet));
                }
            }
            if results.show_no_results {
                out.push_str(NO_RESULTS_TEXT);
                out.push('\n');
            }
        }

        if let Some(feedback) = &view.feedback {
            if feedback.controls_enabled {
                out.push_str("Was this verdict accurate? /accurate or /inaccurate\n");
            }
            if let Some(message) = &feedback.message {
                let _ = writeln!(
                    out,
                    "Feedback: {} ({})",
                    sanitize_terminal(&message.text),
                    tone_tag(message.tone)
                );
            }
        }
        out
    }

    fn render_notice(&self, notice: &Notice) -> String {
        let prefix = match notice.kind {
            NoticeKind::Prompt => "?",
            NoticeKind::Info => "i",
            NoticeKind::Error => "!",
        };
        format!("[{prefix}] {}\n", sanitize_terminal(&notice.text))
    }
}

/// HTML fragment using the same class names as the original web page.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render_view(&self, view: &ViewModel) -> String {
        let mut out = String::new();
        if view.loading_visible {
            let _ = writeln!(out, r#"<div class="loading">{LOADING_TEXT}</div>"#);
        }

        if let Some(results) = &view.results {
            out.push_str("<section class=\"results\">\n");
            let _ = writeln!(
                out,
                r#"<div class="verdict-text {}">{}</div>"#,
                verdict_class(results.category),
                escape_html(&results.verdict_label)
            );
            let _ = writeln!(
                out,
                r#"<p class="explanation">{}</p>"#,
                escape_html(&results.explanation)
            );
            for section in &results.sections {
                let _ = writeln!(
                    out,
                    r#"<div class="search-results"><h3>{}</h3>"#,
                    escape_html(section.provider.display_name())
                );
                for entry in &section.entries {
                    let _ = writeln!(
                        out,
                        r#"<div class="search-result-item"><div class="search-result-header"><span class="search-result-number">{}.</span><h4 class="search-result-title">{}</h4></div><p class="search-result-snippet">{}</p></div>"#,
                        entry.number,
                        escape_html(&entry.title),
                        escape_html(&entry.snippet)
                    );
                }
                out.push_str("</div>\n");
            }
            if results.show_no_results {
                let _ = writeln!(out, r#"<div class="no-results">{NO_RESULTS_TEXT}</div>"#);
            }
            out.push_str("</section>\n");
        }

        if let Some(feedback) = &view.feedback {
            let disabled = if feedback.controls_enabled { "" } else { " disabled" };
            out.push_str("<section class=\"feedback\">\n");
            let _ = writeln!(out, r#"<button id="accurateBtn"{disabled}>Accurate</button>"#);
            let _ = writeln!(out, r#"<button id="inaccurateBtn"{disabled}>Inaccurate</button>"#);
            if let Some(message) = &feedback.message {
                let _ = writeln!(
                    out,
                    r#"<p class="feedback-message feedback-{}">{}</p>"#,
                    tone_tag(message.tone),
                    escape_html(&message.text)
                );
            }
            out.push_str("</section>\n");
        }
        out
    }

    fn render_notice(&self, notice: &Notice) -> String {
        let class = match notice.kind {
            NoticeKind::Prompt => "notice-prompt",
            NoticeKind::Info => "notice-info",
            NoticeKind::Error => "notice-error",
        };
        format!(
            "<p class=\"notice {class}\">{}</p>\n",
            escape_html(&notice.text)
        )
    }
}

fn category_tag(category: VerdictCategory) -> &'static str {
    match category {
        VerdictCategory::True => "TRUE",
        VerdictCategory::False => "FALSE",
        VerdictCategory::Uncertain => "UNCERTAIN",
        VerdictCategory::Error => "ERROR",
        VerdictCategory::Unknown => "UNKNOWN",
    }
}

fn verdict_class(category: VerdictCategory) -> &'static str {
    match category {
        VerdictCategory::True => "verdict-true",
        VerdictCategory::False => "verdict-false",
        VerdictCategory::Uncertain => "verdict-uncertain",
        VerdictCategory::Error => "verdict-error",
        VerdictCategory::Unknown => "",
    }
}

fn tone_tag(tone: MessageTone) -> &'static str {
    match tone {
        MessageTone::Pending => "pending",
        MessageTone::Success => "success",
        MessageTone::Error => "error",
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
