use super::*;
use crate::{
    controller::view::{FeedbackMessage, FeedbackView, ResultsView},
    evidence::{EvidenceEntry, EvidenceSection},
};
use shared::domain::Provider;

fn hostile_view() -> ViewModel {
    ViewModel {
        loading_visible: false,
        analyze_enabled: true,
        results: Some(ResultsView {
            verdict_label: "<b>False</b>".to_string(),
            category: VerdictCategory::False,
            explanation: "See \u{1b}[31mred\u{1b}[0m".to_string(),
            sections: vec![EvidenceSection {
                provider: Provider::Tavily,
                entries: vec![EvidenceEntry {
                    number: 1,
                    title: r#"<img src=x onerror="alert(1)">"#.to_string(),
                    snippet: "Basalt & 'regolith'\u{7}".to_string(),
                }],
            }],
            show_no_results: false,
            analyzed_at: None,
        }),
        feedback: Some(FeedbackView {
            controls_enabled: false,
            message: Some(FeedbackMessage {
                tone: MessageTone::Success,
                text: "<script>x</script>".to_string(),
            }),
        }),
    }
}

#[test]
fn html_renderer_escapes_all_backend_text() {
    let html = HtmlRenderer.render_view(&hostile_view());
    assert!(!html.contains("<img"));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;img src=x onerror=&quot;alert(1)&quot;&gt;"));
    assert!(html.contains("Basalt &amp; &#39;regolith&#39;"));
    assert!(html.contains(r#"class="verdict-text verdict-false""#));
    assert!(html.contains(r#"<button id="accurateBtn" disabled>"#));
    assert!(html.contains("feedback-success"));
}

#[test]
fn text_renderer_strips_terminal_control_sequences() {
    let text = TextRenderer.render_view(&hostile_view());
    assert!(!text.contains('\u{1b}'));
    assert!(!text.contains('\u{7}'));
    assert!(text.contains("Verdict: <b>False</b> [FALSE]"));
    assert!(text.contains("-- Tavily --"));
    assert!(text.contains("  1. <img"));
    assert!(!text.contains("/accurate or /inaccurate"));
}

#[test]
fn no_results_and_loading_are_rendered() {
    let loading = ViewModel {
        loading_visible: true,
        analyze_enabled: false,
        results: None,
        feedback: None,
    };
    assert_eq!(TextRenderer.render_view(&loading), format!("{LOADING_TEXT}\n"));

    let mut empty = hostile_view();
    if let Some(results) = empty.results.as_mut() {
        results.sections.clear();
        results.show_no_results = true;
    }
    assert!(TextRenderer.render_view(&empty).contains(NO_RESULTS_TEXT));
    assert!(HtmlRenderer.render_view(&empty).contains("no-results"));
}

#[test]
fn notices_are_sanitized() {
    let notice = Notice {
        kind: NoticeKind::Error,
        text: "Error: <No claim>\u{1b}[2J".to_string(),
    };
    assert_eq!(
        HtmlRenderer.render_notice(&notice),
        "<p class=\"notice notice-error\">Error: &lt;No claim&gt;\u{1b}[2J</p>\n"
    );
    let text = TextRenderer.render_notice(&notice);
    assert!(text.starts_with("[!] Error: <No claim>"));
    assert!(!text.contains('\u{1b}'));
}
