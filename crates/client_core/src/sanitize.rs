//! Neutralisation of untrusted backend text before it reaches a renderer.

/// Escapes the characters that are significant in HTML text and attribute
/// content.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Makes text safe to print on a terminal.
///
/// Control characters (ESC, BEL, backspace, C1 controls, ...) are replaced
/// with U+FFFD so evidence cannot move the cursor, recolour output or set the
/// window title. Tabs and newlines collapse to single spaces.
pub fn sanitize_terminal(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\n' | '\r' | '\t') {
            out.push(' ');
        } else if ch.is_control() {
            out.push('\u{FFFD}');
        } else {
            out.push(ch);
        }
    }
    out
}
