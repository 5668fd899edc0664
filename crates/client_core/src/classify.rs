//! Verdict label to presentation category.

use shared::domain::VerdictCategory;

/// Maps a free-text verdict to a [`VerdictCategory`].
///
/// Case-insensitive substring match, first hit wins: `true`, `false`,
/// `uncertain` / `needs more`, `error`. Anything else, including an absent or
/// empty label, is `Unknown`.
pub fn classify_verdict(verdict: Option<&str>) -> VerdictCategory {
    let Some(verdict) = verdict else {
        return VerdictCategory::Unknown;
    };
    let lower = verdict.to_lowercase();
    if lower.contains("true") {
        VerdictCategory::True
    } else if lower.contains("false") {
        VerdictCategory::False
    } else if lower.contains("uncertain") || lower.contains("needs more") {
        VerdictCategory::Uncertain
    } else if lower.contains("error") {
        VerdictCategory::Error
    } else {
        VerdictCategory::Unknown
    }
}
