use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProtocolError;

/// User-supplied text submitted for fact-checking.
///
/// A `Claim` is always non-empty and carries no surrounding whitespace; the
/// only way to build one is [`Claim::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProtocolError::EmptyClaim);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix used in log lines so full claim text never lands in logs.
    pub fn preview(&self) -> &str {
        match self.0.char_indices().nth(CLAIM_PREVIEW_CHARS) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

const CLAIM_PREVIEW_CHARS: usize = 100;

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(pub Uuid);

impl AnalysisId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackJudgment {
    Accurate,
    Inaccurate,
}

impl FeedbackJudgment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accurate => "accurate",
            Self::Inaccurate => "inaccurate",
        }
    }
}

impl fmt::Display for FeedbackJudgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream search providers the client knows how to group evidence for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    SerpApi,
    DuckDuckGo,
    Tavily,
}

impl Provider {
    /// Declaration order; evidence buckets are always presented in this order.
    pub const ALL: [Provider; 3] = [Provider::SerpApi, Provider::DuckDuckGo, Provider::Tavily];

    /// Exact, case-sensitive match on the backend's `source` tag.
    pub fn from_source(source: &str) -> Option<Self> {
        match source {
            "SerpAPI" => Some(Self::SerpApi),
            "DuckDuckGo" => Some(Self::DuckDuckGo),
            "Tavily" => Some(Self::Tavily),
            _ => None,
        }
    }

    pub fn source_tag(self) -> &'static str {
        match self {
            Self::SerpApi => "SerpAPI",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Tavily => "Tavily",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::SerpApi => "SerpAPI (Google)",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Tavily => "Tavily",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictCategory {
    True,
    False,
    Uncertain,
    Error,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_is_trimmed_and_rejects_blank_input() {
        let claim = Claim::parse("  The moon is made of cheese \n").expect("claim");
        assert_eq!(claim.as_str(), "The moon is made of cheese");

        assert!(matches!(Claim::parse(""), Err(ProtocolError::EmptyClaim)));
        assert!(matches!(
            Claim::parse(" \t\r\n "),
            Err(ProtocolError::EmptyClaim)
        ));
    }

    #[test]
    fn claim_preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let claim = Claim::parse(&long).expect("claim");
        assert_eq!(claim.preview().chars().count(), 100);

        let short = Claim::parse("short").expect("claim");
        assert_eq!(short.preview(), "short");
    }

    #[test]
    fn provider_tags_match_exactly() {
        assert_eq!(Provider::from_source("Tavily"), Some(Provider::Tavily));
        assert_eq!(Provider::from_source("SerpAPI"), Some(Provider::SerpApi));
        assert_eq!(Provider::from_source("tavily"), None);
        assert_eq!(Provider::from_source("Bing"), None);
        for provider in Provider::ALL {
            assert_eq!(Provider::from_source(provider.source_tag()), Some(provider));
        }
    }

    #[test]
    fn judgment_serializes_as_wire_string() {
        assert_eq!(
            serde_json::to_string(&FeedbackJudgment::Inaccurate).expect("json"),
            "\"inaccurate\""
        );
        assert_eq!(FeedbackJudgment::Accurate.to_string(), "accurate");
    }
}
