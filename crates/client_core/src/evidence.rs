//! Partitioning of backend evidence into provider buckets.

use shared::{domain::Provider, protocol::EvidenceItem};

pub const DEFAULT_EVIDENCE_TITLE: &str = "No title";
pub const DEFAULT_EVIDENCE_SNIPPET: &str = "No content available";

/// Evidence split by provider, in [`Provider::ALL`] order.
///
/// Items whose `source` is missing or not a known provider are not kept; only
/// their count survives in `unrecognized`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceGroups {
    buckets: [Vec<EvidenceItem>; 3],
    unrecognized: usize,
}

impl EvidenceGroups {
    pub fn group(items: &[EvidenceItem]) -> Self {
        let mut groups = Self::default();
        for item in items {
            match item.source.as_deref().and_then(Provider::from_source) {
                Some(provider) => groups.buckets[bucket_index(provider)].push(item.clone()),
                None => groups.unrecognized += 1,
            }
        }
        groups
    }

    pub fn bucket(&self, provider: Provider) -> &[EvidenceItem] {
        &self.buckets[bucket_index(provider)]
    }

    /// Non-empty buckets only, in provider declaration order.
    pub fn displayable(&self) -> impl Iterator<Item = (Provider, &[EvidenceItem])> + '_ {
        Provider::ALL
            .into_iter()
            .map(|provider| (provider, self.bucket(provider)))
            .filter(|(_, items)| !items.is_empty())
    }

    pub fn has_any_results(&self) -> bool {
        self.buckets.iter().any(|bucket| !bucket.is_empty())
    }

    pub fn unrecognized(&self) -> usize {
        self.unrecognized
    }
}

fn bucket_index(provider: Provider) -> usize {
    match provider {
        Provider::SerpApi => 0,
        Provider::DuckDuckGo => 1,
        Provider::Tavily => 2,
    }
}

/// One evidence entry as it will be shown: numbered within its bucket and with
/// display defaults applied. Text is still untrusted at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceEntry {
    pub number: usize,
    pub title: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceSection {
    pub provider: Provider,
    pub entries: Vec<EvidenceEntry>,
}

pub fn display_sections(groups: &EvidenceGroups) -> Vec<EvidenceSection> {
    groups
        .displayable()
        .map(|(provider, items)| EvidenceSection {
            provider,
            entries: items
                .iter()
                .enumerate()
                .map(|(idx, item)| EvidenceEntry {
                    number: idx + 1,
                    title: non_empty_or(item.title.as_deref(), DEFAULT_EVIDENCE_TITLE),
                    snippet: non_empty_or(item.snippet.as_deref(), DEFAULT_EVIDENCE_SNIPPET),
                })
                .collect(),
        })
        .collect()
}

pub(crate) fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, source: Option<&str>) -> EvidenceItem {
        EvidenceItem {
            title: Some(title.to_string()),
            snippet: Some(format!("{title} snippet")),
            source: source.map(str::to_string),
        }
    }

    fn titles(items: &[EvidenceItem]) -> Vec<&str> {
        items.iter().filter_map(|i| i.title.as_deref()).collect()
    }

    #[test]
    fn partition_is_stable_per_bucket() {
        let input = vec![
            item("t1", Some("Tavily")),
            item("s1", Some("SerpAPI")),
            item("d1", Some("DuckDuckGo")),
            item("t2", Some("Tavily")),
            item("x1", Some("Bing")),
            item("s2", Some("SerpAPI")),
            item("t3", Some("Tavily")),
        ];
        let groups = EvidenceGroups::group(&input);

        assert_eq!(titles(groups.bucket(Provider::SerpApi)), vec!["s1", "s2"]);
        assert_eq!(titles(groups.bucket(Provider::DuckDuckGo)), vec!["d1"]);
        assert_eq!(titles(groups.bucket(Provider::Tavily)), vec!["t1", "t2", "t3"]);
        assert_eq!(groups.unrecognized(), 1);

        // Each bucket equals the input filtered to that provider.
        for provider in Provider::ALL {
            let expected: Vec<EvidenceItem> = input
                .iter()
                .filter(|i| i.source.as_deref() == Some(provider.source_tag()))
                .cloned()
                .collect();
            assert_eq!(groups.bucket(provider), expected.as_slice());
        }
    }

    #[test]
    fn no_results_when_every_bucket_is_empty() {
        let empty = EvidenceGroups::group(&[]);
        assert!(!empty.has_any_results());
        assert_eq!(empty.displayable().count(), 0);

        let only_unknown = EvidenceGroups::group(&[
            item("a", Some("Bing")),
            item("b", None),
            item("c", Some("tavily")),
        ]);
        assert!(!only_unknown.has_any_results());
        assert_eq!(only_unknown.unrecognized(), 3);

        let one = EvidenceGroups::group(&[item("a", Some("DuckDuckGo"))]);
        assert!(one.has_any_results());
    }

    #[test]
    fn displayable_follows_declaration_order() {
        let groups = EvidenceGroups::group(&[
            item("t", Some("Tavily")),
            item("s", Some("SerpAPI")),
        ]);
        let order: Vec<Provider> = groups.displayable().map(|(p, _)| p).collect();
        assert_eq!(order, vec![Provider::SerpApi, Provider::Tavily]);
    }

    #[test]
    fn sections_number_entries_and_apply_defaults() {
        let groups = EvidenceGroups::group(&[
            item("first", Some("Tavily")),
            EvidenceItem {
                title: None,
                snippet: Some(String::new()),
                source: Some("Tavily".to_string()),
            },
        ]);
        let sections = display_sections(&groups);
        assert_eq!(sections.len(), 1);
        let entries = &sections[0].entries;
        assert_eq!(entries[0].number, 1);
        assert_eq!(entries[0].title, "first");
        assert_eq!(entries[1].number, 2);
        assert_eq!(entries[1].title, DEFAULT_EVIDENCE_TITLE);
        assert_eq!(entries[1].snippet, DEFAULT_EVIDENCE_SNIPPET);
    }
}
