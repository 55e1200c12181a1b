use std::collections::BTreeSet;

use crate::usage::UsageItem;

const WILDCARD: &str = "**";

/// One name-matching rule. Stored lowercased; matching ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `Name`
    Exact(String),
    /// `Name**`
    Prefix(String),
    /// `**Name`
    Suffix(String),
}

impl Pattern {
    /// Classify a raw pattern. The leading marker is checked first, so
    /// `"**"` is a suffix rule matching everything and `"**mid**"` is the
    /// suffix rule `"mid**"`.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if let Some(rest) = lower.strip_prefix(WILDCARD) {
            Pattern::Suffix(rest.to_string())
        } else if let Some(rest) = lower.strip_suffix(WILDCARD) {
            Pattern::Prefix(rest.to_string())
        } else {
            Pattern::Exact(lower)
        }
    }

    pub fn is_wildcard(&self) -> bool {
        !matches!(self, Pattern::Exact(_))
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            Pattern::Exact(exact) => name == *exact,
            Pattern::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Pattern::Suffix(suffix) => name.ends_with(suffix.as_str()),
        }
    }
}

/// A mixed set of exact, prefix and suffix rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    exact: Vec<Pattern>,
    wildcards: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = PatternSet::default();
        for pattern in raw.into_iter().map(|p| Pattern::parse(p.as_ref())) {
            if set.exact.contains(&pattern) || set.wildcards.contains(&pattern) {
                continue;
            }
            if pattern.is_wildcard() {
                set.wildcards.push(pattern);
            } else {
                set.exact.push(pattern);
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcards.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.wildcards.iter().any(|p| p.matches(name)) || self.exact.iter().any(|p| p.matches(name))
    }

    /// Drop every item whose name matches a rule, keeping input order.
    ///
    /// Wildcard rules run first, then exact names on what is left.
    pub fn exclude(&self, items: &[UsageItem]) -> Vec<UsageItem> {
        if self.is_empty() {
            return items.to_vec();
        }

        let survivors: Vec<&UsageItem> = items
            .iter()
            .filter(|item| !self.wildcards.iter().any(|p| p.matches(&item.name)))
            .collect();

        survivors
            .into_iter()
            .filter(|item| !self.exact.iter().any(|p| p.matches(&item.name)))
            .cloned()
            .collect()
    }
}

impl From<&BTreeSet<String>> for PatternSet {
    fn from(raw: &BTreeSet<String>) -> Self {
        PatternSet::new(raw)
    }
}

/// Exclusion filter over raw pattern strings
pub fn filter(items: &[UsageItem], patterns: &BTreeSet<String>) -> Vec<UsageItem> {
    PatternSet::from(patterns).exclude(items)
}
