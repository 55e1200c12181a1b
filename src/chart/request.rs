use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::colors::ColorMap;
use crate::usage::{StatsData, UsageItem};

/// Which stats list a chart is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Languages,
    Projects,
    Editors,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Languages => "languages",
            Category::Projects => "projects",
            Category::Editors => "editors",
        }
    }

    /// Pick this category's list out of a stats response
    pub fn select(&self, data: &StatsData) -> Option<Vec<UsageItem>> {
        match self {
            Category::Languages => data.languages.clone(),
            Category::Projects => data.projects.clone(),
            Category::Editors => data.editors.clone(),
        }
    }

    /// Only languages have a remote color registry
    pub fn has_remote_colors(&self) -> bool {
        matches!(self, Category::Languages)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Pie,
}

/// How an item matched by several groups is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOverlap {
    /// Every matching group absorbs the item
    #[default]
    Shared,
    /// Only the first group (in request order) absorbs the item
    FirstWins,
}

/// Group name -> member patterns, in the order the request lists them
pub type GroupDefs = IndexMap<String, BTreeSet<String>>;

/// Output size in pixels; both must be set to take effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizeHints {
    pub height: Option<u32>,
    pub width: Option<u32>,
}

impl SizeHints {
    pub fn both(&self) -> Option<(u32, u32)> {
        match (self.height, self.width) {
            (Some(h), Some(w)) => Some((h, w)),
            _ => None,
        }
    }
}

/// Everything one chart run needs to know. Read-only for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Correlates the request with its rendered artifact
    #[serde(default = "new_chart_id")]
    pub id: String,
    /// Stats owner; falls back to the configured user
    #[serde(default)]
    pub username: Option<String>,
    #[serde(alias = "chart_data")]
    pub category: Category,
    #[serde(default, alias = "chart_type")]
    pub kind: ChartKind,
    #[serde(default)]
    pub groups: Option<GroupDefs>,
    #[serde(default)]
    pub group_overlap: GroupOverlap,
    /// Patterns removed from the final dataset
    #[serde(default)]
    pub hide: Option<BTreeSet<String>>,
    /// Per-item color overrides, highest precedence
    #[serde(default)]
    pub colors: Option<ColorMap>,
    /// Colors for group names
    #[serde(default)]
    pub group_colors: Option<ColorMap>,
    #[serde(flatten)]
    pub size: SizeHints,
}

pub fn new_chart_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ChartRequest {
    pub fn new(category: Category) -> Self {
        Self {
            id: new_chart_id(),
            username: None,
            category,
            kind: ChartKind::default(),
            groups: None,
            group_overlap: GroupOverlap::default(),
            hide: None,
            colors: None,
            group_colors: None,
            size: SizeHints::default(),
        }
    }

    /// Parse a request file; `.toml` is read as TOML, anything else as JSON
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path.extension().is_some_and(|e| e == "toml");
        let request = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_request() {
        let json = r##"{
            "id": "abc",
            "chart_data": "languages",
            "chart_type": "pie",
            "groups": {"Native": ["C", "C++"]},
            "hide": ["Markdown"],
            "colors": {"Rust": "#AA0000"},
            "height": 400,
            "width": 800
        }"##;
        let request: ChartRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.id, "abc");
        assert_eq!(request.category, Category::Languages);
        assert_eq!(request.kind, ChartKind::Pie);
        assert_eq!(request.groups.as_ref().unwrap()["Native"].len(), 2);
        assert_eq!(request.group_overlap, GroupOverlap::Shared);
        assert_eq!(request.size.both(), Some((400, 800)));
    }

    #[test]
    fn test_minimal_request_gets_an_id() {
        let request: ChartRequest = serde_json::from_str(r#"{"category": "editors"}"#).unwrap();
        assert_eq!(request.category, Category::Editors);
        assert!(uuid::Uuid::parse_str(&request.id).is_ok());
        assert!(request.groups.is_none());
        assert!(request.hide.is_none());
        assert_eq!(request.size.both(), None);
    }

    #[test]
    fn test_parse_toml_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.toml");
        std::fs::write(
            &path,
            r##"
category = "projects"
group_overlap = "first_wins"
hide = ["scratch-**"]

[groups]
Work = ["acme-**"]

[group_colors]
Work = "#112233"
"##,
        )
        .unwrap();

        let request = ChartRequest::from_file(&path).unwrap();
        assert_eq!(request.category, Category::Projects);
        assert_eq!(request.group_overlap, GroupOverlap::FirstWins);
        assert_eq!(request.group_colors.unwrap()["Work"], "#112233");
    }

    #[test]
    fn test_groups_keep_request_order() {
        let json = r#"{"category": "languages", "groups": {"Zeta": ["a"], "Alpha": ["b"], "Mid": ["c"]}}"#;
        let request: ChartRequest = serde_json::from_str(json).unwrap();
        let order: Vec<&str> = request.groups.as_ref().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(order, vec!["Zeta", "Alpha", "Mid"]);

        let toml_request: ChartRequest = toml::from_str(
            "category = \"projects\"\n[groups]\nWork = [\"acme-**\"]\nHome = [\"dotfiles\"]\n",
        )
        .unwrap();
        let order: Vec<&str> = toml_request.groups.as_ref().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(order, vec!["Work", "Home"]);
    }

    #[test]
    fn test_select_category() {
        let data = StatsData {
            languages: Some(vec![crate::usage::item("Rust", 1.0, 0, 0)]),
            projects: None,
            editors: Some(Vec::new()),
        };
        assert_eq!(Category::Languages.select(&data).unwrap().len(), 1);
        assert!(Category::Projects.select(&data).is_none());
        assert!(Category::Editors.select(&data).unwrap().is_empty());
    }
}
