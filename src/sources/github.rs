use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::chart::ColorSource;
use crate::error::{ChartError, Result};
use crate::usage::LanguageColor;

use super::FETCH_TIMEOUT_SECS;

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    #[serde(default)]
    color: Option<String>,
}

/// GitHub linguist colors, served as `{ "Rust": { "color": "#dea584" } }`
pub struct GithubColors {
    client: reqwest::Client,
    url: String,
    extra: BTreeMap<String, String>,
}

impl GithubColors {
    pub fn new(url: impl Into<String>, extra: BTreeMap<String, String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| ChartError::Source(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            extra,
        })
    }
}

/// Flatten the registry, dropping languages without a color, sorted by
/// name. Extra entries are appended last so they win on merge.
fn parse_registry(
    raw: HashMap<String, RegistryEntry>,
    extra: &BTreeMap<String, String>,
) -> Vec<LanguageColor> {
    let mut languages: Vec<LanguageColor> = raw
        .into_iter()
        .filter_map(|(name, entry)| entry.color.map(|color| LanguageColor { name, color }))
        .collect();
    languages.sort_by(|a, b| a.name.cmp(&b.name));

    languages.extend(
        extra
            .iter()
            .map(|(name, color)| LanguageColor::new(name.clone(), color.clone())),
    );
    languages
}

#[async_trait]
impl ColorSource for GithubColors {
    async fn fetch(&self) -> Result<Vec<LanguageColor>> {
        tracing::debug!(url = %self.url, "fetching language colors");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ChartError::Source(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChartError::Source(format!("HTTP {}", response.status())));
        }

        let raw: HashMap<String, RegistryEntry> = response
            .json()
            .await
            .map_err(|e| ChartError::Source(e.to_string()))?;

        Ok(parse_registry(raw, &self.extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registry_skips_colorless_and_appends_extra() {
        let raw: HashMap<String, RegistryEntry> = serde_json::from_str(
            r##"{
                "Rust": {"color": "#dea584", "url": "https://github.com/trending?l=Rust"},
                "ABAP CDS": {"color": null, "url": "x"},
                "Go": {"color": "#00ADD8"}
            }"##,
        )
        .unwrap();
        let mut extra = BTreeMap::new();
        extra.insert("Bash".to_string(), "#89e051".to_string());

        let languages = parse_registry(raw, &extra);

        let names: Vec<&str> = languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Go", "Rust", "Bash"]);
    }
}
