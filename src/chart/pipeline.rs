use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::colors::{self, ColorMap};
use super::group::group;
use super::pattern::PatternSet;
use super::request::{ChartKind, ChartRequest, SizeHints};
use crate::error::{ChartError, Result};
use crate::usage::{LanguageColor, StatsResponse, UsageItem};

/// Where usage stats come from. Must be safe to share across runs.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Stats for the most recent window. A category the backend could not
    /// produce is `None` in the response, never an empty list.
    async fn fetch(&self, username: &str) -> Result<StatsResponse>;
}

/// Remote per-language color registry
#[async_trait]
pub trait ColorSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<LanguageColor>>;
}

/// Turns a dataset into a stored artifact that can be found again by id
pub trait Renderer: Send + Sync {
    fn render(&self, dataset: &Dataset) -> Result<()>;

    fn find_by_id(&self, id: &str) -> Option<PathBuf>;
}

/// Final, ordered chart input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub id: String,
    pub kind: ChartKind,
    pub items: Vec<UsageItem>,
    pub colors: ColorMap,
    pub size: SizeHints,
}

/// A rendered chart and where it lives
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub id: String,
    pub path: PathBuf,
}

/// Run the pure part of a chart request over already fetched data.
///
/// Order: select category, merge colors, normalize, group, hide.
pub fn build_dataset(
    request: &ChartRequest,
    stats: &StatsResponse,
    remote_colors: &[LanguageColor],
) -> Result<Dataset> {
    let items = match request.category.select(&stats.data) {
        Some(items) if !items.is_empty() => items,
        _ => {
            return Err(ChartError::MissingData {
                category: request.category,
            })
        }
    };

    let remote = if request.category.has_remote_colors() {
        colors::from_languages(remote_colors)
    } else {
        ColorMap::new()
    };
    let merged = colors::resolve(
        request.colors.as_ref(),
        &remote,
        request.group_colors.as_ref(),
    );
    let colors = colors::normalize(merged);

    let items = match &request.groups {
        Some(groups) => group(&items, groups, request.group_overlap),
        None => items,
    };

    let items = match &request.hide {
        Some(hide) => PatternSet::from(hide).exclude(&items),
        None => items,
    };

    Ok(Dataset {
        id: request.id.clone(),
        kind: request.kind,
        items,
        colors,
        size: request.size,
    })
}

/// Fetches collaborators' data, builds the dataset and hands it to the renderer
#[derive(Clone)]
pub struct ChartService {
    stats: Arc<dyn StatsSource>,
    colors: Arc<dyn ColorSource>,
    renderer: Arc<dyn Renderer>,
    default_username: String,
    default_size: SizeHints,
}

impl ChartService {
    pub fn new(
        stats: Arc<dyn StatsSource>,
        colors: Arc<dyn ColorSource>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            stats,
            colors,
            renderer,
            default_username: "current".to_string(),
            default_size: SizeHints::default(),
        }
    }

    pub fn with_default_username(mut self, username: impl Into<String>) -> Self {
        self.default_username = username.into();
        self
    }

    pub fn with_default_size(mut self, size: SizeHints) -> Self {
        self.default_size = size;
        self
    }

    /// Fetch, build and render the dataset for `request`.
    pub async fn prepare(&self, request: &ChartRequest) -> Result<Dataset> {
        let username = request
            .username
            .as_deref()
            .unwrap_or(&self.default_username);

        let stats = self.stats.fetch(username).await?;

        let remote_colors = if request.category.has_remote_colors() {
            match self.colors.fetch().await {
                Ok(colors) => colors,
                Err(e) => {
                    tracing::warn!("color registry unavailable, using request colors only: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let mut dataset = build_dataset(request, &stats, &remote_colors)?;
        if dataset.size.both().is_none() {
            dataset.size = self.default_size;
        }
        Ok(dataset)
    }

    pub async fn create_chart(&self, request: &ChartRequest) -> Result<Chart> {
        tracing::info!(id = %request.id, category = %request.category, "creating chart");

        let dataset = self.prepare(request).await?;
        self.render(&dataset)
    }

    /// Hand a built dataset to the renderer and locate the artifact
    pub fn render(&self, dataset: &Dataset) -> Result<Chart> {
        self.renderer.render(dataset)?;

        match self.renderer.find_by_id(&dataset.id) {
            Some(path) => {
                tracing::info!(id = %dataset.id, path = %path.display(), "chart ready");
                Ok(Chart {
                    id: dataset.id.clone(),
                    path,
                })
            }
            None => Err(ChartError::MissingArtifact {
                id: dataset.id.clone(),
            }),
        }
    }

    pub fn find_chart(&self, id: &str) -> Option<PathBuf> {
        self.renderer.find_by_id(id)
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub struct FixedStats(pub StatsResponse);

    #[async_trait]
    impl StatsSource for FixedStats {
        async fn fetch(&self, _username: &str) -> Result<StatsResponse> {
            Ok(self.0.clone())
        }
    }

    pub struct FixedColors(pub Option<Vec<LanguageColor>>);

    #[async_trait]
    impl ColorSource for FixedColors {
        async fn fetch(&self) -> Result<Vec<LanguageColor>> {
            self.0
                .clone()
                .ok_or_else(|| ChartError::Source("registry down".to_string()))
        }
    }

    /// Keeps rendered datasets in memory; `lose_artifacts` simulates a sink
    /// that never stores anything.
    #[derive(Default)]
    pub struct MemoryRenderer {
        pub rendered: Mutex<HashMap<String, Dataset>>,
        pub lose_artifacts: bool,
    }

    impl Renderer for MemoryRenderer {
        fn render(&self, dataset: &Dataset) -> Result<()> {
            if !self.lose_artifacts {
                self.rendered
                    .lock()
                    .unwrap()
                    .insert(dataset.id.clone(), dataset.clone());
            }
            Ok(())
        }

        fn find_by_id(&self, id: &str) -> Option<PathBuf> {
            self.rendered
                .lock()
                .unwrap()
                .contains_key(id)
                .then(|| PathBuf::from(format!("/mem/{}", id)))
        }
    }
}
