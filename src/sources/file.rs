use async_trait::async_trait;
use std::path::PathBuf;

use crate::chart::{ColorSource, StatsSource};
use crate::error::Result;
use crate::usage::{LanguageColor, StatsResponse};

/// Stats read from a saved WakaTime response, for offline use
pub struct FileStatsSource {
    path: PathBuf,
}

impl FileStatsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StatsSource for FileStatsSource {
    async fn fetch(&self, _username: &str) -> Result<StatsResponse> {
        tracing::debug!(path = %self.path.display(), "reading stats file");
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A fixed color list. Empty stands for "no registry".
#[derive(Default)]
pub struct StaticColors(pub Vec<LanguageColor>);

#[async_trait]
impl ColorSource for StaticColors {
    async fn fetch(&self) -> Result<Vec<LanguageColor>> {
        Ok(self.0.clone())
    }
}
