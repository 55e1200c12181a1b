use async_trait::async_trait;
use std::time::Duration;

use crate::chart::StatsSource;
use crate::error::{ChartError, Result};
use crate::usage::StatsResponse;

use super::FETCH_TIMEOUT_SECS;

const STATS_RANGE: &str = "last_7_days";

/// Client for the WakaTime stats endpoint
pub struct WakatimeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WakatimeClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| ChartError::Source(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn stats_url(&self, username: &str) -> String {
        format!("{}/users/{}/stats/{}", self.base_url, username, STATS_RANGE)
    }
}

#[async_trait]
impl StatsSource for WakatimeClient {
    async fn fetch(&self, username: &str) -> Result<StatsResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ChartError::Source("WakaTime API key is not configured".to_string())
        })?;

        let url = self.stats_url(username);
        tracing::debug!(%url, "fetching wakatime stats");

        let response = self
            .client
            .get(&url)
            .basic_auth(api_key, None::<&str>)
            .send()
            .await
            .map_err(|e| ChartError::Source(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChartError::Source(format!(
                "WakaTime answered HTTP {}",
                response.status()
            )));
        }

        response
            .json::<StatsResponse>()
            .await
            .map_err(|e| ChartError::Source(e.to_string()))
    }
}
