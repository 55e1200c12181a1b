use anyhow::Result;
use std::sync::Arc;

use crate::chart::ChartService;
use crate::config::load_config;
use crate::render::JsonChartRenderer;
use crate::server::{self, AppState};
use crate::sources::{GithubColors, WakatimeClient};

/// Start the HTTP API
pub async fn run(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;

    if config.api_key().is_none() {
        tracing::warn!("no WakaTime API key configured, chart requests will fail");
    }

    let stats = Arc::new(WakatimeClient::new(
        config.wakatime.base_url.clone(),
        config.api_key(),
    )?);
    let colors = Arc::new(GithubColors::new(
        config.github.colors_url.clone(),
        config.github.extra_colors.clone(),
    )?);
    let artifacts = Arc::new(JsonChartRenderer::new(config.storage.charts_dir()));

    let service = ChartService::new(stats, colors, artifacts.clone())
        .with_default_username(config.wakatime.username.clone())
        .with_default_size(config.chart.size());

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    println!("[wakachart] Charts stored in {}", artifacts.dir().display());
    server::serve(AppState { service, artifacts }, &host, port).await
}
