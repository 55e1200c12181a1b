use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::chart::palette::map_colors;
use crate::chart::{Category, ChartRequest, ChartService, ColorSource, Dataset, StatsSource};
use crate::config::{load_config, Config};
use crate::render::JsonChartRenderer;
use crate::sources::{FileStatsSource, GithubColors, StaticColors, WakatimeClient};

pub struct ChartArgs {
    pub request: Option<PathBuf>,
    pub category: Option<Category>,
    pub stats_file: Option<PathBuf>,
    pub hide: Vec<String>,
    pub no_remote_colors: bool,
    pub json: bool,
}

/// Build one chart and print what went into it
pub async fn run(args: ChartArgs) -> Result<()> {
    let config = load_config()?;
    let request = build_request(&args)?;
    let service = build_service(&config, &args)?;

    let dataset = service
        .prepare(&request)
        .await
        .with_context(|| format!("Failed to build {} chart", request.category))?;
    let chart = service.render(&dataset)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    print_dataset(&request, &dataset);
    println!(
        "\n  {} {}\n",
        "Chart saved:".bold(),
        chart.path.display().to_string().bright_green()
    );
    Ok(())
}

fn build_request(args: &ChartArgs) -> Result<ChartRequest> {
    let mut request = match &args.request {
        Some(path) => ChartRequest::from_file(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?,
        None => ChartRequest::new(args.category.unwrap_or(Category::Languages)),
    };

    if let Some(category) = args.category {
        request.category = category;
    }

    if !args.hide.is_empty() {
        request
            .hide
            .get_or_insert_with(BTreeSet::new)
            .extend(args.hide.iter().cloned());
    }

    Ok(request)
}

fn build_service(config: &Config, args: &ChartArgs) -> Result<ChartService> {
    let stats: Arc<dyn StatsSource> = match &args.stats_file {
        Some(path) => Arc::new(FileStatsSource::new(path)),
        None => Arc::new(WakatimeClient::new(
            config.wakatime.base_url.clone(),
            config.api_key(),
        )?),
    };

    let colors: Arc<dyn ColorSource> = if args.no_remote_colors {
        Arc::new(StaticColors::default())
    } else {
        Arc::new(GithubColors::new(
            config.github.colors_url.clone(),
            config.github.extra_colors.clone(),
        )?)
    };

    let renderer = Arc::new(JsonChartRenderer::new(config.storage.charts_dir()));

    Ok(ChartService::new(stats, colors, renderer)
        .with_default_username(config.wakatime.username.clone())
        .with_default_size(config.chart.size()))
}

fn print_dataset(request: &ChartRequest, dataset: &Dataset) {
    println!(
        "\n{}",
        format!("  WakaTime {} (last 7 days)", request.category)
            .bold()
            .bright_yellow()
    );
    println!("{}", "  ─────────────────────────────".dimmed());

    if dataset.items.is_empty() {
        println!("\n  {}", "Everything was hidden.".dimmed());
        return;
    }

    let colors = map_colors(&dataset.colors, &dataset.items);
    let max_seconds = dataset
        .items
        .iter()
        .map(|i| i.total_seconds)
        .fold(0.0f64, f64::max);

    for (item, color) in dataset.items.iter().zip(colors) {
        let bar_len = if max_seconds > 0.0 {
            ((item.total_seconds / max_seconds) * 30.0).round() as usize
        } else {
            0
        };
        let bar: String = "\u{2588}".repeat(bar_len);
        println!(
            "  {} {} {} {}",
            format!("{:>20}", item.name).cyan(),
            format!("{:>3}h {:>2}m", item.hours, item.minutes).dimmed(),
            bar.bright_yellow(),
            color.dimmed()
        );
    }
}
