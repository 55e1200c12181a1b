use anyhow::Result;
use colored::Colorize;

use crate::config::{config_path, load_config, save_config};

/// Show the configuration, or set the WakaTime credentials
pub async fn run(path_only: bool, api_key: Option<String>, username: Option<String>) -> Result<()> {
    let path = config_path()?;

    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = load_config()?;

    if api_key.is_some() || username.is_some() {
        if let Some(key) = api_key {
            config.wakatime.api_key = Some(key);
        }
        if let Some(user) = username {
            config.wakatime.username = user;
        }
        save_config(&config)?;
        println!("[wakachart] Configuration saved to {}", path.display());
        return Ok(());
    }

    println!("\n  {} {}", "Config file:".bold(), path.display());
    println!("  {} {}", "WakaTime user:".bold(), config.wakatime.username);
    println!(
        "  {} {}",
        "API key:".bold(),
        if config.api_key().is_some() {
            "set".green()
        } else {
            "missing".red()
        }
    );
    println!(
        "  {} {}",
        "Charts:".bold(),
        config.storage.charts_dir().display()
    );
    println!(
        "  {} {}:{}\n",
        "Server:".bold(),
        config.server.host,
        config.server.port
    );
    Ok(())
}
