use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wakachart::chart::Category;
use wakachart::cli::commands;

#[derive(Parser)]
#[command(name = "wakachart", version, about = "Charts from WakaTime usage stats")]
struct Cli {
    /// Verbose logging
    #[arg(long, global = true, env = "WAKACHART_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a chart from the last 7 days of stats
    Chart {
        /// Request file (.json or .toml)
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Category to chart, overrides the request file
        #[arg(short, long, value_enum)]
        category: Option<Category>,

        /// Read stats from a saved WakaTime response instead of the API
        #[arg(long)]
        stats_file: Option<PathBuf>,

        /// Extra hide patterns (`Name`, `Prefix**`, `**Suffix`)
        #[arg(long)]
        hide: Vec<String>,

        /// Skip the GitHub language color registry
        #[arg(long)]
        no_remote_colors: bool,

        /// Print the dataset as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show or update configuration
    Config {
        /// Only print the config file path
        #[arg(long)]
        path: bool,

        /// Store the WakaTime API key
        #[arg(long)]
        api_key: Option<String>,

        /// Store the WakaTime username
        #[arg(long)]
        username: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    match cli.command {
        Commands::Chart {
            request,
            category,
            stats_file,
            hide,
            no_remote_colors,
            json,
        } => {
            commands::chart::run(commands::chart::ChartArgs {
                request,
                category,
                stats_file,
                hide,
                no_remote_colors,
                json,
            })
            .await
        }
        Commands::Serve { host, port } => commands::serve::run(host, port).await,
        Commands::Config {
            path,
            api_key,
            username,
        } => commands::config::run(path, api_key, username).await,
    }
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("wakachart=debug")
    } else {
        EnvFilter::new("wakachart=info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
