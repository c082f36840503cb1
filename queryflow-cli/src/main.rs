//! QueryFlow CLI: terminal storefront for pay-per-query AI market insights.
//!
//! Provides both an interactive TUI and a one-shot query mode.

mod oneshot;
mod tui;

use clap::Parser;
use queryflow_core::types::QueryKind;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// QueryFlow: pay-per-query AI market insights, settled in AVAX
#[derive(Parser, Debug)]
#[command(name = "queryflow", version, about, long_about = None)]
struct Cli {
    /// Query to run once without the TUI: "market" or "price"
    #[arg(value_parser = parse_kind)]
    query: Option<QueryKind>,

    /// Asset symbols to query (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    assets: Option<Vec<String>>,

    /// Timeframe for the query (e.g. 1h, 24h, 7d)
    #[arg(short, long)]
    timeframe: Option<String>,

    /// Workspace directory (where queryflow.toml is looked up)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Disable TUI, run a single query instead
    #[arg(long)]
    no_tui: bool,

    /// Print the raw result envelope as JSON (one-shot mode)
    #[arg(long)]
    json: bool,

    /// Color theme: dark or light
    #[arg(long)]
    theme: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create a default queryflow.toml in the workspace
    Init,
    /// Show the merged configuration
    Show,
}

fn parse_kind(raw: &str) -> Result<QueryKind, String> {
    match raw {
        "market" => Ok(QueryKind::Market),
        "price" => Ok(QueryKind::Price),
        other => Err(format!(
            "unknown query type '{}': expected 'market' or 'price'",
            other
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env.local first (where the demo keeps the payment key), then .env
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Human-readable layer for stderr (always active)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer for structured logging
    let log_dir = directories::ProjectDirs::from("dev", "queryflow", "queryflow")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "queryflow.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    // Resolve workspace
    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    tracing::debug!(workspace = %workspace.display(), "workspace resolved");

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &workspace);
    }

    // Load configuration
    let mut config = queryflow_core::config::load_config(Some(&workspace), None)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Apply CLI overrides
    if let Some(assets) = cli.assets {
        config.query.assets = assets;
    }
    if let Some(timeframe) = cli.timeframe {
        config.query.timeframe = timeframe;
    }
    if let Some(theme) = cli.theme {
        config.ui.theme = theme;
    }

    // One-shot query or interactive TUI
    if let Some(kind) = cli.query {
        oneshot::run(config, kind, cli.json).await
    } else if cli.no_tui {
        oneshot::run(config, QueryKind::Market, cli.json).await
    } else {
        tui::run(config).await
    }
}

fn handle_command(command: Commands, workspace: &std::path::Path) -> anyhow::Result<()> {
    match command {
        Commands::Config { action } => match action {
            ConfigAction::Init => {
                let (config_path, created) = queryflow_core::config::init_config(workspace)?;
                if created {
                    println!(
                        "Created default configuration at: {}",
                        config_path.display()
                    );
                } else {
                    println!(
                        "Configuration file already exists at: {}",
                        config_path.display()
                    );
                }
                Ok(())
            }
            ConfigAction::Show => {
                let config = queryflow_core::config::load_config(Some(workspace), None)
                    .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
                let toml_str = toml::to_string_pretty(&config)?;
                println!("{}", toml_str);
                Ok(())
            }
        },
    }
}
