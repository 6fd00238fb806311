use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::modes::HumanMode;
use grid_snake::session::GameSession;
use grid_snake::settings::{Overrides, Settings, SettingsFile};
use grid_snake::storage::FileHighScoreStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_snake=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let file = cli.config.as_deref().map(SettingsFile::load).transpose()?;
    let settings = Settings::resolve(file, cli.overrides)?;
    tracing::info!(?settings, "Settings resolved");

    let store = FileHighScoreStore::new(&settings.high_score_file);
    let session = GameSession::new(settings.game, settings.seed, store)?;

    let mut human_mode = HumanMode::new(session);
    human_mode.run().await?;

    Ok(())
}
