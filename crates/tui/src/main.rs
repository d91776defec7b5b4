mod app;
mod theme;

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use gamehub_core::{
    catalog::{BuiltinSource, CatalogStore, GameSource, JsonFileSource},
    config::{self, AppConfig},
    storage::{FileStore, KeyValueStore, MemoryStore},
};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "gamehub", about = "Browse the game catalog from the terminal")]
struct Args {
    /// Config file to read instead of the default location
    #[arg(long, env = "GAMEHUB_CONFIG")]
    config: Option<PathBuf>,

    /// JSON catalog file, overriding the configured one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Run without the recently played list
    #[arg(long)]
    no_history: bool,

    /// Open the detail page of this game on startup
    #[arg(long)]
    game: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let mut app_config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => {
            config::ensure_default_config()?;
            AppConfig::load()?
        }
    };
    if let Some(path) = args.catalog {
        app_config.catalog_path = Some(path);
    }
    if args.no_history {
        app_config.persist_recent = false;
    }

    let source: Box<dyn GameSource> = match &app_config.catalog_path {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(BuiltinSource),
    };
    let mut store = CatalogStore::load(source.as_ref())?;
    if app_config.persist_recent {
        store = store.with_storage(recent_storage(&app_config.data_dir));
    } else {
        warn!("Recently played list disabled");
    }
    info!(
        source = %source.describe(),
        history = store.has_storage(),
        "Starting gamehub"
    );

    let theme = Theme::from_config(&app_config.theme);
    let mut app = app::GameHubApp::new(store, theme, source.describe());
    if let Some(id) = args.game {
        app.open_on_start(&id);
    }
    app.run().await
}

/// File-backed storage in `data_dir`, or an in-memory store when the directory is unusable.
fn recent_storage(data_dir: &Path) -> Arc<dyn KeyValueStore> {
    let file_store = FileStore::in_dir(data_dir);
    match file_store.ensure_writable() {
        Ok(()) => Arc::new(file_store),
        Err(err) => {
            warn!(
                data_dir = %data_dir.display(),
                "Recently played kept in memory only: {err:#}"
            );
            Arc::new(MemoryStore::new())
        }
    }
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("gamehub.log");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the terminal UI, so only the file gets log lines
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
