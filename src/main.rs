//! Binary entry point: resolve paths, start logging, open the store and drive
//! the Ratatui event loop until the user exits.
use std::sync::Arc;

use anyhow::Context;
use playlist_inventory::{logging, run_app, App, Config, LocalPlaylistRepository, RecordStore};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to resolve data directory")?;
    config
        .ensure_dirs()
        .context("failed to create data directory")?;
    logging::init(&config.log_path)?;

    let store = RecordStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    info!(db = %config.db_path.display(), "starting playlist inventory");

    let repository = Arc::new(LocalPlaylistRepository::new(Arc::new(store)));
    let mut app = App::new(repository)?;
    run_app(&mut app)
}
