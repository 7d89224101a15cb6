//! Core library surface for the playlist inventory manager.
//!
//! The layers stack bottom-up: `db` wraps the SQL statements, `store` adds
//! live queries on top, `repository` hides the concrete store behind a trait,
//! `state` turns repository streams into screen state, and `ui` draws it.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod state;
pub mod store;
pub mod ui;

pub use config::Config;
pub use error::{Result, StoreError};

/// The domain types that other layers manipulate.
pub use models::{Playlist, PlaylistDetails, WriteOutcome};

pub use repository::{LocalPlaylistRepository, PlaylistRepository};
pub use store::{LiveQuery, RecordStore};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
