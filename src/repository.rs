//! Indirection between the view-state holders and the concrete store, so the
//! holders can run against a double in tests.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Playlist, WriteOutcome};
use crate::store::{LiveQuery, RecordStore};

/// Everything the view-state holders need from persistence.
pub trait PlaylistRepository: Send + Sync {
    /// Every playlist, ordered by name, re-emitted after each write.
    fn all_playlists_stream(&self) -> Result<LiveQuery<Vec<Playlist>>>;

    /// A single playlist by id; `None` while it does not exist.
    fn playlist_stream(&self, id: i64) -> Result<LiveQuery<Option<Playlist>>>;

    fn insert_playlist(&self, playlist: &Playlist) -> Result<Playlist>;

    fn update_playlist(&self, playlist: &Playlist) -> Result<WriteOutcome>;

    fn delete_playlist(&self, playlist: &Playlist) -> Result<WriteOutcome>;
}

/// Repository backed by the on-device SQLite store. Every call is forwarded
/// unchanged.
#[derive(Clone)]
pub struct LocalPlaylistRepository {
    store: Arc<RecordStore>,
}

impl LocalPlaylistRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl PlaylistRepository for LocalPlaylistRepository {
    fn all_playlists_stream(&self) -> Result<LiveQuery<Vec<Playlist>>> {
        self.store.all_playlists()
    }

    fn playlist_stream(&self, id: i64) -> Result<LiveQuery<Option<Playlist>>> {
        self.store.playlist(id)
    }

    fn insert_playlist(&self, playlist: &Playlist) -> Result<Playlist> {
        self.store.insert(playlist)
    }

    fn update_playlist(&self, playlist: &Playlist) -> Result<WriteOutcome> {
        self.store.update(playlist)
    }

    fn delete_playlist(&self, playlist: &Playlist) -> Result<WriteOutcome> {
        self.store.delete(playlist)
    }
}
