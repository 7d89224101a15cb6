//! Observable record store: CRUD over the `playlists` table plus live queries
//! that re-emit after every committed write.
//!
//! All statements run under one connection lock. Notifications are published
//! before that lock is released, so observers see snapshots in commit order and
//! a new subscriber can never miss a write between its first snapshot and its
//! registration.

mod subscriptions;

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::db;
use crate::error::Result;
use crate::models::{Playlist, WriteOutcome};

pub use subscriptions::{LiveQuery, SubscriptionId};
use subscriptions::Subscribers;

pub struct RecordStore {
    conn: Mutex<Connection>,
    subscribers: Arc<Subscribers>,
}

impl RecordStore {
    /// Open the database file at `path`, creating it and the schema if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open_database(path)?;
        debug!(path = %path.display(), "opened playlist store");
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(db::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            subscribers: Subscribers::new(),
        }
    }

    /// Add a new row. A zero id lets the engine pick the next identity.
    pub fn insert(&self, playlist: &Playlist) -> Result<Playlist> {
        let conn = self.conn.lock();
        let inserted = db::insert_playlist(&conn, playlist).inspect_err(|err| {
            warn!(error = %err, name = %playlist.name, "insert rejected");
        })?;
        debug!(id = inserted.id, name = %inserted.name, "inserted playlist");
        self.publish(&conn, inserted.id);
        Ok(inserted)
    }

    /// Replace the row with the same id. A missing id is skipped, not an error.
    pub fn update(&self, playlist: &Playlist) -> Result<WriteOutcome> {
        let conn = self.conn.lock();
        let rows = db::update_playlist(&conn, playlist).inspect_err(|err| {
            warn!(error = %err, id = playlist.id, "update rejected");
        })?;
        let outcome = WriteOutcome::from_rows(rows);
        debug!(id = playlist.id, ?outcome, "update playlist");
        if outcome.is_applied() {
            self.publish(&conn, playlist.id);
        }
        Ok(outcome)
    }

    /// Remove the row with the same id. A missing id is skipped, not an error.
    pub fn delete(&self, playlist: &Playlist) -> Result<WriteOutcome> {
        let conn = self.conn.lock();
        let rows = db::delete_playlist(&conn, playlist.id).inspect_err(|err| {
            warn!(error = %err, id = playlist.id, "delete rejected");
        })?;
        let outcome = WriteOutcome::from_rows(rows);
        debug!(id = playlist.id, ?outcome, "delete playlist");
        if outcome.is_applied() {
            self.publish(&conn, playlist.id);
        }
        Ok(outcome)
    }

    /// Live, name-ordered view of every playlist. The current snapshot is
    /// available immediately; a new one follows every applied write.
    pub fn all_playlists(&self) -> Result<LiveQuery<Vec<Playlist>>> {
        let conn = self.conn.lock();
        let snapshot = db::fetch_playlists(&conn)?;
        let query = self.subscribers.subscribe_all(snapshot);
        debug!(subscription = ?query.subscription_id(), "subscribed to all playlists");
        Ok(query)
    }

    /// Live view of one playlist; `None` while no row has that id.
    pub fn playlist(&self, id: i64) -> Result<LiveQuery<Option<Playlist>>> {
        let conn = self.conn.lock();
        let current = db::fetch_playlist(&conn, id)?;
        let query = self.subscribers.subscribe_one(id, current);
        debug!(id, subscription = ?query.subscription_id(), "subscribed to playlist");
        Ok(query)
    }

    /// Number of live queries that have not been dropped yet.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.count()
    }

    /// Re-run the queries observers care about after a write touching `id`.
    /// Shapes nobody watches are not queried at all. The write has already
    /// committed, so a failed read only costs observers this emission.
    fn publish(&self, conn: &Connection, id: i64) {
        if self.subscribers.has_list_observers() {
            match db::fetch_playlists(conn) {
                Ok(snapshot) => self.subscribers.publish_all(&snapshot),
                Err(err) => warn!(error = %err, id, "failed to refresh playlist list observers"),
            }
        }
        if self.subscribers.observes(id) {
            match db::fetch_playlist(conn, id) {
                Ok(current) => self.subscribers.publish_one(id, current.as_ref()),
                Err(err) => warn!(error = %err, id, "failed to refresh playlist observers"),
            }
        }
    }
}
