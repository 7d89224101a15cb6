//! Persistence module split across logical submodules. Every function wraps
//! one statement so the store above can stay focused on notification.

mod connection;
mod playlists;

pub use connection::{ensure_schema, open_database, open_in_memory};
pub use playlists::{
    delete_playlist, fetch_playlist, fetch_playlists, insert_playlist, update_playlist,
};
