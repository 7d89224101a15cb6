use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Result, StorageContext};
use crate::models::Playlist;

fn playlist_from_row(row: &Row<'_>) -> rusqlite::Result<Playlist> {
    Ok(Playlist {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        genre: row.get(3)?,
        quantity: row.get(4)?,
    })
}

/// Retrieve every playlist sorted by name. The query is the single source of
/// truth for how the home list is ordered; the id keeps equal names stable.
pub fn fetch_playlists(conn: &Connection) -> Result<Vec<Playlist>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, name, description, genre, quantity
             FROM playlists
             ORDER BY name ASC, id ASC",
        )
        .storage("failed to prepare playlist query")?;

    let playlists = stmt
        .query_map([], playlist_from_row)
        .storage("failed to load playlists")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .storage("failed to collect playlists")?;

    Ok(playlists)
}

/// Look up a single playlist by id.
pub fn fetch_playlist(conn: &Connection, id: i64) -> Result<Option<Playlist>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, name, description, genre, quantity
             FROM playlists
             WHERE id = ?1",
        )
        .storage("failed to prepare playlist lookup")?;

    stmt.query_row([id], playlist_from_row)
        .optional()
        .storage("failed to load playlist")
}

/// Insert a playlist row, returning the hydrated struct. An id of `0` is bound
/// as NULL so SQLite assigns the next identity; any other id is kept and a
/// clash with an existing row is a constraint violation.
pub fn insert_playlist(conn: &Connection, playlist: &Playlist) -> Result<Playlist> {
    let explicit_id = playlist.has_identity().then_some(playlist.id);
    conn.execute(
        "INSERT INTO playlists (id, name, description, genre, quantity)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            explicit_id,
            playlist.name,
            playlist.description,
            playlist.genre,
            playlist.quantity
        ],
    )
    .storage("failed to insert playlist")?;

    Ok(Playlist {
        id: conn.last_insert_rowid(),
        ..playlist.clone()
    })
}

/// Overwrite every column of the row with the same id. Returns the number of
/// rows touched so callers can tell a missing id apart from a real update.
pub fn update_playlist(conn: &Connection, playlist: &Playlist) -> Result<usize> {
    conn.execute(
        "UPDATE playlists
         SET name = ?1, description = ?2, genre = ?3, quantity = ?4
         WHERE id = ?5",
        params![
            playlist.name,
            playlist.description,
            playlist.genre,
            playlist.quantity,
            playlist.id
        ],
    )
    .storage("failed to update playlist")
}

/// Remove the row with the given id, returning the number of rows deleted.
pub fn delete_playlist(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM playlists WHERE id = ?1", params![id])
        .storage("failed to delete playlist")
}
