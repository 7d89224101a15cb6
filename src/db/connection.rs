use std::path::Path;

use rusqlite::Connection;

use crate::error::{Result, StorageContext};

/// Open (or create) the database file and make sure the schema exists.
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).storage("failed to open SQLite database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Private, throwaway database. Contents vanish when the connection closes.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().storage("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the single `playlists` table if it is missing. There is exactly one
/// schema version, so no migration bookkeeping is kept.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS playlists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            genre TEXT NOT NULL,
            quantity INTEGER NOT NULL
        )",
        [],
    )
    .storage("failed to create playlists table")?;

    Ok(())
}
