//! Domain models that mirror the SQLite schema and get passed between the
//! store, the view-state holders and the TUI. The types stay light-weight data
//! holders so the other layers can focus on persistence and presentation.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// One row of the `playlists` table. The app treats it as an inventory entry:
/// `quantity` counts the units in stock.
pub struct Playlist {
    /// Primary key. `0` means "not assigned yet"; the store hands out the next
    /// identity when such a record is inserted.
    pub id: i64,
    /// Display name, also the sort key of the home list.
    pub name: String,
    pub description: String,
    pub genre: String,
    /// Units in stock. Unsigned so a negative count cannot be represented.
    pub quantity: u32,
}

impl Playlist {
    /// Whether the record has been assigned an identity by the store.
    pub fn has_identity(&self) -> bool {
        self.id != 0
    }

    /// Copy of the record with one unit less in stock, or `None` when the
    /// shelf is already empty.
    pub fn with_one_less(&self) -> Option<Playlist> {
        self.quantity.checked_sub(1).map(|quantity| Playlist {
            quantity,
            ..self.clone()
        })
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Editable, all-text projection of a [`Playlist`]. Forms write keystrokes into
/// it directly, so the quantity stays a raw string until the draft is turned
/// back into a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub genre: String,
    pub quantity: String,
}

impl PlaylistDetails {
    /// Name, description and genre must all contain something other than
    /// whitespace. The quantity is deliberately left out of the check.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.genre.trim().is_empty()
    }

    /// Convert the draft into a record. Quantity text that is not a
    /// non-negative integer becomes `0`.
    pub fn to_playlist(&self) -> Playlist {
        Playlist {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            genre: self.genre.clone(),
            quantity: parse_quantity(&self.quantity),
        }
    }
}

impl From<&Playlist> for PlaylistDetails {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id,
            name: playlist.name.clone(),
            description: playlist.description.clone(),
            genre: playlist.genre.clone(),
            quantity: playlist.quantity.to_string(),
        }
    }
}

/// Lenient quantity parsing used when committing drafts.
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

/// Result of a write that may legitimately do nothing: an update or delete
/// aimed at a missing id, an invalid draft, or a decrement at zero stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    Skipped,
}

impl WriteOutcome {
    pub fn from_rows(rows: usize) -> Self {
        if rows == 0 {
            WriteOutcome::Skipped
        } else {
            WriteOutcome::Applied
        }
    }

    pub fn is_applied(self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, description: &str, genre: &str, quantity: &str) -> PlaylistDetails {
        PlaylistDetails {
            id: 0,
            name: name.to_string(),
            description: description.to_string(),
            genre: genre.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn blank_name_is_invalid() {
        assert!(!draft("", "x", "y", "1").is_valid());
        assert!(!draft("   ", "x", "y", "1").is_valid());
    }

    #[test]
    fn quantity_is_not_part_of_validity() {
        let details = draft("a", "b", "c", "notanumber");
        assert!(details.is_valid());
        assert_eq!(details.to_playlist().quantity, 0);
    }

    #[test]
    fn negative_quantity_coerces_to_zero() {
        assert_eq!(parse_quantity("-5"), 0);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity(""), 0);
    }

    #[test]
    fn details_projection_keeps_identity() {
        let playlist = Playlist {
            id: 7,
            name: "Rock".into(),
            description: "Classics".into(),
            genre: "Rock".into(),
            quantity: 85,
        };
        let details = PlaylistDetails::from(&playlist);
        assert_eq!(details.quantity, "85");
        assert_eq!(details.to_playlist(), playlist);
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut playlist = Playlist {
            quantity: 1,
            ..Playlist::default()
        };
        playlist = playlist.with_one_less().unwrap();
        assert_eq!(playlist.quantity, 0);
        assert!(playlist.with_one_less().is_none());
    }
}
