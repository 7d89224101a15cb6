use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::{Playlist, PlaylistDetails, WriteOutcome};
use crate::repository::PlaylistRepository;
use crate::store::LiveQuery;

/// What the details screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsUiState {
    pub out_of_stock: bool,
    pub details: PlaylistDetails,
}

impl Default for DetailsUiState {
    fn default() -> Self {
        Self {
            out_of_stock: true,
            details: PlaylistDetails::default(),
        }
    }
}

impl From<&Playlist> for DetailsUiState {
    fn from(playlist: &Playlist) -> Self {
        Self {
            out_of_stock: playlist.quantity == 0,
            details: PlaylistDetails::from(playlist),
        }
    }
}

/// Follows one playlist and handles the sell/delete commands of the details
/// screen. The id comes from navigation and never changes.
pub struct DetailsState {
    playlist_id: i64,
    repository: Arc<dyn PlaylistRepository>,
    query: LiveQuery<Option<Playlist>>,
    ui_state: DetailsUiState,
    loaded: bool,
}

impl DetailsState {
    pub fn new(repository: Arc<dyn PlaylistRepository>, playlist_id: i64) -> Result<Self> {
        let query = repository.playlist_stream(playlist_id)?;
        Ok(Self {
            playlist_id,
            repository,
            query,
            ui_state: DetailsUiState::default(),
            loaded: false,
        })
    }

    /// Apply the newest emission. A missing playlist leaves the last known
    /// state on screen.
    pub fn refresh(&mut self) -> bool {
        match self.query.latest() {
            Some(Some(playlist)) => {
                let next = DetailsUiState::from(&playlist);
                let changed = !self.loaded || next != self.ui_state;
                self.ui_state = next;
                self.loaded = true;
                changed
            }
            _ => false,
        }
    }

    pub fn ui_state(&self) -> &DetailsUiState {
        &self.ui_state
    }

    pub fn playlist_id(&self) -> i64 {
        self.playlist_id
    }

    /// Whether a real record has been observed yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Sell one unit. Nothing is written when the shelf is empty; the new
    /// quantity shows up with the next emission.
    pub fn decrement_quantity_by_one(&self) -> Result<WriteOutcome> {
        let current = self.ui_state.details.to_playlist();
        match current.with_one_less() {
            Some(sold) => self.repository.update_playlist(&sold),
            None => {
                debug!(id = self.playlist_id, "nothing left to sell");
                Ok(WriteOutcome::Skipped)
            }
        }
    }

    /// Delete the playlist on screen. Until a record has actually arrived the
    /// state only holds placeholder values, so the call is skipped.
    pub fn delete_current(&self) -> Result<WriteOutcome> {
        if !self.loaded {
            debug!(id = self.playlist_id, "delete requested before playlist loaded");
            return Ok(WriteOutcome::Skipped);
        }
        self.repository
            .delete_playlist(&self.ui_state.details.to_playlist())
    }
}
