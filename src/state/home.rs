use std::sync::Arc;

use crate::error::Result;
use crate::models::Playlist;
use crate::repository::PlaylistRepository;
use crate::store::LiveQuery;

/// What the home list renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeUiState {
    pub playlists: Vec<Playlist>,
}

/// Mirrors the repository's "all playlists" stream for the home screen. The
/// subscription lives exactly as long as the holder.
pub struct HomeState {
    query: LiveQuery<Vec<Playlist>>,
    ui_state: HomeUiState,
}

impl HomeState {
    pub fn new(repository: &Arc<dyn PlaylistRepository>) -> Result<Self> {
        Ok(Self {
            query: repository.all_playlists_stream()?,
            ui_state: HomeUiState::default(),
        })
    }

    /// Pull the newest emission, if one arrived. Returns whether the state
    /// changed.
    pub fn refresh(&mut self) -> bool {
        match self.query.latest() {
            Some(playlists) if playlists != self.ui_state.playlists => {
                self.ui_state = HomeUiState { playlists };
                true
            }
            _ => false,
        }
    }

    pub fn ui_state(&self) -> &HomeUiState {
        &self.ui_state
    }
}
