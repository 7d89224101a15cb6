use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{PlaylistDetails, WriteOutcome};
use crate::repository::PlaylistRepository;

use super::entry::EntryUiState;

/// Draft for changing an existing playlist. The record is read once when the
/// holder is created; later store changes do not overwrite what the user is
/// typing.
pub struct EditState {
    playlist_id: i64,
    repository: Arc<dyn PlaylistRepository>,
    ui_state: EntryUiState,
}

impl EditState {
    pub fn new(repository: Arc<dyn PlaylistRepository>, playlist_id: i64) -> Result<Self> {
        let current = repository
            .playlist_stream(playlist_id)?
            .latest()
            .flatten()
            .ok_or(StoreError::NotFound(playlist_id))?;

        Ok(Self {
            playlist_id,
            repository,
            ui_state: EntryUiState {
                details: PlaylistDetails::from(&current),
                is_entry_valid: true,
            },
        })
    }

    pub fn ui_state(&self) -> &EntryUiState {
        &self.ui_state
    }

    pub fn playlist_id(&self) -> i64 {
        self.playlist_id
    }

    /// Replace the draft and revalidate it. The id always stays the one being
    /// edited.
    pub fn update_ui_state(&mut self, details: PlaylistDetails) {
        self.ui_state = EntryUiState::validated(PlaylistDetails {
            id: self.playlist_id,
            ..details
        });
    }

    /// Write the draft back if it is valid; otherwise skip.
    pub fn update_playlist(&self) -> Result<WriteOutcome> {
        let details = &self.ui_state.details;
        if !details.is_valid() {
            debug!(id = self.playlist_id, "edit draft incomplete, not saving");
            return Ok(WriteOutcome::Skipped);
        }
        self.repository.update_playlist(&details.to_playlist())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{local_repository, playlist, RecordingRepository};

    #[test]
    fn loads_current_values() {
        let (store, repository) = local_repository();
        store.insert(&playlist(4, "Latina", 85)).unwrap();

        let edit = EditState::new(repository, 4).unwrap();
        assert!(edit.ui_state().is_entry_valid);
        assert_eq!(edit.ui_state().details.name, "Latina");
        assert_eq!(edit.ui_state().details.quantity, "85");
    }

    #[test]
    fn missing_playlist_is_not_found() {
        let (_store, repository) = local_repository();
        assert!(matches!(
            EditState::new(repository, 12),
            Err(StoreError::NotFound(12))
        ));
    }

    #[test]
    fn saves_changes_under_the_same_id() {
        let (store, repository) = local_repository();
        store.insert(&playlist(4, "Latina", 85)).unwrap();
        let mut edit = EditState::new(repository, 4).unwrap();

        let mut details = edit.ui_state().details.clone();
        details.id = 0;
        details.genre = "Salsa".into();
        details.quantity = "80".into();
        edit.update_ui_state(details);

        assert_eq!(edit.update_playlist().unwrap(), WriteOutcome::Applied);
        let saved = store.playlist(4).unwrap().latest().flatten().unwrap();
        assert_eq!(saved.genre, "Salsa");
        assert_eq!(saved.quantity, 80);
    }

    #[test]
    fn blank_genre_is_skipped() {
        let (store, repository) = local_repository();
        store.insert(&playlist(4, "Latina", 85)).unwrap();
        let mut edit = EditState::new(repository, 4).unwrap();

        let mut details = edit.ui_state().details.clone();
        details.genre.clear();
        edit.update_ui_state(details);

        assert!(!edit.ui_state().is_entry_valid);
        assert_eq!(edit.update_playlist().unwrap(), WriteOutcome::Skipped);
        let saved = store.playlist(4).unwrap().latest().flatten().unwrap();
        assert_eq!(saved.genre, "Rock");
    }

    #[test]
    fn storage_fault_reaches_the_caller() {
        let repository = RecordingRepository::failing(playlist(4, "Latina", 85));
        let edit = EditState::new(repository.clone(), 4).unwrap();

        assert!(matches!(
            edit.update_playlist(),
            Err(StoreError::Storage { .. })
        ));
        assert!(repository.writes().is_empty());
    }
}
