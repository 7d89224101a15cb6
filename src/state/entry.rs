use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::{PlaylistDetails, WriteOutcome};
use crate::repository::PlaylistRepository;

/// Draft being typed into the entry or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUiState {
    pub details: PlaylistDetails,
    pub is_entry_valid: bool,
}

impl EntryUiState {
    pub(crate) fn validated(details: PlaylistDetails) -> Self {
        let is_entry_valid = details.is_valid();
        Self {
            details,
            is_entry_valid,
        }
    }
}

/// Holds a new playlist until the user commits it. Nothing is persisted
/// before `save_playlist`.
pub struct EntryState {
    repository: Arc<dyn PlaylistRepository>,
    ui_state: EntryUiState,
}

impl EntryState {
    pub fn new(repository: Arc<dyn PlaylistRepository>) -> Self {
        Self {
            repository,
            ui_state: EntryUiState::default(),
        }
    }

    pub fn ui_state(&self) -> &EntryUiState {
        &self.ui_state
    }

    /// Replace the whole draft and revalidate it.
    pub fn update_ui_state(&mut self, details: PlaylistDetails) {
        self.ui_state = EntryUiState::validated(details);
    }

    /// Insert the draft if it is valid right now. An invalid draft is skipped
    /// without touching the store.
    pub fn save_playlist(&self) -> Result<WriteOutcome> {
        let details = &self.ui_state.details;
        if !details.is_valid() {
            debug!("entry draft incomplete, not saving");
            return Ok(WriteOutcome::Skipped);
        }
        let inserted = self.repository.insert_playlist(&details.to_playlist())?;
        debug!(id = inserted.id, "saved new playlist");
        Ok(WriteOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::state::test_support::{local_repository, playlist, RecordingRepository, Write};

    fn draft(name: &str, description: &str, genre: &str, quantity: &str) -> PlaylistDetails {
        PlaylistDetails {
            id: 0,
            name: name.into(),
            description: description.into(),
            genre: genre.into(),
            quantity: quantity.into(),
        }
    }

    #[test]
    fn blank_name_invalidates_draft() {
        let mut entry = EntryState::new(RecordingRepository::empty());
        entry.update_ui_state(draft("", "x", "y", "1"));
        assert!(!entry.ui_state().is_entry_valid);
    }

    #[test]
    fn invalid_draft_is_not_saved() {
        let repository = RecordingRepository::empty();
        let mut entry = EntryState::new(repository.clone());
        entry.update_ui_state(draft("Rock", " ", "Rock", "3"));

        assert_eq!(entry.save_playlist().unwrap(), WriteOutcome::Skipped);
        assert!(repository.writes().is_empty());
    }

    #[test]
    fn valid_draft_is_inserted_once() {
        let repository = RecordingRepository::empty();
        let mut entry = EntryState::new(repository.clone());
        entry.update_ui_state(draft("Rock", "Classics", "Rock", "12"));

        assert_eq!(entry.save_playlist().unwrap(), WriteOutcome::Applied);
        let writes = repository.writes();
        assert_eq!(writes.len(), 1);
        assert!(matches!(&writes[0], Write::Insert(p) if p.quantity == 12 && p.id == 0));
    }

    #[test]
    fn unparsable_quantity_saves_as_zero() {
        let (store, repository) = local_repository();
        let mut entry = EntryState::new(repository);
        entry.update_ui_state(draft("a", "b", "c", "notanumber"));
        assert!(entry.ui_state().is_entry_valid);

        assert_eq!(entry.save_playlist().unwrap(), WriteOutcome::Applied);
        let all = store.all_playlists().unwrap().latest().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "a");
        assert_eq!(all[0].quantity, 0);
        assert!(all[0].id > 0);
    }

    #[test]
    fn fresh_entry_is_invalid() {
        let entry = EntryState::new(RecordingRepository::empty());
        assert!(!entry.ui_state().is_entry_valid);
        assert_eq!(entry.save_playlist().unwrap(), WriteOutcome::Skipped);
    }

    #[test]
    fn storage_fault_reaches_the_caller() {
        let repository = RecordingRepository::failing(playlist(1, "Rock", 2));
        let mut entry = EntryState::new(repository.clone());
        entry.update_ui_state(draft("Rock", "Classics", "Rock", "12"));

        assert!(matches!(
            entry.save_playlist(),
            Err(StoreError::Storage { .. })
        ));
        assert!(repository.writes().is_empty());
    }
}
