//! View-state holders: non-visual objects that turn repository streams into
//! screen state and screen commands into repository writes.

mod details;
mod edit;
mod entry;
mod home;

pub use details::{DetailsState, DetailsUiState};
pub use edit::EditState;
pub use entry::{EntryState, EntryUiState};
pub use home::{HomeState, HomeUiState};
