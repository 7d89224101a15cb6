//! Ratatui front end: a home list, a details view and the add/edit forms. The
//! screens read everything through the view-state holders in `crate::state`.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
