use std::mem;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::models::{Playlist, PlaylistDetails, WriteOutcome};
use crate::repository::PlaylistRepository;
use crate::state::{DetailsState, EditState, EntryState, EntryUiState, HomeState};

use super::forms::{ConfirmPlaylistDelete, PlaylistField, PlaylistForm};
use super::helpers::{
    centered_rect, cursor_column, stock_label, surface_error, visible_window,
};
use super::screens::ListCursor;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per playlist card on the home list.
const PLAYLIST_CARD_HEIGHT: u16 = 6;
/// Shown when a draft is submitted without the mandatory text fields.
const MISSING_FIELDS: &str = "Name, description and genre are required.";

/// High-level navigation states. Each screen owns the view-state holder that
/// feeds it, so leaving a screen drops its subscription.
enum Screen {
    Home,
    Details(DetailsState),
    Entry { state: EntryState, form: PlaylistForm },
    Edit { state: EditState, form: PlaylistForm },
}

/// Overlays scoped to the current screen.
enum Mode {
    Normal,
    ConfirmDelete(ConfirmPlaylistDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    repository: Arc<dyn PlaylistRepository>,
    home: HomeState,
    cursor: ListCursor,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(repository: Arc<dyn PlaylistRepository>) -> Result<Self> {
        let mut home = HomeState::new(&repository).context("failed to load playlists")?;
        home.refresh();
        Ok(Self {
            repository,
            home,
            cursor: ListCursor::default(),
            screen: Screen::Home,
            mode: Mode::Normal,
            status: None,
        })
    }

    /// Pull whatever the store pushed since the last tick.
    pub fn tick(&mut self) {
        if self.home.refresh() {
            self.cursor
                .ensure_in_bounds(self.home.ui_state().playlists.len());
        }
        if let Screen::Details(details) = &mut self.screen {
            details.refresh();
        }
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_screen_key(code, &mut exit),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };
        exit
    }

    fn handle_screen_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let screen = mem::replace(&mut self.screen, Screen::Home);
        let (screen, mode) = match screen {
            Screen::Home => (self.handle_home_key(code, exit), Mode::Normal),
            Screen::Details(details) => self.handle_details_key(code, details, exit),
            Screen::Entry { state, form } => (self.handle_entry_key(code, state, form), Mode::Normal),
            Screen::Edit { state, form } => (self.handle_edit_key(code, state, form), Mode::Normal),
        };
        self.screen = screen;
        mode
    }

    fn handle_home_key(&mut self, code: KeyCode, exit: &mut bool) -> Screen {
        let len = self.home.ui_state().playlists.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.cursor.move_selection(-1, len),
            KeyCode::Down => self.cursor.move_selection(1, len),
            KeyCode::PageUp => self.cursor.move_selection(-5, len),
            KeyCode::PageDown => self.cursor.move_selection(5, len),
            KeyCode::Home => self.cursor.select_first(),
            KeyCode::End => self.cursor.select_last(len),
            KeyCode::Enter => {
                if let Some(id) = self.current_playlist().map(|playlist| playlist.id) {
                    self.clear_status();
                    return self.open_details(id);
                }
                self.set_status("No playlist selected.", StatusKind::Error);
            }
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Screen::Entry {
                    state: EntryState::new(Arc::clone(&self.repository)),
                    form: PlaylistForm::default(),
                };
            }
            _ => {}
        }
        Screen::Home
    }

    fn handle_details_key(
        &mut self,
        code: KeyCode,
        details: DetailsState,
        exit: &mut bool,
    ) -> (Screen, Mode) {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
                self.clear_status();
                return (Screen::Home, Mode::Normal);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => self.sell_one(&details),
            KeyCode::Char('e') | KeyCode::Char('E') => {
                match EditState::new(Arc::clone(&self.repository), details.playlist_id()) {
                    Ok(state) => {
                        self.clear_status();
                        let screen = Screen::Edit {
                            state,
                            form: PlaylistForm::default(),
                        };
                        return (screen, Mode::Normal);
                    }
                    Err(err) => self.report_error(err.into()),
                }
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                if details.is_loaded() {
                    let confirm =
                        ConfirmPlaylistDelete::from(&details.ui_state().details.to_playlist());
                    return (Screen::Details(details), Mode::ConfirmDelete(confirm));
                }
                self.set_status("Playlist is still loading.", StatusKind::Error);
            }
            _ => {}
        }
        (Screen::Details(details), Mode::Normal)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmPlaylistDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let outcome = match &self.screen {
                    Screen::Details(details) => details.delete_current(),
                    _ => Ok(WriteOutcome::Skipped),
                };
                match outcome {
                    Ok(WriteOutcome::Applied) => {
                        info!(name = %confirm.name, "deleted playlist");
                        self.screen = Screen::Home;
                        self.set_status(format!("Deleted {}.", confirm.name), StatusKind::Info);
                        Mode::Normal
                    }
                    Ok(WriteOutcome::Skipped) => {
                        self.screen = Screen::Home;
                        self.set_status("Playlist no longer exists.", StatusKind::Error);
                        Mode::Normal
                    }
                    Err(err) => {
                        self.report_error(err.into());
                        Mode::ConfirmDelete(confirm)
                    }
                }
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_entry_key(
        &mut self,
        code: KeyCode,
        mut state: EntryState,
        mut form: PlaylistForm,
    ) -> Screen {
        match code {
            KeyCode::Esc => {
                self.set_status("Add playlist cancelled.", StatusKind::Info);
                return Screen::Home;
            }
            KeyCode::Enter => match state.save_playlist() {
                Ok(WriteOutcome::Applied) => {
                    let name = state.ui_state().details.name.clone();
                    info!(%name, "added playlist");
                    self.home.refresh();
                    self.focus_playlist(&name);
                    self.set_status(format!("Added {name}."), StatusKind::Info);
                    return Screen::Home;
                }
                Ok(WriteOutcome::Skipped) => {
                    form.error = Some(MISSING_FIELDS.to_string());
                    self.set_status(MISSING_FIELDS, StatusKind::Error);
                }
                Err(err) => {
                    let message = surface_error(&err.into());
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            _ => {
                if let Some(details) = edit_draft(code, &mut form, state.ui_state()) {
                    state.update_ui_state(details);
                }
            }
        }
        Screen::Entry { state, form }
    }

    fn handle_edit_key(
        &mut self,
        code: KeyCode,
        mut state: EditState,
        mut form: PlaylistForm,
    ) -> Screen {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return self.open_details(state.playlist_id());
            }
            KeyCode::Enter => match state.update_playlist() {
                Ok(WriteOutcome::Applied) => {
                    let name = state.ui_state().details.name.clone();
                    info!(id = state.playlist_id(), %name, "updated playlist");
                    self.set_status(format!("Saved {name}."), StatusKind::Info);
                    return self.open_details(state.playlist_id());
                }
                Ok(WriteOutcome::Skipped) if !state.ui_state().is_entry_valid => {
                    form.error = Some(MISSING_FIELDS.to_string());
                    self.set_status(MISSING_FIELDS, StatusKind::Error);
                }
                Ok(WriteOutcome::Skipped) => {
                    self.set_status("Playlist no longer exists.", StatusKind::Error);
                    return Screen::Home;
                }
                Err(err) => {
                    let message = surface_error(&err.into());
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            _ => {
                if let Some(details) = edit_draft(code, &mut form, state.ui_state()) {
                    state.update_ui_state(details);
                }
            }
        }
        Screen::Edit { state, form }
    }

    fn sell_one(&mut self, details: &DetailsState) {
        if !details.is_loaded() {
            self.set_status("Playlist is still loading.", StatusKind::Error);
            return;
        }
        let name = details.ui_state().details.name.clone();
        match details.decrement_quantity_by_one() {
            Ok(WriteOutcome::Applied) => {
                self.set_status(format!("Sold one copy of {name}."), StatusKind::Info)
            }
            Ok(WriteOutcome::Skipped) => {
                self.set_status(format!("{name} is out of stock."), StatusKind::Error)
            }
            Err(err) => self.report_error(err.into()),
        }
    }

    fn open_details(&mut self, id: i64) -> Screen {
        match DetailsState::new(Arc::clone(&self.repository), id) {
            Ok(mut details) => {
                details.refresh();
                Screen::Details(details)
            }
            Err(err) => {
                self.report_error(err.into());
                Screen::Home
            }
        }
    }

    fn current_playlist(&self) -> Option<&Playlist> {
        self.home.ui_state().playlists.get(self.cursor.selected)
    }

    fn focus_playlist(&mut self, name: &str) {
        let playlists = &self.home.ui_state().playlists;
        self.cursor
            .focus(playlists.iter().position(|playlist| playlist.name == name));
        self.cursor.ensure_in_bounds(playlists.len());
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn report_error(&mut self, err: anyhow::Error) {
        warn!(error = %format!("{err:#}"), "command failed");
        self.set_status(surface_error(&err), StatusKind::Error);
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Home => self.draw_home(frame, content_area),
            Screen::Details(details) => self.draw_details(frame, content_area, details),
            Screen::Entry { state, form } => {
                self.draw_home(frame, content_area);
                self.draw_form(frame, area, "Add Playlist", form, state.ui_state());
            }
            Screen::Edit { state, form } => {
                self.draw_home(frame, content_area);
                self.draw_form(frame, area, "Edit Playlist", form, state.ui_state());
            }
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::ConfirmDelete(confirm) = &self.mode {
            self.draw_confirm_delete(frame, area, confirm);
        }
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Playlists");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let playlists = &self.home.ui_state().playlists;
        if playlists.is_empty() {
            let message = Paragraph::new("No playlists yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(message, inner);
            return;
        }

        self.render_playlist_cards(frame, inner, playlists, self.cursor.selected);
    }

    fn render_playlist_cards(
        &self,
        frame: &mut Frame,
        area: Rect,
        playlists: &[Playlist],
        selected: usize,
    ) {
        if area.height == 0 {
            return;
        }

        let capacity = (area.height / PLAYLIST_CARD_HEIGHT).max(1) as usize;
        let (start, end) = visible_window(selected, playlists.len(), capacity);
        if end <= start {
            return;
        }

        let constraints: Vec<Constraint> = (start..end)
            .map(|_| Constraint::Length(PLAYLIST_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (chunk, index) in rows.iter().zip(start..end) {
            if chunk.height == 0 {
                continue;
            }
            let playlist = &playlists[index];
            let is_selected = index == selected;

            let mut block = Block::default().borders(Borders::ALL);
            let mut paragraph_style = Style::default();
            if is_selected {
                block = block.style(Style::default().fg(Color::Yellow));
                paragraph_style = Style::default().fg(Color::Yellow);
            }

            let name = if is_selected {
                format!("▶ {}", playlist.name)
            } else {
                playlist.name.clone()
            };
            let stock_style = if playlist.quantity == 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let lines = vec![
                Line::from(Span::styled(
                    name,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    playlist.description.clone(),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(format!("Genre: {}", playlist.genre)),
                Line::from(Span::styled(
                    stock_label(&playlist.quantity.to_string()),
                    stock_style,
                )),
            ];

            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Left)
                .style(paragraph_style);
            frame.render_widget(paragraph, *chunk);
        }
    }

    fn draw_details(&self, frame: &mut Frame, area: Rect, details: &DetailsState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Playlist Details");

        if !details.is_loaded() {
            let message = Paragraph::new("Loading playlist...")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let state = details.ui_state();
        let label_style = Style::default().fg(Color::Gray);
        let mut lines = vec![
            Line::from(Span::styled(
                state.details.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Description: ", label_style),
                Span::raw(state.details.description.clone()),
            ]),
            Line::from(vec![
                Span::styled("Genre: ", label_style),
                Span::raw(state.details.genre.clone()),
            ]),
            Line::from(stock_label(&state.details.quantity)),
        ];
        if state.out_of_stock {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Out of stock",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        form: &PlaylistForm,
        ui_state: &EntryUiState,
    ) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let details = &ui_state.details;
        let mut lines: Vec<Line> = PlaylistField::ALL
            .iter()
            .map(|field| form.build_line(details, *field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if ui_state.is_entry_valid {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                MISSING_FIELDS,
                Style::default().fg(Color::DarkGray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = form.active.label().len() + 2;
        let cursor_x = cursor_column(inner, prefix.saturating_add(form.active_len(details)));
        let cursor_y = inner
            .y
            .saturating_add(form.active.index() as u16)
            .min(inner.bottom().saturating_sub(1).max(inner.y));
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmPlaylistDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete {}?", confirm.name)),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::ConfirmDelete(_)) => &[("[Y]", " Delete   "), ("[N/Esc]", " Cancel")],
            (Screen::Home, _) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Open   "),
                ("[+]", " Add   "),
                ("[q]", " Quit"),
            ],
            (Screen::Details(_), _) => &[
                ("[s]", " Sell one   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[Esc]", " Back   "),
                ("[q]", " Quit"),
            ],
            (Screen::Entry { .. }, _) | (Screen::Edit { .. }, _) => &[
                ("[Tab]", " Next field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, text)| [Span::styled(*key, key_style), Span::raw(*text)])
            .collect();
        Line::from(spans)
    }
}

/// Apply a form editing key to a copy of the holder's draft. Returns the new
/// draft when the text changed.
fn edit_draft(
    code: KeyCode,
    form: &mut PlaylistForm,
    ui_state: &EntryUiState,
) -> Option<PlaylistDetails> {
    match code {
        KeyCode::Tab | KeyCode::Down => {
            form.next_field();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.previous_field();
            None
        }
        KeyCode::Backspace => {
            let mut details = ui_state.details.clone();
            form.backspace(&mut details);
            Some(details)
        }
        KeyCode::Char(ch) => {
            let mut details = ui_state.details.clone();
            if form.push_char(&mut details, ch) {
                form.error = None;
                Some(details)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::LocalPlaylistRepository;
    use crate::store::RecordStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> (Arc<RecordStore>, App) {
        let store = Arc::new(RecordStore::open_in_memory().unwrap());
        let repository: Arc<dyn PlaylistRepository> =
            Arc::new(LocalPlaylistRepository::new(Arc::clone(&store)));
        (store, App::new(repository).unwrap())
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn adding_a_playlist_from_the_home_screen() {
        let (store, mut app) = app();
        app.handle_key(KeyCode::Char('+'));
        type_text(&mut app, "Rock");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Classics");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Rock");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "7");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.screen, Screen::Home));
        let all = store.all_playlists().unwrap().latest().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].quantity, 7);
        assert_eq!(app.current_playlist().map(|p| p.name.as_str()), Some("Rock"));
    }

    #[test]
    fn incomplete_entry_stays_open() {
        let (store, mut app) = app();
        app.handle_key(KeyCode::Char('+'));
        type_text(&mut app, "Rock");
        app.handle_key(KeyCode::Enter);

        match &app.screen {
            Screen::Entry { form, .. } => assert_eq!(form.error.as_deref(), Some(MISSING_FIELDS)),
            _ => panic!("entry form should stay open"),
        }
        assert!(store.all_playlists().unwrap().latest().unwrap().is_empty());
    }

    #[test]
    fn selling_and_deleting_from_details() {
        let (store, mut app) = app();
        store
            .insert(&Playlist {
                id: 0,
                name: "Pop".into(),
                description: "Hits".into(),
                genre: "Pop".into(),
                quantity: 1,
            })
            .unwrap();
        app.tick();

        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('s'));
        app.tick();
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(
            app.status.as_ref().map(|s| s.text.as_str()),
            Some("Pop is out of stock.")
        );

        app.handle_key(KeyCode::Char('-'));
        assert!(matches!(app.mode, Mode::ConfirmDelete(_)));
        app.handle_key(KeyCode::Char('y'));
        app.tick();

        assert!(matches!(app.screen, Screen::Home));
        assert!(app.home.ui_state().playlists.is_empty());
    }

    #[test]
    fn empty_home_shows_hint() {
        let (_store, app) = app();
        assert!(rendered(&app).contains("No playlists yet"));
    }

    #[test]
    fn long_draft_keeps_cursor_inside_form() {
        let (_store, mut app) = app();
        app.handle_key(KeyCode::Char('+'));
        if let Screen::Entry { state, .. } = &mut app.screen {
            state.update_ui_state(PlaylistDetails {
                name: "x".repeat(70_000),
                ..PlaylistDetails::default()
            });
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 80);
        assert!(cursor.y < 30);
    }

    #[test]
    fn quit_from_home() {
        let (_store, mut app) = app();
        assert!(!app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
