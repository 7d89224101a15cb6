use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Playlist, PlaylistDetails};

/// Fields available within the playlist form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum PlaylistField {
    #[default]
    Name,
    Description,
    Genre,
    Quantity,
}

impl PlaylistField {
    pub(crate) const ALL: [PlaylistField; 4] = [
        PlaylistField::Name,
        PlaylistField::Description,
        PlaylistField::Genre,
        PlaylistField::Quantity,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            PlaylistField::Name => "Name",
            PlaylistField::Description => "Description",
            PlaylistField::Genre => "Genre",
            PlaylistField::Quantity => "In stock",
        }
    }

    pub(crate) fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn value(self, details: &PlaylistDetails) -> &String {
        match self {
            PlaylistField::Name => &details.name,
            PlaylistField::Description => &details.description,
            PlaylistField::Genre => &details.genre,
            PlaylistField::Quantity => &details.quantity,
        }
    }

    fn value_mut(self, details: &mut PlaylistDetails) -> &mut String {
        match self {
            PlaylistField::Name => &mut details.name,
            PlaylistField::Description => &mut details.description,
            PlaylistField::Genre => &mut details.genre,
            PlaylistField::Quantity => &mut details.quantity,
        }
    }
}

/// Focus and error state of the entry/edit form. The text itself lives in the
/// view-state holder's draft; the form only edits it in place.
#[derive(Default, Clone)]
pub(crate) struct PlaylistForm {
    pub(crate) active: PlaylistField,
    pub(crate) error: Option<String>,
}

impl PlaylistForm {
    /// Move focus to the next field, wrapping around.
    pub(crate) fn next_field(&mut self) {
        let all = PlaylistField::ALL;
        self.active = all[(self.active.index() + 1) % all.len()];
    }

    /// Move focus to the previous field, wrapping around.
    pub(crate) fn previous_field(&mut self) {
        let all = PlaylistField::ALL;
        self.active = all[(self.active.index() + all.len() - 1) % all.len()];
    }

    /// Append a character to the active field. Stock only takes digits.
    pub(crate) fn push_char(&self, details: &mut PlaylistDetails, ch: char) -> bool {
        let accepted = match self.active {
            PlaylistField::Quantity => ch.is_ascii_digit(),
            _ => !ch.is_control(),
        };
        if accepted {
            self.active.value_mut(details).push(ch);
        }
        accepted
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&self, details: &mut PlaylistDetails) {
        self.active.value_mut(details).pop();
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, details: &PlaylistDetails, field: PlaylistField) -> Line<'static> {
        let value = field.value(details);
        let is_active = self.active == field;

        let display = if !value.is_empty() {
            value.clone()
        } else if field == PlaylistField::Quantity {
            "0".to_string()
        } else {
            "<required>".to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the active field, for cursor placement.
    pub(crate) fn active_len(&self, details: &PlaylistDetails) -> usize {
        self.active.value(details).chars().count()
    }
}

#[derive(Clone)]
pub(crate) struct ConfirmPlaylistDelete {
    pub(crate) name: String,
}

impl ConfirmPlaylistDelete {
    pub(crate) fn from(playlist: &Playlist) -> Self {
        Self {
            name: playlist.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_wraps() {
        let mut form = PlaylistForm::default();
        form.previous_field();
        assert_eq!(form.active, PlaylistField::Quantity);
        form.next_field();
        assert_eq!(form.active, PlaylistField::Name);
        form.next_field();
        assert_eq!(form.active, PlaylistField::Description);
    }

    #[test]
    fn quantity_accepts_digits_only() {
        let form = PlaylistForm {
            active: PlaylistField::Quantity,
            error: None,
        };
        let mut details = PlaylistDetails::default();
        assert!(form.push_char(&mut details, '4'));
        assert!(!form.push_char(&mut details, '-'));
        assert!(!form.push_char(&mut details, 'x'));
        assert_eq!(details.quantity, "4");
    }

    #[test]
    fn typing_edits_only_the_active_field() {
        let mut form = PlaylistForm::default();
        let mut details = PlaylistDetails::default();
        for ch in "Rock".chars() {
            form.push_char(&mut details, ch);
        }
        form.next_field();
        form.push_char(&mut details, 'x');
        form.backspace(&mut details);
        form.backspace(&mut details);

        assert_eq!(details.name, "Rock");
        assert!(details.description.is_empty());
        assert_eq!(form.active_len(&details), 0);
    }
}
