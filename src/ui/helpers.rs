use std::cmp::min;

use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Range of list indices to draw so that `selected` stays visible when only
/// `capacity` rows fit.
pub(crate) fn visible_window(selected: usize, len: usize, capacity: usize) -> (usize, usize) {
    let capacity = capacity.max(1);
    let mut start = if selected >= capacity {
        selected + 1 - capacity
    } else {
        0
    };
    if start + capacity > len {
        start = len.saturating_sub(capacity);
    }
    (start, min(start + capacity, len))
}

/// Column of a text cursor `offset` cells into `area`, held on the area's last
/// column when the text runs past it.
pub(crate) fn cursor_column(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let last = area.right().saturating_sub(1).max(area.x);
    area.x.saturating_add(offset).min(last)
}

/// "In stock" text shared by the list cards and the details view.
pub(crate) fn stock_label(quantity: &str) -> String {
    let quantity = quantity.trim();
    if quantity.is_empty() {
        "In stock: 0".to_string()
    } else {
        format!("In stock: {quantity}")
    }
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(0, 10, 3), (0, 3));
        assert_eq!(visible_window(4, 10, 3), (2, 5));
        assert_eq!(visible_window(9, 10, 3), (7, 10));
        assert_eq!(visible_window(0, 2, 5), (0, 2));
        assert_eq!(visible_window(0, 0, 5), (0, 0));
    }

    #[test]
    fn cursor_stays_inside_area() {
        let area = Rect::new(10, 2, 20, 5);
        assert_eq!(cursor_column(area, 4), 14);
        assert_eq!(cursor_column(area, 19), 29);
        assert_eq!(cursor_column(area, 25), 29);
        assert_eq!(cursor_column(area, usize::MAX), 29);
        assert_eq!(
            cursor_column(Rect::new(u16::MAX - 1, 0, 1, 1), 70_000),
            u16::MAX - 1
        );
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = anyhow::anyhow!("UNIQUE constraint failed").context("failed to insert");
        assert_eq!(surface_error(&err), "UNIQUE constraint failed");
    }

    #[test]
    fn stock_label_defaults_to_zero() {
        assert_eq!(stock_label(""), "In stock: 0");
        assert_eq!(stock_label("12"), "In stock: 12");
    }
}
