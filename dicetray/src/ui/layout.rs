//! Screen layout for the dicetray TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed areas for one frame.
pub struct AppLayout {
    pub title_area: Rect,
    pub history_area: Rect,
    pub result_area: Rect,
    pub input_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Split the terminal into the fixed panel arrangement: title bar on
    /// top, history and result side by side, then the input field, the
    /// status line, and the hotkey hints.
    pub fn calculate(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        Self {
            title_area: rows[0],
            history_area: columns[0],
            result_area: columns[1],
            input_area: rows[2],
            status_bar: rows[3],
            hotkey_bar: rows[4],
        }
    }
}

/// A centered rect of fixed size, clamped to the containing area.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
