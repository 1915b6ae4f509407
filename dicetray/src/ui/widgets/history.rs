//! Roll history widget
//!
//! Newest-first list with a movable selection. Each row shows the
//! formula, a compact per-die summary, and the total, colored by
//! classification.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use dicetray_core::LogEntry;

use crate::ui::theme::TrayTheme;

pub struct HistoryWidget<'a> {
    entries: &'a [LogEntry],
    theme: &'a TrayTheme,
    selected: usize,
    focused: bool,
}

impl<'a> HistoryWidget<'a> {
    pub fn new(entries: &'a [LogEntry], theme: &'a TrayTheme) -> Self {
        Self {
            entries,
            theme,
            selected: 0,
            focused: false,
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for HistoryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" History ({}) ", self.entries.len());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.entries.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No rolls yet. Press i and type a formula.",
                self.theme.system_style(),
            )));
            empty.render(inner, buf);
            return;
        }

        // Scroll just enough to keep the selection on screen.
        let visible = inner.height as usize;
        let offset = if self.selected >= visible {
            self.selected + 1 - visible
        } else {
            0
        };

        let mut lines: Vec<Line> = Vec::with_capacity(visible);
        for (index, entry) in self.entries.iter().enumerate().skip(offset).take(visible) {
            let is_selected = index == self.selected;
            let marker = if is_selected { "\u{25b8} " } else { "  " };
            let base = if is_selected {
                self.theme.text_style().add_modifier(Modifier::BOLD)
            } else {
                self.theme.text_style()
            };

            let mut spans = vec![
                Span::styled(marker, self.theme.player_style()),
                Span::styled(format!("{:<9}", entry.formula), base),
                Span::styled(
                    format!(" {:<14}", values_summary(entry, 12)),
                    self.theme.die_style(),
                ),
                Span::styled(format!(" = {}", entry.total), self.theme.tag_style(entry.tag)),
            ];
            if entry.is_fumble() {
                spans.push(Span::styled("  FUMBLE", self.theme.tag_style(entry.tag)));
            } else if entry.is_critical() {
                spans.push(Span::styled("  CRIT", self.theme.tag_style(entry.tag)));
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// `5, 3, 2` style value list, shortened once it would outgrow `max_len`.
fn values_summary(entry: &LogEntry, max_len: usize) -> String {
    let mut out = String::new();
    for die in &entry.rolls {
        let piece = die.value.to_string();
        if !out.is_empty() {
            out.push_str(", ");
        }
        if out.len() + piece.len() > max_len {
            out.push('\u{2026}');
            break;
        }
        out.push_str(&piece);
    }
    out
}
