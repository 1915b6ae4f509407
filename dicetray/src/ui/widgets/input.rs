//! Formula input widget
//!
//! One-line editor with a visible cursor. Cursor positions are counted
//! in characters, not bytes, so multi-byte input renders correctly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::TrayTheme;

pub struct InputWidget<'a> {
    content: &'a str,
    theme: &'a TrayTheme,
    cursor_position: usize,
    active: bool,
    placeholder: &'a str,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a TrayTheme) -> Self {
        Self {
            content,
            theme,
            cursor_position: 0,
            active: false,
            placeholder: "",
        }
    }

    pub fn cursor(mut self, position: usize) -> Self {
        self.cursor_position = position;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.active {
            " Formula (insert) "
        } else {
            " Formula "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.active));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.content.is_empty() && !self.active {
            let hint = Paragraph::new(Line::from(Span::styled(
                format!("{} (press i)", self.placeholder),
                self.theme.system_style(),
            )));
            hint.render(inner, buf);
            return;
        }

        let style = self.theme.player_style();

        if !self.active {
            let line = Line::from(vec![
                Span::styled("> ", self.theme.system_style()),
                Span::styled(self.content, style),
            ]);
            Paragraph::new(line).render(inner, buf);
            return;
        }

        // Split around the cursor so the character under it can be
        // underlined. At the end of the line the cursor sits on a space.
        let chars: Vec<char> = self.content.chars().collect();
        let cursor = self.cursor_position.min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at = chars
            .get(cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = if cursor < chars.len() {
            chars[cursor + 1..].iter().collect()
        } else {
            String::new()
        };

        let line = Line::from(vec![
            Span::styled("> ", self.theme.system_style()),
            Span::styled(before, style),
            Span::styled(at, style.add_modifier(Modifier::UNDERLINED)),
            Span::styled(after, style),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
