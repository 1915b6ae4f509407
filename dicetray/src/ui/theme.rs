//! Color theme for the dicetray TUI

use ratatui::style::{Color, Modifier, Style};

use dicetray_core::Classification;

/// The palette, kept in one place so the look can change without
/// touching widget code.
#[derive(Debug, Clone)]
pub struct TrayTheme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    /// Typed formulas and the input field.
    pub player_text: Color,
    /// Status line and hints.
    pub system_text: Color,
    /// Every die came up at its maximum.
    pub critical: Color,
    /// Every die came up 1.
    pub fumble: Color,
    /// Per-die values in breakdowns.
    pub die_text: Color,
}

impl Default for TrayTheme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            player_text: Color::Cyan,
            system_text: Color::DarkGray,
            critical: Color::Yellow,
            fumble: Color::Red,
            die_text: Color::Gray,
        }
    }
}

impl TrayTheme {
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn player_style(&self) -> Style {
        Style::default().fg(self.player_text)
    }

    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    pub fn die_style(&self) -> Style {
        Style::default().fg(self.die_text)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for a roll total: bold yellow for criticals, bold red for
    /// fumbles, plain foreground otherwise.
    pub fn tag_style(&self, tag: Option<Classification>) -> Style {
        match tag {
            Some(Classification::Critical) => Style::default()
                .fg(self.critical)
                .add_modifier(Modifier::BOLD),
            Some(Classification::Fumble) => Style::default()
                .fg(self.fumble)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(self.foreground),
        }
    }
}
