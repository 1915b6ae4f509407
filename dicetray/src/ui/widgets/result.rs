//! Result panel widget
//!
//! Shows the most recent roll: the formula, the total in a box (or a
//! banner for criticals and fumbles), and the per-die breakdown.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use dicetray_core::LogEntry;

use crate::ui::theme::TrayTheme;

const CRITICAL_BANNER: [&str; 5] = [
    r"  .--=====--.  ",
    r" /           \ ",
    r"|  CRITICAL!  |",
    r" \           / ",
    r"  '--=====--'  ",
];

const FUMBLE_BANNER: [&str; 5] = [
    r"  .--=====--.  ",
    r" /           \ ",
    r"|   FUMBLE!   |",
    r" \           / ",
    r"  '--=====--'  ",
];

pub struct ResultWidget<'a> {
    entry: Option<&'a LogEntry>,
    theme: &'a TrayTheme,
}

impl<'a> ResultWidget<'a> {
    pub fn new(entry: Option<&'a LogEntry>, theme: &'a TrayTheme) -> Self {
        Self { entry, theme }
    }
}

impl Widget for ResultWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Result ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let entry = match self.entry {
            Some(entry) => entry,
            None => {
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Nothing rolled yet",
                        self.theme.system_style(),
                    )),
                    Line::from(Span::styled(
                        "Press 1-9 for a preset",
                        self.theme.system_style(),
                    )),
                ];
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .render(inner, buf);
                return;
            }
        };

        let tag_style = self.theme.tag_style(entry.tag);
        let mut lines: Vec<Line> = vec![
            Line::from(""),
            Line::from(Span::styled(
                entry.formula.as_str(),
                self.theme.text_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if entry.is_critical() {
            for row in CRITICAL_BANNER {
                lines.push(Line::from(Span::styled(row, tag_style)));
            }
        } else if entry.is_fumble() {
            for row in FUMBLE_BANNER {
                lines.push(Line::from(Span::styled(row, tag_style)));
            }
        } else {
            for row in total_box(entry.total) {
                lines.push(Line::from(Span::styled(row, tag_style)));
            }
        }

        // Banners replace the total box, so repeat the number below them.
        if entry.tag.is_some() {
            lines.push(Line::from(Span::styled(
                format!("= {}", entry.total),
                tag_style,
            )));
        }

        let detail = breakdown(entry);
        if !detail.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(detail, self.theme.die_style())));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

fn total_box(total: i64) -> [String; 3] {
    let text = total.to_string();
    let bar = "\u{2500}".repeat(text.len() + 4);
    [
        format!("\u{256d}{bar}\u{256e}"),
        format!("\u{2502}  {text}  \u{2502}"),
        format!("\u{2570}{bar}\u{256f}"),
    ]
}

/// `3 + 4 (+5)` style summary: per-die values with their signs, then the
/// modifier recovered from the stored total.
fn breakdown(entry: &LogEntry) -> String {
    let mut out = String::new();
    for (i, die) in entry.rolls.iter().enumerate() {
        if i == 0 {
            if die.negated {
                out.push('-');
            }
        } else {
            out.push_str(if die.negated { " - " } else { " + " });
        }
        out.push_str(&die.value.to_string());
    }

    let dice_sum: i64 = entry.rolls.iter().map(|d| d.signed_value()).sum();
    let modifier = entry.total - dice_sum;
    if modifier != 0 {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("({modifier:+})"));
    }
    out
}
