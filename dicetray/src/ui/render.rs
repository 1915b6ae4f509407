//! Main rendering for the dicetray TUI
//!
//! One `render` entry point draws the whole frame from the current
//! [`App`] state. Individual panels live in [`super::widgets`].

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};

use super::layout::{centered_rect_fixed, AppLayout};
use super::widgets::{HistoryWidget, InputWidget, ResultWidget};

/// Full-screen overlays drawn on top of the main panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Draw the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::calculate(frame.area());

    render_title_bar(frame, app, layout.title_area);

    let history = HistoryWidget::new(app.session.entries(), &app.theme)
        .selected(app.selected())
        .focused(app.input_mode == InputMode::Normal);
    frame.render_widget(history, layout.history_area);

    let result = ResultWidget::new(app.latest_roll(), &app.theme);
    frame.render_widget(result, layout.result_area);

    let input = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor(app.cursor_position())
        .active(app.input_mode == InputMode::Insert)
        .placeholder("Type a formula like 2d6+3");
    frame.render_widget(input, layout.input_area);

    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);

    if let Some(Overlay::Help) = app.overlay() {
        render_help_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " dicetray ",
            app.theme.text_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {} rolls ", app.session.len()),
            app.theme.system_style(),
        ),
    ];
    if app.data_path.is_none() {
        spans.push(Span::styled("| ephemeral ", app.theme.system_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            app.theme.text_style().add_modifier(Modifier::BOLD),
        ),
        InputMode::Insert => Span::styled(
            " INSERT ",
            app.theme.player_style().add_modifier(Modifier::BOLD),
        ),
    };
    let mut spans = vec![mode];
    if let Some(message) = app.status_message() {
        spans.push(Span::styled("| ", app.theme.system_style()));
        spans.push(Span::styled(message.to_string(), app.theme.text_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hotkey_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Normal => {
            " i input  1-9 presets  j/k select  r reroll  d delete  C clear  ? help  q quit"
        }
        InputMode::Insert => " Enter roll  Up/Down recall  Esc normal mode",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, app.theme.system_style()))),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(52, 20, frame.area());
    frame.render_widget(Clear, area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            app.theme.text_style().add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<11}"), app.theme.player_style()),
            Span::styled(what, app.theme.text_style()),
        ])
    };

    let lines = vec![
        heading("Normal mode"),
        entry("i, a", "edit the formula field"),
        entry("1-9", "roll a preset"),
        entry("j, k", "select older / newer roll"),
        entry("g, G", "jump to newest / oldest"),
        entry("r, Enter", "reroll the selected formula"),
        entry("d", "delete the selected roll"),
        entry("C", "clear the history"),
        entry("q, Ctrl-c", "quit"),
        Line::from(""),
        heading("Insert mode"),
        entry("Enter", "roll the typed formula"),
        entry("Up, Down", "recall typed formulas"),
        entry("Esc", "back to normal mode"),
        Line::from(""),
        Line::from(Span::styled(
            "Formulas: <count>d<sides>[+/-mod], e.g. 2d6+3",
            app.theme.system_style(),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
