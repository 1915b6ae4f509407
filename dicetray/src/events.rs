//! Event handling for the dicetray TUI
//!
//! Keyboard and mouse events mutate [`App`] directly; rolls are cheap
//! enough to happen inline in the handler. The caller only needs to know
//! whether to keep looping, redraw, or quit.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode};

/// What the main loop should do after an event.
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.select_prev();
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // An open overlay swallows everything else.
    if app.overlay().is_some() {
        return handle_overlay_keys(app, key);
    }

    // Ctrl-C quits from any mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return EventResult::Quit;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
    }
}

fn handle_overlay_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Char('i') => app.enter_insert_mode(),
        KeyCode::Char('a') => {
            app.enter_insert_mode();
            app.cursor_end();
        }
        KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_newest(),
        KeyCode::Char('G') | KeyCode::End => app.select_oldest(),
        KeyCode::Char('r') | KeyCode::Enter => app.reroll_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('C') => app.clear_history(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(slot) = c.to_digit(10) {
                app.roll_preset(slot as usize);
            }
        }
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.enter_normal_mode(),
        // Roll and stay in insert mode so the next formula can follow
        // immediately. Esc leaves.
        KeyCode::Enter => {
            if let Some(formula) = app.submit_input() {
                app.roll_formula(&formula);
            }
        }
        KeyCode::Up => app.history_prev(),
        KeyCode::Down => app.history_next(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete_char(),
        KeyCode::Char(c) => app.type_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}
