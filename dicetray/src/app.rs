//! Application state for the dicetray TUI
//!
//! `App` owns the rolling session, the history selection, the formula
//! input field, and the transient UI state (status line, overlay,
//! pending autosave). Event handlers mutate it; rendering reads it.

use std::collections::VecDeque;
use std::path::PathBuf;

use dicetray_core::{preset_for_slot, LogEntry, RollSession};

use crate::ui::theme::TrayTheme;
use crate::ui::Overlay;

/// How many typed formulas are kept for Up/Down recall in insert mode.
const INPUT_HISTORY_SIZE: usize = 100;

/// Input mode, vim-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// Top-level state for the terminal UI.
pub struct App {
    /// Rolling session: RNG, history, and persistence in one place.
    pub session: RollSession,
    /// Where the history blob lives. `None` disables persistence.
    pub data_path: Option<PathBuf>,
    /// Set after every history mutation; the main loop flushes it.
    pub pending_save: bool,
    /// Colors for every panel.
    pub theme: TrayTheme,
    /// Current input mode.
    pub input_mode: InputMode,

    // History panel
    selected: usize,
    // Result panel: the last roll made this session, kept even if the
    // entry is later deleted from the history.
    latest: Option<LogEntry>,

    // Formula input field
    input_buffer: String,
    cursor_position: usize,
    input_history: VecDeque<String>,
    history_index: Option<usize>,
    saved_input: Option<String>,

    overlay: Option<Overlay>,
    status_message: Option<String>,
}

impl App {
    pub fn new(session: RollSession, data_path: Option<PathBuf>) -> Self {
        Self {
            session,
            data_path,
            pending_save: false,
            theme: TrayTheme::default(),
            input_mode: InputMode::Normal,
            selected: 0,
            latest: None,
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::new(),
            history_index: None,
            saved_input: None,
            overlay: None,
            status_message: None,
        }
    }

    // ==== Rolling ====

    /// Parse and roll `formula`. Success lands in the history and the
    /// result panel; failure only touches the status line.
    pub fn roll_formula(&mut self, formula: &str) {
        match self.session.roll(formula) {
            Ok(entry) => {
                self.set_status(format!("{} = {}", entry.formula, entry.total));
                self.latest = Some(entry);
                self.selected = 0;
                self.mark_dirty();
            }
            Err(e) => self.set_status(format!("{e}")),
        }
    }

    /// Roll the preset bound to number key `slot` (1-9), if any.
    pub fn roll_preset(&mut self, slot: usize) {
        if let Some(preset) = preset_for_slot(slot) {
            self.roll_formula(preset.formula);
        }
    }

    /// Roll the selected history entry's formula again.
    pub fn reroll_selected(&mut self) {
        if let Some(entry) = self.selected_entry() {
            let formula = entry.formula.clone();
            self.roll_formula(&formula);
        }
    }

    /// The roll shown in the result panel.
    pub fn latest_roll(&self) -> Option<&LogEntry> {
        self.latest.as_ref()
    }

    // ==== History Selection ====

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&LogEntry> {
        self.session.entries().get(self.selected)
    }

    /// Move the selection one entry down (towards older rolls).
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.session.len() {
            self.selected += 1;
        }
    }

    /// Move the selection one entry up (towards newer rolls).
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_newest(&mut self) {
        self.selected = 0;
    }

    pub fn select_oldest(&mut self) {
        self.selected = self.session.len().saturating_sub(1);
    }

    /// Remove the selected entry from the history.
    pub fn delete_selected(&mut self) {
        let id = match self.selected_entry() {
            Some(entry) => entry.id,
            None => return,
        };
        if self.session.remove(&id) {
            self.clamp_selection();
            self.set_status("Deleted 1 roll");
            self.mark_dirty();
        }
    }

    /// Drop every history entry.
    pub fn clear_history(&mut self) {
        if self.session.is_empty() {
            self.set_status("History is already empty");
            return;
        }
        let count = self.session.len();
        self.session.clear();
        self.selected = 0;
        self.set_status(format!("Cleared {count} rolls"));
        self.mark_dirty();
    }

    fn clamp_selection(&mut self) {
        let len = self.session.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn mark_dirty(&mut self) {
        if self.data_path.is_some() {
            self.pending_save = true;
        }
    }

    // ==== Modes and Overlays ====

    pub fn enter_insert_mode(&mut self) {
        self.input_mode = InputMode::Insert;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.history_index = None;
        self.saved_input = None;
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Some(Overlay::Help) => None,
            None => Some(Overlay::Help),
        };
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    // ==== Input Editing ====

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Insert a character at the cursor. Cursor positions are counted in
    /// characters, not bytes, so multi-byte input stays intact.
    pub fn type_char(&mut self, c: char) {
        let byte_index = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_index, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let target = self.cursor_position - 1;
        if let Some((byte_index, _)) = self.input_buffer.char_indices().nth(target) {
            self.input_buffer.remove(byte_index);
            self.cursor_position = target;
        }
    }

    /// Remove the character under the cursor.
    pub fn delete_char(&mut self) {
        if let Some((byte_index, _)) = self.input_buffer.char_indices().nth(self.cursor_position) {
            self.input_buffer.remove(byte_index);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Replace the whole input field, cursor at the end.
    pub fn set_input(&mut self, content: impl Into<String>) {
        self.input_buffer = content.into();
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Take the input field's content, recording it for Up/Down recall.
    /// Returns `None` when the field held only whitespace.
    pub fn submit_input(&mut self) -> Option<String> {
        let input = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        self.history_index = None;
        self.saved_input = None;

        let trimmed = input.trim().to_string();
        if trimmed.is_empty() {
            return None;
        }
        if self.input_history.front() != Some(&trimmed) {
            self.input_history.push_front(trimmed.clone());
            self.input_history.truncate(INPUT_HISTORY_SIZE);
        }
        Some(trimmed)
    }

    /// Recall the previous typed formula (Up in insert mode).
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        let next_index = match self.history_index {
            None => {
                self.saved_input = Some(self.input_buffer.clone());
                0
            }
            Some(i) if i + 1 < self.input_history.len() => i + 1,
            Some(i) => i,
        };
        self.history_index = Some(next_index);
        if let Some(recalled) = self.input_history.get(next_index) {
            let recalled = recalled.clone();
            self.set_input(recalled);
        }
    }

    /// Walk back towards the in-progress input (Down in insert mode).
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                let restored = self.saved_input.take().unwrap_or_default();
                self.set_input(restored);
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                if let Some(recalled) = self.input_history.get(i - 1) {
                    let recalled = recalled.clone();
                    self.set_input(recalled);
                }
            }
        }
    }

    // ==== Status Line ====

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
