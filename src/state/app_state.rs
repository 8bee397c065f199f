//! Application-level state.

use super::Notification;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Markets,
    MarketDetail,
    CreateMarket,
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What the input buffer is being edited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Amount,
    MarketTitle,
    MarketDescription,
    MarketEndTime,
}

/// Global application state.
#[derive(Debug)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// What the input buffer edits, when editing.
    pub input_target: Option<InputTarget>,
    /// Dark mode flag. Single owner; seeded from config, persisted on toggle.
    pub dark_mode: bool,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Current error message.
    pub error: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current text input.
    pub input_buffer: String,
    /// Cursor position in input buffer.
    pub cursor_position: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::Markets,
            input_mode: InputMode::Normal,
            input_target: None,
            dark_mode: true,
            show_help: false,
            notification: None,
            error: None,
            should_quit: false,
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }
}

impl AppState {
    /// Check if in editing mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Editing
    }

    /// Enter editing mode for a target, seeding the buffer.
    pub fn start_editing(&mut self, target: InputTarget, seed: String) {
        self.input_mode = InputMode::Editing;
        self.input_target = Some(target);
        self.cursor_position = seed.len();
        self.input_buffer = seed;
    }

    /// Leave editing mode and clear the buffer.
    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_target = None;
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Add a character to the input buffer.
    pub fn push_char(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            if let Some((offset, _)) = self.input_buffer[..self.cursor_position]
                .char_indices()
                .next_back()
            {
                self.input_buffer.remove(offset);
                self.cursor_position = offset;
            }
        }
    }
}
