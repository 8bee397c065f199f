//! Event handler for processing input events.

use crate::config::KeyBindings;
use crate::error::Result;
use crate::market::VoteOutcome;
use crate::state::{Action, InputMode, Store, View};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;
use tokio::sync::mpsc;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Action sender (for future async dispatch).
    #[allow(dead_code)]
    action_tx: mpsc::UnboundedSender<Action>,
    /// Key bindings.
    keybindings: KeyBindings,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Clone)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
}

impl EventHandler {
    /// Create a new event handler with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, keybindings: KeyBindings) -> Self {
        Self {
            action_tx,
            keybindings,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            match event {
                CrosstermEvent::Key(key) => {
                    if let Some(action) = self.handle_key(key) {
                        return Ok(Some(action));
                    }
                }
                CrosstermEvent::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse(mouse) {
                        return Ok(Some(action));
                    }
                }
                CrosstermEvent::Resize(_, _) => {
                    // Terminal will automatically redraw
                }
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.as_ref()?;

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key, snapshot),
            InputMode::Editing => self.handle_editing_mode(key),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let input = super::InputEvent::from(key);

        // Global shortcuts
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&self.keybindings.refresh) {
            return Some(Action::RefreshMarket);
        }
        if input.matches(&self.keybindings.connect) {
            return Some(Action::ConnectWallet);
        }
        if input.matches(&self.keybindings.dark_mode) {
            return Some(Action::ToggleDarkMode);
        }

        // Navigation
        if input.matches(&self.keybindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }

        match snapshot.current_view {
            View::Markets => self.handle_markets_view(&input),
            View::MarketDetail => self.handle_detail_view(&input),
            View::CreateMarket => self.handle_create_view(&input),
        }
    }

    fn handle_markets_view(&self, input: &super::InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.select) {
            return Some(Action::OpenMarket);
        }
        if input.matches(&self.keybindings.create_market) {
            return Some(Action::SetView(View::CreateMarket));
        }
        None
    }

    fn handle_detail_view(&self, input: &super::InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.outcome_yes) {
            return Some(Action::SelectOutcome(VoteOutcome::Yes));
        }
        if input.matches(&self.keybindings.outcome_no) {
            return Some(Action::SelectOutcome(VoteOutcome::No));
        }
        if input.matches(&self.keybindings.amount) {
            return Some(Action::EditAmount);
        }
        if input.matches(&self.keybindings.max_amount) {
            return Some(Action::MaxAmount);
        }
        if input.matches(&self.keybindings.vote) {
            return Some(Action::SubmitVote);
        }
        if input.matches(&self.keybindings.back) {
            return Some(Action::SetView(View::Markets));
        }
        None
    }

    fn handle_create_view(&self, input: &super::InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.select) {
            return Some(Action::EditFormField);
        }
        if input.matches("Tab") {
            return Some(Action::FormFocusNext);
        }
        if input.matches(&self.keybindings.submit_market) {
            return Some(Action::SubmitCreateMarket);
        }
        if input.matches(&self.keybindings.back) {
            return Some(Action::SetView(View::Markets));
        }
        None
    }

    fn handle_editing_mode(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CancelInput),
            KeyCode::Enter => Some(Action::CommitInput),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn handler_in(view: View, mode: InputMode) -> EventHandler {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut handler = EventHandler::new(tx, KeyBindings::default());
        handler.store_snapshot = Some(StoreSnapshot {
            input_mode: mode,
            current_view: view,
        });
        handler
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_opens_the_selected_market() {
        let handler = handler_in(View::Markets, InputMode::Normal);
        let action = handler.handle_key(press(KeyCode::Enter));
        assert!(matches!(action, Some(Action::OpenMarket)));
    }

    #[test]
    fn outcome_keys_only_apply_in_the_detail_view() {
        let detail = handler_in(View::MarketDetail, InputMode::Normal);
        assert!(matches!(
            detail.handle_key(press(KeyCode::Char('y'))),
            Some(Action::SelectOutcome(VoteOutcome::Yes))
        ));
        assert!(matches!(
            detail.handle_key(press(KeyCode::Char('n'))),
            Some(Action::SelectOutcome(VoteOutcome::No))
        ));

        let list = handler_in(View::Markets, InputMode::Normal);
        assert!(list.handle_key(press(KeyCode::Char('y'))).is_none());
    }

    #[test]
    fn editing_mode_routes_characters_to_the_buffer() {
        let handler = handler_in(View::MarketDetail, InputMode::Editing);
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('7'))),
            Some(Action::InputChar('7'))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Enter)),
            Some(Action::CommitInput)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Esc)),
            Some(Action::CancelInput)
        ));
    }

    #[test]
    fn vote_key_submits_from_the_detail_view() {
        let handler = handler_in(View::MarketDetail, InputMode::Normal);
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('v'))),
            Some(Action::SubmitVote)
        ));
    }

    #[test]
    fn released_keys_are_ignored() {
        let handler = handler_in(View::Markets, InputMode::Normal);
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert!(handler.handle_key(key).is_none());
    }
}
