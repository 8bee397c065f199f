//! State management for neoquest.
//!
//! Centralized state with a unidirectional data flow: events produce
//! actions, the store reduces them, the UI renders the store.

mod app_state;
mod market_state;
mod vote_state;
mod wallet_state;

pub use app_state::{AppState, InputMode, InputTarget, View};
pub use market_state::{CreateMarketForm, Market, MarketState, MarketStatus};
pub use vote_state::{VoteBlock, VoteState};
pub use wallet_state::WalletState;

use crate::error::Result;
use crate::market::VoteOutcome;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    SetInputMode(InputMode),

    // Wallet
    ConnectWallet,
    WalletConnecting(bool),
    WalletConnected { address: String },
    BalanceLoading(bool),
    BalanceLoaded(Decimal),

    // Market data
    SelectMarket(usize),
    OpenMarket,
    RefreshMarket,
    AmountsLoading(bool),
    PointsLoaded { yes: i128, no: i128 },
    TvlLoaded(i128),

    // Voting
    SelectOutcome(VoteOutcome),
    SetAmount(u64),
    MaxAmount,
    EditAmount,
    SubmitVote,
    VoteSubmitting(bool),
    VoteSubmitted { txid: String },
    RewardLoaded(i128),

    // Market creation
    FormFocusNext,
    EditFormField,
    SubmitCreateMarket,
    MarketCreated { txid: String },

    // Text input
    InputChar(char),
    InputBackspace,
    CommitInput,
    CancelInput,

    // UI
    ScrollUp,
    ScrollDown,
    ToggleHelp,
    ToggleDarkMode,
    ShowNotification(Notification),
    DismissNotification,
    SetError(String),
    ClearError,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration_secs: 3,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Market state.
    pub markets: MarketState,
    /// Wallet state.
    pub wallet: WalletState,
    /// Vote state.
    pub vote: VoteState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::default(),
            markets: MarketState::default(),
            wallet: WalletState::default(),
            vote: VoteState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => self.app.current_view = view,
            Action::SetInputMode(mode) => self.app.input_mode = mode,

            // Wallet. The connect workflow itself runs in App; the
            // connecting flag arrives through WalletConnecting.
            Action::ConnectWallet => {}
            Action::WalletConnecting(connecting) => self.wallet.connecting = connecting,
            Action::WalletConnected { address } => {
                self.wallet.connected = true;
                self.wallet.connecting = false;
                self.wallet.address = Some(address);
            }
            Action::BalanceLoading(loading) => self.wallet.loading_balance = loading,
            Action::BalanceLoaded(balance) => {
                self.wallet.gas_balance = balance;
                self.wallet.loading_balance = false;
            }

            // Market data
            Action::SelectMarket(index) => {
                if index < self.markets.markets.len() {
                    self.markets.selected_index = Some(index);
                }
            }
            Action::OpenMarket => {
                if self.markets.selected_market().is_some() {
                    self.app.current_view = View::MarketDetail;
                }
            }
            Action::RefreshMarket => self.markets.loading_amounts = true,
            Action::AmountsLoading(loading) => self.markets.loading_amounts = loading,
            Action::PointsLoaded { yes, no } => {
                self.markets.yes_points = Some(yes);
                self.markets.no_points = Some(no);
                self.markets.loading_amounts = false;
                self.markets.last_updated = Some(chrono::Utc::now());
            }
            Action::TvlLoaded(tvl) => self.markets.tvl = Some(tvl),

            // Voting
            Action::SelectOutcome(outcome) => self.vote.outcome = Some(outcome),
            Action::SetAmount(amount) => self.vote.amount = amount,
            Action::MaxAmount => {
                self.vote.amount = self.wallet.gas_balance.floor().to_u64().unwrap_or(0);
            }
            Action::EditAmount => {
                self.app.start_editing(InputTarget::Amount, self.vote.amount.to_string());
            }
            Action::SubmitVote => {}
            Action::VoteSubmitting(voting) => self.vote.voting = voting,
            Action::VoteSubmitted { txid } => {
                self.vote.voting = false;
                self.vote.last_txid = Some(txid);
            }
            Action::RewardLoaded(reward) => self.vote.potential_reward = Some(reward),

            // Market creation
            Action::FormFocusNext => self.markets.form.focus_next(),
            Action::EditFormField => {
                let target = self.markets.form.focused_target();
                let value = self.markets.form.focused_value().to_string();
                self.app.start_editing(target, value);
            }
            Action::SubmitCreateMarket => {}
            Action::MarketCreated { txid } => {
                self.markets.form = CreateMarketForm::default();
                self.vote.last_txid = Some(txid);
            }

            // Text input
            Action::InputChar(c) => self.app.push_char(c),
            Action::InputBackspace => self.app.pop_char(),
            Action::CommitInput => self.commit_input(),
            Action::CancelInput => self.app.stop_editing(),

            // UI
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ToggleDarkMode => self.app.dark_mode = !self.app.dark_mode,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }
            Action::SetError(error) => {
                self.app.error = Some(error);
                self.markets.loading_amounts = false;
            }
            Action::ClearError => {
                self.app.error = None;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    fn commit_input(&mut self) {
        let Some(target) = self.app.input_target else {
            self.app.stop_editing();
            return;
        };
        let buffer = self.app.input_buffer.clone();
        self.app.stop_editing();

        match target {
            InputTarget::Amount => match buffer.trim().parse::<u64>() {
                Ok(amount) => self.vote.amount = amount,
                Err(_) => {
                    self.app.notification =
                        Some(Notification::warning("Enter a whole GAS amount"));
                }
            },
            InputTarget::MarketTitle => self.markets.form.title = buffer,
            InputTarget::MarketDescription => self.markets.form.description = buffer,
            InputTarget::MarketEndTime => self.markets.form.end_time = buffer,
        }
    }

    fn scroll(&mut self, delta: i32) {
        match self.app.current_view {
            View::Markets => {
                let current = self.markets.selected_index.unwrap_or(0) as i32;
                let new_index = (current + delta).max(0) as usize;
                let max_index = self.markets.markets.len().saturating_sub(1);
                self.markets.selected_index = Some(new_index.min(max_index));
            }
            View::CreateMarket => {
                if delta > 0 {
                    self.markets.form.focus_next();
                } else {
                    self.markets.form.focus_prev();
                }
            }
            View::MarketDetail => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    #[test]
    fn points_loaded_clears_the_loading_flag() {
        let mut store = store();
        store.reduce(Action::RefreshMarket);
        assert!(store.markets.loading_amounts);

        store.reduce(Action::PointsLoaded {
            yes: 343638,
            no: 368354,
        });
        assert!(!store.markets.loading_amounts);
        assert_eq!(store.markets.yes_points, Some(343638));
        assert_eq!(store.markets.no_points, Some(368354));
    }

    #[test]
    fn connect_wallet_alone_does_not_flip_the_connecting_flag() {
        let mut store = store();
        store.reduce(Action::ConnectWallet);
        assert!(!store.wallet.connecting);
    }

    #[test]
    fn wallet_connection_updates_address_and_flags() {
        let mut store = store();
        store.reduce(Action::WalletConnecting(true));
        assert!(store.wallet.connecting);

        store.reduce(Action::WalletConnected {
            address: "NiHURBS9QgbFpYNjfFLBSRcQCvC2L2FTFg".into(),
        });
        assert!(store.wallet.connected);
        assert!(!store.wallet.connecting);
        assert_eq!(
            store.wallet.address.as_deref(),
            Some("NiHURBS9QgbFpYNjfFLBSRcQCvC2L2FTFg")
        );
    }

    #[test]
    fn max_amount_floors_the_balance() {
        let mut store = store();
        store.reduce(Action::BalanceLoaded(dec!(17.4081)));
        store.reduce(Action::MaxAmount);
        assert_eq!(store.vote.amount, 17);
    }

    #[test]
    fn committing_an_amount_parses_the_buffer() {
        let mut store = store();
        store.reduce(Action::EditAmount);
        assert_eq!(store.app.input_mode, InputMode::Editing);
        store.reduce(Action::CancelInput);

        store.reduce(Action::EditAmount);
        for c in "25".chars() {
            store.reduce(Action::InputChar(c));
        }
        store.reduce(Action::CommitInput);
        // Buffer was seeded with the current amount "1", so "1" + "25".
        assert_eq!(store.vote.amount, 125);
        assert_eq!(store.app.input_mode, InputMode::Normal);
    }

    #[test]
    fn committing_garbage_warns_instead_of_updating() {
        let mut store = store();
        store.reduce(Action::EditAmount);
        store.reduce(Action::InputChar('x'));
        store.reduce(Action::CommitInput);
        assert_eq!(store.vote.amount, 1);
        assert!(store.app.notification.is_some());
    }

    #[test]
    fn dark_mode_toggles_in_one_place() {
        let mut store = store();
        let initial = store.app.dark_mode;
        store.reduce(Action::ToggleDarkMode);
        assert_eq!(store.app.dark_mode, !initial);
    }
}
