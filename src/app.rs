//! Main application module.
//!
//! Coordinates the event loop, wallet session, contract calls and
//! rendering.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::EventHandler;
use crate::market::QuestContract;
use crate::state::{Action, Notification, Store, View};
use crate::ui::{Theme, Ui};
use crate::wallet::{RpcProvider, WalletProvider, WalletSession};

use chrono::NaiveDateTime;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Wallet session. A session without a provider still runs the UI.
    session: WalletSession,
    /// Contract handle, when a contract address is configured.
    contract: Option<QuestContract>,
    /// Configuration.
    config: Config,
    /// Resolved themes for both modes.
    dark_theme: Theme,
    light_theme: Theme,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut store = Store::new(action_tx.clone());
        store.app.dark_mode = config.ui.dark_mode;

        let event_handler = EventHandler::new(action_tx, config.keybindings.clone());

        // Discover the provider. Failure to build one is not fatal; the
        // app runs disconnected and connect attempts report NoProvider.
        let provider: Option<Arc<dyn WalletProvider>> = match RpcProvider::new(&config.network) {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                tracing::warn!("no wallet provider available: {e}");
                None
            }
        };

        let contract = provider.as_ref().and_then(|provider| {
            if config.network.contract_address.is_empty() {
                None
            } else {
                Some(QuestContract::new(
                    Arc::clone(provider),
                    config.network.contract_address.clone(),
                ))
            }
        });

        let session = WalletSession::new(provider);

        let dark_theme = Theme::from_palette(config.theme.active(true));
        let light_theme = Theme::from_palette(config.theme.active(false));

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            session,
            contract,
            config,
            dark_theme,
            light_theme,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // Load the initial pool totals when a contract is configured.
        if self.contract.is_some() {
            self.store.dispatch(Action::RefreshMarket)?;
        }

        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            let theme = if self.store.app.dark_mode {
                self.dark_theme
            } else {
                self.light_theme
            };
            let show_hint_bar = self.config.ui.show_hint_bar;

            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store, &theme, show_hint_bar);
            })?;

            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action).await?;
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await?;
                }
            }

            if self.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action.
    async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::ConnectWallet => {
                self.connect_wallet().await;
            }
            Action::RefreshMarket => {
                self.refresh_market().await;
            }
            Action::SubmitVote => {
                self.submit_vote().await;
            }
            Action::SubmitCreateMarket => {
                self.submit_create_market().await;
            }
            Action::ToggleDarkMode => {
                self.store.reduce(Action::ToggleDarkMode);
                self.persist_dark_mode();
            }
            Action::SelectOutcome(_)
            | Action::MaxAmount
            | Action::CommitInput => {
                self.store.reduce(action);
                self.refresh_reward().await;
            }
            other => {
                self.store.reduce(other);
            }
        }

        Ok(())
    }

    /// Connect the wallet and load the GAS balance.
    async fn connect_wallet(&mut self) {
        if !self.session.has_provider() {
            // No provider call is made; there is nothing to call.
            self.store
                .reduce(Action::ShowNotification(Notification::warning(
                    "No wallet provider configured. Set network.rpc_url and \
                     network.account_address in config.toml",
                )));
            return;
        }
        if self.store.wallet.connecting {
            return;
        }

        self.store.reduce(Action::WalletConnecting(true));
        match self.session.connect().await {
            Ok(account) => {
                tracing::info!(address = %account.address, "wallet connected");
                self.store.reduce(Action::WalletConnected {
                    address: account.address,
                });
                self.load_balance().await;
            }
            Err(e) => {
                self.store.reduce(Action::WalletConnecting(false));
                self.report_error(e);
            }
        }
    }

    async fn load_balance(&mut self) {
        self.store.reduce(Action::BalanceLoading(true));
        match self.session.gas_balance().await {
            Ok(Some(balance)) => self.store.reduce(Action::BalanceLoaded(balance)),
            Ok(None) => {
                self.store.reduce(Action::BalanceLoading(false));
                self.store
                    .reduce(Action::ShowNotification(Notification::info(
                        "No GAS balance found for this account",
                    )));
            }
            Err(e) => {
                self.store.reduce(Action::BalanceLoading(false));
                self.report_error(e);
            }
        }
    }

    /// Reload the pool totals and TVL for the selected market.
    async fn refresh_market(&mut self) {
        let Some((user, market_id)) = self.read_context() else {
            return;
        };
        let Some(contract) = &self.contract else {
            self.store
                .reduce(Action::ShowNotification(Notification::warning(
                    "No contract address configured",
                )));
            return;
        };

        self.store.reduce(Action::AmountsLoading(true));

        let yes = contract.total_yes_points(&user, market_id).await;
        let no = contract.total_no_points(&user, market_id).await;
        let tvl = contract.tvl(&user, market_id).await;

        match (yes, no) {
            (Ok(yes), Ok(no)) => {
                self.store.reduce(Action::PointsLoaded { yes, no });
            }
            (Err(e), _) | (_, Err(e)) => {
                self.store.reduce(Action::AmountsLoading(false));
                self.report_error(e);
                return;
            }
        }
        match tvl {
            Ok(tvl) => self.store.reduce(Action::TvlLoaded(tvl)),
            Err(e) => self.report_error(e),
        }

        self.refresh_reward().await;
    }

    /// Recompute the potential reward for the current selection.
    async fn refresh_reward(&mut self) {
        let Some(outcome) = self.store.vote.outcome else {
            return;
        };
        let amount = self.store.vote.amount;
        if amount == 0 {
            return;
        }
        let Some((user, market_id)) = self.read_context() else {
            return;
        };
        let Some(contract) = &self.contract else {
            return;
        };

        match contract
            .potential_reward(&user, market_id, outcome, amount)
            .await
        {
            Ok(reward) => self.store.reduce(Action::RewardLoaded(reward)),
            Err(e) => tracing::warn!("reward estimate failed: {e}"),
        }
    }

    /// Submit a vote for the current selection.
    async fn submit_vote(&mut self) {
        if self.store.vote.voting {
            return;
        }
        if let Some(reason) = self.store.vote.block_reason(&self.store.wallet) {
            self.store
                .reduce(Action::ShowNotification(Notification::warning(
                    reason.to_string(),
                )));
            return;
        }

        // block_reason covers the wallet and outcome preconditions.
        let Some((user, market_id)) = self.read_context() else {
            return;
        };
        let Some(outcome) = self.store.vote.outcome else {
            return;
        };
        let amount = self.store.vote.amount;
        let Some(contract) = &self.contract else {
            self.store
                .reduce(Action::ShowNotification(Notification::warning(
                    "No contract address configured",
                )));
            return;
        };

        self.store.reduce(Action::VoteSubmitting(true));
        tracing::info!(market_id, %outcome, amount, "submitting vote");

        let result = contract.vote(&user, market_id, outcome, amount).await;
        match result {
            Ok(txid) => {
                self.store.reduce(Action::VoteSubmitted { txid: txid.clone() });
                self.store
                    .reduce(Action::ShowNotification(Notification::success(format!(
                        "Vote submitted: {txid}"
                    ))));
                let _ = self.store.dispatch(Action::RefreshMarket);
                self.load_balance().await;
            }
            Err(e) => {
                self.store.reduce(Action::VoteSubmitting(false));
                self.report_error(e);
            }
        }
    }

    /// Validate the create-market form and submit it.
    async fn submit_create_market(&mut self) {
        let form = self.store.markets.form.clone();
        if form.title.trim().is_empty() || form.description.trim().is_empty() {
            self.store
                .reduce(Action::ShowNotification(Notification::warning(
                    "Title and description are required",
                )));
            return;
        }
        let end_time_ms = match NaiveDateTime::parse_from_str(form.end_time.trim(), "%Y-%m-%d %H:%M")
        {
            Ok(end) => end.and_utc().timestamp_millis(),
            Err(_) => {
                self.store
                    .reduce(Action::ShowNotification(Notification::warning(
                        "End time must be YYYY-MM-DD HH:MM (UTC)",
                    )));
                return;
            }
        };
        if end_time_ms <= chrono::Utc::now().timestamp_millis() {
            self.store
                .reduce(Action::ShowNotification(Notification::warning(
                    "End time must be in the future",
                )));
            return;
        }

        let Some(user) = self.user_address() else {
            self.store
                .reduce(Action::ShowNotification(Notification::warning(
                    "Connect a wallet first",
                )));
            return;
        };
        let Some(contract) = &self.contract else {
            self.store
                .reduce(Action::ShowNotification(Notification::warning(
                    "No contract address configured",
                )));
            return;
        };

        let result = contract
            .create_market(&user, form.title.trim(), form.description.trim(), end_time_ms)
            .await;
        match result {
            Ok(txid) => {
                self.store.reduce(Action::MarketCreated { txid: txid.clone() });
                self.store.reduce(Action::SetView(View::Markets));
                self.store
                    .reduce(Action::ShowNotification(Notification::success(format!(
                        "Market created: {txid}"
                    ))));
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Persist the dark-mode flag back to the config file.
    fn persist_dark_mode(&mut self) {
        self.config.ui.dark_mode = self.store.app.dark_mode;
        if let Err(e) = self.config.save(None) {
            tracing::warn!("could not persist dark mode: {e}");
        }
    }

    /// Address used for contract calls: the connected account, falling
    /// back to the configured one.
    fn user_address(&self) -> Option<String> {
        self.store
            .wallet
            .address
            .clone()
            .or_else(|| self.config.network.account_address.clone())
    }

    fn read_context(&self) -> Option<(String, u32)> {
        let user = self.user_address()?;
        let market_id = self.store.markets.selected_market()?.id;
        Some((user, market_id))
    }

    /// Map an error to the user-facing surface.
    fn report_error(&mut self, error: Error) {
        tracing::error!("{error}");
        match &error {
            Error::NoProvider => {
                self.store
                    .reduce(Action::ShowNotification(Notification::warning(
                        error.to_string(),
                    )));
            }
            Error::ConnectionDenied | Error::ChainMismatch { .. } => {
                self.store
                    .reduce(Action::ShowNotification(Notification::error(
                        error.to_string(),
                    )));
            }
            _ if error.is_recoverable() => {
                self.store
                    .reduce(Action::ShowNotification(Notification::error(
                        error.to_string(),
                    )));
            }
            _ => {
                self.store.reduce(Action::SetError(error.to_string()));
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
