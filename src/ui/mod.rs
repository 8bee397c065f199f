//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod theme;
mod widgets;

pub use layout::Layout;
pub use theme::Theme;
pub use widgets::{
    CreateMarketPanel, HelpPanel, HintBar, MarketDetail, MarketList, StatusBar, VotePanel,
};

use crate::state::{Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store, theme: &Theme, show_hint_bar: bool) {
        let layout = Layout::new(frame.area(), show_hint_bar);

        StatusBar::render(frame, layout.status_area, store, theme);

        match store.app.current_view {
            View::Markets => MarketList::render(frame, layout.main_area, store, theme),
            View::MarketDetail => MarketDetail::render(frame, layout.main_area, store, theme),
            View::CreateMarket => CreateMarketPanel::render(frame, layout.main_area, store, theme),
        }

        if show_hint_bar {
            HintBar::render(frame, layout.hint_area, store, theme);
        }

        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), theme);
        }

        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification, theme);
        }

        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.notification_area, error, theme);
        }
    }
}
