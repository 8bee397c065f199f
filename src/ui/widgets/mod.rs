//! TUI widgets.

mod create_market;
mod help;
mod hint_bar;
mod market_detail;
mod market_list;
mod notifications;
mod status_bar;
mod vote_panel;

pub use create_market::CreateMarketPanel;
pub use help::HelpPanel;
pub use hint_bar::HintBar;
pub use market_detail::MarketDetail;
pub use market_list::MarketList;
pub use notifications::{render_error, render_notification};
pub use status_bar::StatusBar;
pub use vote_panel::VotePanel;
