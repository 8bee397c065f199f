//! Market-related state.

use super::InputTarget;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Market status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarketStatus {
    #[default]
    Open,
    Closed,
    Resolved,
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Closed => write!(f, "Closed"),
            Self::Resolved => write!(f, "Resolved"),
        }
    }
}

/// A binary Yes/No prediction market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    /// On-chain market id.
    pub id: u32,
    /// Market question/title.
    pub title: String,
    /// Resolution criteria.
    pub description: String,
    /// Market status.
    pub status: MarketStatus,
    /// Voting window start.
    pub start_time: Option<DateTime<Utc>>,
    /// Voting window end.
    pub end_time: Option<DateTime<Utc>>,
}

/// Input form for opening a new market.
#[derive(Debug, Clone, Default)]
pub struct CreateMarketForm {
    pub title: String,
    pub description: String,
    /// End time as entered, `YYYY-MM-DD HH:MM` (UTC).
    pub end_time: String,
    /// Focused field index.
    pub focus: usize,
}

impl CreateMarketForm {
    pub const FIELDS: usize = 3;

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELDS;
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Self::FIELDS - 1) % Self::FIELDS;
    }

    pub fn focused_value(&self) -> &str {
        match self.focus {
            0 => &self.title,
            1 => &self.description,
            _ => &self.end_time,
        }
    }

    pub fn focused_target(&self) -> InputTarget {
        match self.focus {
            0 => InputTarget::MarketTitle,
            1 => InputTarget::MarketDescription,
            _ => InputTarget::MarketEndTime,
        }
    }
}

/// State for market-related data.
#[derive(Debug)]
pub struct MarketState {
    /// Known markets.
    pub markets: Vec<Market>,
    /// Currently selected market index.
    pub selected_index: Option<usize>,
    /// Yes-side point total for the open market.
    pub yes_points: Option<i128>,
    /// No-side point total for the open market.
    pub no_points: Option<i128>,
    /// Total value locked in the open market.
    pub tvl: Option<i128>,
    /// Whether point totals are currently loading.
    pub loading_amounts: bool,
    /// Last update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
    /// Create-market form.
    pub form: CreateMarketForm,
}

impl Default for MarketState {
    fn default() -> Self {
        Self {
            markets: vec![seed_market()],
            selected_index: Some(0),
            yes_points: None,
            no_points: None,
            tvl: None,
            loading_amounts: false,
            last_updated: None,
            form: CreateMarketForm::default(),
        }
    }
}

impl MarketState {
    /// Get the currently selected market.
    pub fn selected_market(&self) -> Option<&Market> {
        self.selected_index.and_then(|i| self.markets.get(i))
    }

    /// Yes-side share of the pool in percent, when both totals are known
    /// and at least one side holds points.
    pub fn yes_share(&self) -> Option<f64> {
        let yes = self.yes_points?;
        let no = self.no_points?;
        let total = yes + no;
        if total <= 0 {
            return None;
        }
        Some(yes as f64 / total as f64 * 100.0)
    }
}

/// The market the contract was seeded with.
fn seed_market() -> Market {
    Market {
        id: 1,
        title: "Ethereum: Will it surpass $5,000 by December 31, 2025?".to_string(),
        description: "Resolves Yes if the highest price (High) on the Binance ETH/USDT \
                      1-minute candlestick chart reaches $5,000 or above by 11:59 PM ET \
                      on Wednesday, December 31, 2025. Otherwise resolves No. Only the \
                      Binance ETH/USDT pair is considered."
            .to_string(),
        status: MarketStatus::Open,
        start_time: Utc.with_ymd_and_hms(2025, 11, 15, 0, 0, 0).single(),
        end_time: Utc.with_ymd_and_hms(2025, 11, 30, 0, 0, 0).single(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn yes_share_needs_both_totals() {
        let mut state = MarketState::default();
        assert_eq!(state.yes_share(), None);

        state.yes_points = Some(343638);
        assert_eq!(state.yes_share(), None);

        state.no_points = Some(368354);
        let share = state.yes_share().unwrap();
        assert!((share - 48.26).abs() < 0.01);
    }

    #[test]
    fn empty_pools_have_no_share() {
        let mut state = MarketState::default();
        state.yes_points = Some(0);
        state.no_points = Some(0);
        assert_eq!(state.yes_share(), None);
    }

    #[test]
    fn form_focus_wraps() {
        let mut form = CreateMarketForm::default();
        assert_eq!(form.focused_target(), InputTarget::MarketTitle);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused_target(), InputTarget::MarketEndTime);
        form.focus_next();
        assert_eq!(form.focused_target(), InputTarget::MarketTitle);
        form.focus_prev();
        assert_eq!(form.focused_target(), InputTarget::MarketEndTime);
    }
}
