//! Footer hint bar with per-view key hints.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{InputMode, Store, View};
use crate::ui::Theme;

/// Footer hint bar widget.
pub struct HintBar;

impl HintBar {
    /// Render the hint bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let hints = hints_for(store.app.current_view, store.app.input_mode);

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, what) in hints {
            spans.push(Span::styled(
                format!(" {key} "),
                Style::default().fg(theme.accent),
            ));
            spans.push(Span::styled(
                format!("{what}  "),
                Style::default().fg(theme.muted),
            ));
        }

        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(paragraph, area);
    }
}

fn hints_for(view: View, mode: InputMode) -> Vec<(&'static str, &'static str)> {
    if mode == InputMode::Editing {
        return vec![("Enter", "commit"), ("Esc", "cancel")];
    }
    match view {
        View::Markets => vec![
            ("Enter", "open"),
            ("a", "new market"),
            ("w", "wallet"),
            ("q", "quit"),
        ],
        View::MarketDetail => vec![
            ("y/n", "outcome"),
            ("i", "amount"),
            ("m", "max"),
            ("v", "vote"),
            ("Esc", "back"),
        ],
        View::CreateMarket => vec![
            ("Tab", "field"),
            ("Enter", "edit"),
            ("s", "submit"),
            ("Esc", "back"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_hints_override_the_view() {
        let hints = hints_for(View::MarketDetail, InputMode::Editing);
        assert_eq!(hints, vec![("Enter", "commit"), ("Esc", "cancel")]);
    }

    #[test]
    fn detail_view_lists_voting_keys() {
        let hints = hints_for(View::MarketDetail, InputMode::Normal);
        assert!(hints.iter().any(|(k, _)| *k == "v"));
    }
}
