//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::Store;
use crate::ui::Theme;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let wallet_status = if store.wallet.connected {
            let label = store
                .wallet
                .short_address()
                .unwrap_or_else(|| "connected".to_string());
            Span::styled(
                format!("● {label}"),
                Style::default().fg(theme.success),
            )
        } else if store.wallet.connecting {
            Span::styled("◌ Connecting...", Style::default().fg(theme.warning))
        } else {
            Span::styled("○ No wallet", Style::default().fg(theme.error))
        };

        let balance = if store.wallet.connected {
            Span::styled(
                format!(" {} GAS ", store.wallet.gas_balance.round_dp(4)),
                Style::default().fg(theme.accent),
            )
        } else {
            Span::raw("")
        };

        let loading = if store.markets.loading_amounts || store.wallet.loading_balance {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(theme.muted));

        let left_content = vec![
            Span::styled(
                " NeoQuest ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            wallet_status,
            Span::raw(" | "),
            balance,
            loading,
        ];

        let status_line = Line::from(left_content);

        // Calculate padding for right-aligned help hint. Cell counts,
        // not byte counts; the state glyphs are multi-byte.
        let left_len: usize = status_line.spans.iter().map(span_width).sum();
        let right_len = span_width(&help_hint);
        let padding = area
            .width
            .saturating_sub(left_len as u16 + right_len as u16);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding as usize)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(theme.selection));

        frame.render_widget(paragraph, area);
    }
}

fn span_width(span: &Span) -> usize {
    span.content.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn span_width_counts_cells_not_bytes() {
        let span = Span::raw("● Connected");
        assert_eq!(span.content.len(), 13);
        assert_eq!(span_width(&span), 11);
    }
}
