//! Market list widget.

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::state::{MarketStatus, Store};
use crate::ui::Theme;

/// Market list widget.
pub struct MarketList;

impl MarketList {
    /// Render the market list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let header_cells = ["Id", "Market", "Status", "Ends"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = store.markets.markets.iter().enumerate().map(|(i, market)| {
            let selected = store.markets.selected_index == Some(i);
            let style = if selected {
                Style::default()
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };

            let status_style = match market.status {
                MarketStatus::Open => Style::default().fg(theme.success),
                MarketStatus::Closed => Style::default().fg(theme.error),
                MarketStatus::Resolved => Style::default().fg(theme.accent),
            };

            let cells = vec![
                Cell::from(market.id.to_string()),
                Cell::from(truncate_string(&market.title, 60)),
                Cell::from(market.status.to_string()).style(status_style),
                Cell::from(format_end_time(market.end_time)),
            ];

            Row::new(cells).style(style).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Percentage(60),
                Constraint::Length(10),
                Constraint::Length(18),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(" Markets ({}) ", store.markets.markets.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(store.markets.selected_index);

        frame.render_stateful_widget(table, area, &mut state);
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

fn format_end_time(end_time: Option<DateTime<Utc>>) -> String {
    end_time
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn long_titles_are_truncated_with_an_ellipsis() {
        let title = "x".repeat(80);
        let shown = truncate_string(&title, 60);
        assert_eq!(shown.len(), 60);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn missing_end_times_render_as_a_dash() {
        assert_eq!(format_end_time(None), "-");
        let t = Utc.with_ymd_and_hms(2025, 11, 30, 0, 0, 0).single();
        assert_eq!(format_end_time(t), "2025-11-30 00:00");
    }
}
