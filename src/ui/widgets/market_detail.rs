//! Market detail view: question, pool totals and the vote panel.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::VotePanel;
use crate::state::Store;
use crate::ui::Theme;

/// Market detail widget.
pub struct MarketDetail;

impl MarketDetail {
    /// Render the market detail view.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let Some(market) = store.markets.selected_market() else {
            let empty = Paragraph::new("No market selected").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            );
            frame.render_widget(empty, area);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),    // Question and description
                Constraint::Length(7), // Pool totals
            ])
            .split(columns[0]);

        let loading = store.markets.loading_amounts;

        let mut info = vec![
            Line::from(Span::styled(
                market.title.clone(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                market.description.clone(),
                Style::default().fg(theme.muted),
            )),
            Line::from(""),
        ];
        if let (Some(start), Some(end)) = (market.start_time, market.end_time) {
            info.push(Line::from(vec![
                Span::styled("Voting window: ", Style::default().fg(theme.muted)),
                Span::raw(format!(
                    "{} to {} UTC",
                    start.format("%Y-%m-%d %H:%M"),
                    end.format("%Y-%m-%d %H:%M")
                )),
            ]));
        }
        info.push(Line::from(vec![
            Span::styled("Status: ", Style::default().fg(theme.muted)),
            Span::raw(market.status.to_string()),
        ]));

        let detail = Paragraph::new(info)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" Market #{} ", market.id))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            );
        frame.render_widget(detail, left[0]);

        Self::render_pools(frame, left[1], store, theme, loading);
        VotePanel::render(frame, columns[1], store, theme);
    }

    fn render_pools(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme, loading: bool) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // TVL
                Constraint::Length(1), // Yes total
                Constraint::Length(1), // No total
                Constraint::Length(1), // Share gauge
            ])
            .margin(1)
            .split(area);

        let block = Block::default()
            .title(" Pools ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(block, area);

        let tvl = Paragraph::new(Line::from(vec![
            Span::styled("TVL         ", Style::default().fg(theme.muted)),
            Span::raw(points_label(store.markets.tvl, loading)),
        ]));
        frame.render_widget(tvl, rows[0]);

        let yes = Paragraph::new(Line::from(vec![
            Span::styled("Yes points  ", Style::default().fg(theme.muted)),
            Span::styled(
                points_label(store.markets.yes_points, loading),
                Style::default().fg(theme.success),
            ),
        ]));
        frame.render_widget(yes, rows[1]);

        let no = Paragraph::new(Line::from(vec![
            Span::styled("No points   ", Style::default().fg(theme.muted)),
            Span::styled(
                points_label(store.markets.no_points, loading),
                Style::default().fg(theme.error),
            ),
        ]));
        frame.render_widget(no, rows[2]);

        if let Some(share) = store.markets.yes_share() {
            let gauge = Gauge::default()
                .ratio((share / 100.0).clamp(0.0, 1.0))
                .label(format!("Yes {share:.1}%"))
                .gauge_style(Style::default().fg(theme.success).bg(theme.error));
            frame.render_widget(gauge, rows[3]);
        }
    }
}

/// Label for a pool total: grouped digits, or a loading placeholder.
pub fn points_label(points: Option<i128>, loading: bool) -> String {
    if loading {
        return "Loading...".to_string();
    }
    match points {
        Some(value) => group_thousands(value),
        None => "-".to_string(),
    }
}

/// Group an integer's digits with commas.
fn group_thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loaded_totals_render_verbatim() {
        assert_eq!(points_label(Some(343638), false), "343,638");
        assert_eq!(points_label(Some(368354), false), "368,354");
    }

    #[test]
    fn loading_totals_render_a_placeholder() {
        assert_eq!(points_label(Some(343638), true), "Loading...");
        assert_eq!(points_label(None, true), "Loading...");
        assert_eq!(points_label(None, false), "-");
    }

    #[test]
    fn grouping_handles_edges() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567890), "1,234,567,890");
        assert_eq!(group_thousands(-1234), "-1,234");
    }
}
