//! Vote panel: outcome choice, stake amount and submission state.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::market::VoteOutcome;
use crate::state::{InputTarget, Store};
use crate::ui::Theme;

/// Vote panel widget.
pub struct VotePanel;

impl VotePanel {
    /// Render the vote panel.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Outcome
                Constraint::Length(3), // Amount
                Constraint::Length(2), // Reward
                Constraint::Min(2),    // Submission state
            ])
            .margin(1)
            .split(area);

        let block = Block::default()
            .title(" Vote ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(block, area);

        Self::render_outcome(frame, rows[0], store, theme);
        Self::render_amount(frame, rows[1], store, theme);
        Self::render_reward(frame, rows[2], store, theme);
        Self::render_state(frame, rows[3], store, theme);
    }

    fn render_outcome(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let outcome_button = |outcome: VoteOutcome, color| {
            let selected = store.vote.outcome == Some(outcome);
            let style = if selected {
                Style::default()
                    .fg(theme.background)
                    .bg(color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            Span::styled(format!(" {outcome} "), style)
        };

        let line = Line::from(vec![
            Span::styled("Outcome  ", Style::default().fg(theme.muted)),
            outcome_button(VoteOutcome::Yes, theme.success),
            Span::raw("  "),
            outcome_button(VoteOutcome::No, theme.error),
            Span::styled("   (y/n)", Style::default().fg(theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_amount(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let editing = store.app.is_editing() && store.app.input_target == Some(InputTarget::Amount);

        let amount = if editing {
            Span::styled(
                format!("{}▏", store.app.input_buffer),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::UNDERLINED),
            )
        } else {
            Span::styled(
                format!("{} GAS", store.vote.amount),
                Style::default().fg(theme.foreground),
            )
        };

        let mut spans = vec![
            Span::styled("Stake    ", Style::default().fg(theme.muted)),
            amount,
            Span::styled("   (i edit, m max)", Style::default().fg(theme.muted)),
        ];
        if store.vote.exceeds_balance(&store.wallet) && store.wallet.connected {
            spans.push(Span::styled(
                "  exceeds balance",
                Style::default().fg(theme.warning),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_reward(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let reward = store
            .vote
            .potential_reward
            .map(|r| super::market_detail::points_label(Some(r), false))
            .unwrap_or_else(|| "-".to_string());
        let line = Line::from(vec![
            Span::styled("Reward   ", Style::default().fg(theme.muted)),
            Span::styled(reward, Style::default().fg(theme.accent)),
            Span::styled(" points (estimated)", Style::default().fg(theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_state(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let mut lines = Vec::new();

        if store.vote.voting {
            lines.push(Line::from(Span::styled(
                "Submitting vote...",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else if let Some(reason) = store.vote.block_reason(&store.wallet) {
            lines.push(Line::from(Span::styled(
                reason.to_string(),
                Style::default().fg(theme.muted),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Press v to vote",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        if let Some(txid) = &store.vote.last_txid {
            lines.push(Line::from(vec![
                Span::styled("Last tx ", Style::default().fg(theme.muted)),
                Span::styled(txid.clone(), Style::default().fg(theme.accent)),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
