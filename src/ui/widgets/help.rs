//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::ui::Theme;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let section = |title: &str| {
            Line::from(Span::styled(
                title.to_string(),
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ))
        };
        let entry = |key: &str, what: &str| {
            Line::from(vec![
                Span::styled(format!("  {key:<7}"), Style::default().fg(theme.accent)),
                Span::raw(what.to_string()),
            ])
        };

        let help_text = vec![
            section("Navigation"),
            Line::from(""),
            entry("j/↓", "Move down"),
            entry("k/↑", "Move up"),
            entry("Enter", "Open market / edit field"),
            entry("Esc", "Back / cancel input"),
            Line::from(""),
            section("Wallet"),
            Line::from(""),
            entry("w", "Connect wallet"),
            entry("r", "Refresh market data"),
            Line::from(""),
            section("Voting"),
            Line::from(""),
            entry("y", "Choose Yes"),
            entry("n", "Choose No"),
            entry("i", "Edit stake amount"),
            entry("m", "Stake whole balance"),
            entry("v", "Submit vote"),
            Line::from(""),
            section("Markets"),
            Line::from(""),
            entry("a", "New market form"),
            entry("Tab", "Next form field"),
            entry("s", "Submit new market"),
            Line::from(""),
            section("General"),
            Line::from(""),
            entry("d", "Toggle dark mode"),
            entry("?", "Toggle help"),
            entry("q", "Quit"),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.warning)),
            )
            .style(Style::default().fg(theme.foreground));

        frame.render_widget(help, popup_area);
    }
}
