//! Create-market form widget.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{InputTarget, Store};
use crate::ui::Theme;

/// Create-market form widget.
pub struct CreateMarketPanel;

impl CreateMarketPanel {
    /// Render the create-market form.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(2), // Description
                Constraint::Length(2), // End time
                Constraint::Min(1),    // Hint
            ])
            .margin(1)
            .split(area);

        let block = Block::default()
            .title(" New market ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(block, area);

        let form = &store.markets.form;
        let fields = [
            ("Title", InputTarget::MarketTitle, form.title.as_str(), 0),
            (
                "Description",
                InputTarget::MarketDescription,
                form.description.as_str(),
                1,
            ),
            (
                "Ends (YYYY-MM-DD HH:MM UTC)",
                InputTarget::MarketEndTime,
                form.end_time.as_str(),
                2,
            ),
        ];

        for (label, target, value, index) in fields {
            let focused = form.focus == index;
            let editing = store.app.is_editing() && store.app.input_target == Some(target);

            let label_style = if focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };

            let value_span = if editing {
                Span::styled(
                    format!("{}▏", store.app.input_buffer),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::UNDERLINED),
                )
            } else if value.is_empty() {
                Span::styled("(empty)", Style::default().fg(theme.muted))
            } else {
                Span::styled(value.to_string(), Style::default().fg(theme.foreground))
            };

            let line = Line::from(vec![
                Span::styled(format!("{label:<30}"), label_style),
                value_span,
            ]);
            frame.render_widget(Paragraph::new(line), rows[index]);
        }

        let hint = Paragraph::new(Line::from(Span::styled(
            "Tab next field, Enter edit, s submit, Esc back",
            Style::default().fg(theme.muted),
        )));
        frame.render_widget(hint, rows[3]);
    }
}
