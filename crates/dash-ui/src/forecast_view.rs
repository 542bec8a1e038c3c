//! The "Sales Forecast" page.
//!
//! Referenced in navigation but intentionally unimplemented: the page has
//! no contract yet, so it renders a placeholder and nothing else.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Render the forecast placeholder.
pub fn render_forecast(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Sales Forecast", theme.bold)),
        Line::from(""),
        Line::from(Span::styled(
            "This page is not available yet.",
            theme.warning,
        )),
        Line::from(Span::styled(
            "Forecasting has no defined behaviour; check back in a future release.",
            theme.dim,
        )),
        Line::from(""),
        Line::from(Span::styled("Press Tab to return to the overview", theme.dim)),
    ];

    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sales Forecast "),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
