//! The summary metric cards shown at the top of the overview page.

use dash_core::formatting::{format_count, format_rupiah};
use dash_core::models::SalesSummary;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Render the three metric cards (Total Sales, Orders, Units Sold) as a
/// row of equal-width bordered boxes.
pub fn render_metric_row(frame: &mut Frame, area: Rect, summary: &SalesSummary, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    render_metric_card(
        frame,
        columns[0],
        "Total Sales",
        &format_rupiah(summary.total_sales),
        theme,
    );
    render_metric_card(
        frame,
        columns[1],
        "Orders",
        &format_count(summary.total_orders as u64),
        theme,
    );
    render_metric_card(
        frame,
        columns[2],
        "Units Sold",
        &format_count(summary.total_units),
        theme,
    );
}

/// Render a single bordered card with a dim label and a bold value.
fn render_metric_card(frame: &mut Frame, area: Rect, label: &str, value: &str, theme: &Theme) {
    let body = vec![
        Line::from(Span::styled(label.to_string(), theme.metric_label)),
        Line::from(Span::styled(value.to_string(), theme.metric_value)),
    ];
    let card = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.metric_border),
    );
    frame.render_widget(card, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn summary() -> SalesSummary {
        SalesSummary {
            total_sales: 11_250_000.0,
            total_orders: 42,
            total_units: 137,
        }
    }

    fn render_to_text(summary: &SalesSummary) -> String {
        let backend = TestBackend::new(90, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_metric_row(frame, area, summary, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_metric_row_shows_all_three_cards() {
        let text = render_to_text(&summary());
        assert!(text.contains("Total Sales"), "rendered: {text}");
        assert!(text.contains("Orders"));
        assert!(text.contains("Units Sold"));
    }

    #[test]
    fn test_metric_row_formats_values() {
        let text = render_to_text(&summary());
        assert!(text.contains("Rp 11,250,000.00"), "rendered: {text}");
        assert!(text.contains("42"));
        assert!(text.contains("137"));
    }

    #[test]
    fn test_metric_row_zero_summary_does_not_panic() {
        let text = render_to_text(&SalesSummary::default());
        assert!(text.contains("Rp 0.00"));
    }
}
