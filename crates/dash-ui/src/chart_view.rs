//! Chart widgets for the overview page.
//!
//! Renders the monthly sales trend and the category/region breakdowns as
//! bar charts, plus the placeholder shown when the current filter selects
//! no rows.

use std::collections::HashMap;

use dash_core::dates::MonthKey;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Bar column width for the monthly trend ("2024-01" labels).
const MONTH_BAR_WIDTH: u16 = 9;

/// Bar column width for breakdown charts (labels are free-form).
const LABEL_BAR_WIDTH: u16 = 15;

// ── Monthly trend ─────────────────────────────────────────────────────────────

/// Render the Rupiah-per-month trend as a bar chart.
///
/// `monthly` arrives chronologically sorted from the aggregation stage and
/// is rendered in that order.
pub fn render_monthly_trend(
    frame: &mut Frame,
    area: Rect,
    monthly: &[(MonthKey, f64)],
    theme: &Theme,
) {
    let bars: Vec<Bar> = monthly
        .iter()
        .enumerate()
        .map(|(i, (month, total))| {
            Bar::default()
                .value(total.round() as u64)
                .text_value(compact_amount(*total))
                .label(Line::from(month.to_string()))
                .style(theme.series_style(i))
                .value_style(theme.chart_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(" Sales per Month "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(MONTH_BAR_WIDTH)
        .bar_gap(1);

    frame.render_widget(chart, area);
}

// ── Breakdown charts ──────────────────────────────────────────────────────────

/// Render one breakdown mapping (category→total or region→total) as a bar
/// chart, largest group first.
pub fn render_breakdown(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    data: &HashMap<String, f64>,
    theme: &Theme,
) {
    // The mapping is unordered by contract; sort for display, ties broken
    // by label so the chart is stable between recomputations.
    let mut entries: Vec<(&str, f64)> = data.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(b.0)));

    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, total))| {
            Bar::default()
                .value(total.round() as u64)
                .text_value(compact_amount(*total))
                .label(Line::from(truncate_label(label, LABEL_BAR_WIDTH as usize)))
                .style(theme.series_style(i))
                .value_style(theme.chart_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(format!(" {} ", title)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(LABEL_BAR_WIDTH)
        .bar_gap(1);

    frame.render_widget(chart, area);
}

/// Render a "no data" placeholder when the current filter selects no rows.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No sales match the current filter", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Widen the date range or select more regions.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'r' to reset filters", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sales Overview "),
        ),
        area,
    );
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Compact display form for Rupiah bar values: `"950"`, `"1.5K"`, `"11.3M"`,
/// `"2.1B"`. Bar columns are too narrow for full thousands-grouped amounts.
fn compact_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{}", value.round() as i64)
    }
}

/// Truncate a label to `max_width` display columns, appending `…` when cut.
fn truncate_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }
    let mut out = String::new();
    for c in label.chars() {
        if out.width() + 2 > max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
