use crate::themes::Theme;
use dash_runtime::session::Page;
use ratatui::text::{Line, Span};

/// Decorative accent string placed either side of the dashboard title.
pub const ACCENTS: &str = "▚ ▞ ▚";

/// Dashboard header rendering five lines:
///
/// 1. Application title with accent decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Page tabs, the active page highlighted.
/// 4. The active-filter summary supplied by the caller.
/// 5. An empty line.
pub struct Header<'a> {
    /// Currently active page.
    pub page: Page,
    /// One-line description of the current date/region filter.
    pub filter_summary: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(page: Page, filter_summary: &'a str, theme: &'a Theme) -> Self {
        Self {
            page,
            filter_summary,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly five lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(ACCENTS, self.theme.header_accent),
                Span::styled(" BEE CYCLE SALES DASHBOARD ", self.theme.header),
                Span::styled(ACCENTS, self.theme.header_accent),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Page tab line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled("Overview", self.theme.tab_style(self.page == Page::Overview)),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    "Sales Forecast",
                    self.theme.tab_style(self.page == Page::Forecast),
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            // Active-filter summary line.
            Line::from(Span::styled(self.filter_summary, self.theme.dim)),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
