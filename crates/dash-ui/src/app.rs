//! Application state and TUI event loop for the Bee Cycle dashboard.
//!
//! [`App`] owns the theme, the dashboard session, and the snapshot currently
//! on screen. The loop is fully synchronous: one key press mutates the
//! session and triggers exactly one snapshot recomputation before the next
//! draw.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use dash_core::filters::DateSelection;
use dash_runtime::data::analysis::DashboardSnapshot;
use dash_runtime::session::{DashboardSession, Page};

use crate::chart_view;
use crate::components::header::Header;
use crate::components::metrics;
use crate::forecast_view;
use crate::themes::Theme;

// ── BreakdownTab ──────────────────────────────────────────────────────────────

/// Which breakdown chart the detail panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownTab {
    /// Rupiah totals per product category.
    Category,
    /// Rupiah totals per region.
    Region,
}

impl BreakdownTab {
    fn toggled(self) -> Self {
        match self {
            Self::Category => Self::Region,
            Self::Region => Self::Category,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    session: DashboardSession,
    breakdown: BreakdownTab,
    snapshot: DashboardSnapshot,
    should_quit: bool,
}

impl App {
    /// Construct the application and compute the initial snapshot.
    pub fn new(theme_name: &str, session: DashboardSession) -> Self {
        let snapshot = session.snapshot();
        Self {
            theme: Theme::from_name(theme_name),
            session,
            breakdown: BreakdownTab::Category,
            snapshot,
            should_quit: false,
        }
    }

    /// The snapshot currently on screen.
    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    /// The underlying session (used by tests to inspect filter state).
    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    /// Which breakdown chart is active.
    pub fn breakdown(&self) -> BreakdownTab {
        self.breakdown
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits with `q` or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input handling ────────────────────────────────────────────────────

    /// Apply one key press. Filter keys only act on the overview page, the
    /// same way the upstream dashboard only shows its filter widgets there.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                let next = match self.session.page() {
                    Page::Overview => Page::Forecast,
                    Page::Forecast => Page::Overview,
                };
                self.session.set_page(next);
                return;
            }
            _ => {}
        }

        if self.session.page() != Page::Overview {
            return;
        }

        match key.code {
            KeyCode::Char('t') => {
                self.breakdown = self.breakdown.toggled();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if let Some(label) = self.session.known_regions().get(index).cloned() {
                    self.session.toggle_region(&label);
                    self.refresh();
                }
            }
            KeyCode::Char('a') => {
                self.session.select_all_regions();
                self.refresh();
            }
            KeyCode::Char('x') => {
                self.session.clear_regions();
                self.refresh();
            }
            KeyCode::Char('r') => {
                self.session.reset_filters();
                self.refresh();
            }
            KeyCode::Left => {
                self.session.shift_start_month(-1);
                self.refresh();
            }
            KeyCode::Right => {
                self.session.shift_start_month(1);
                self.refresh();
            }
            KeyCode::Down => {
                self.session.shift_end_month(-1);
                self.refresh();
            }
            KeyCode::Up => {
                self.session.shift_end_month(1);
                self.refresh();
            }
            _ => {}
        }
    }

    /// Recompute the on-screen snapshot after a filter mutation.
    fn refresh(&mut self) {
        self.snapshot = self.session.snapshot();
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Render the active page into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        let summary_line = self.filter_summary();
        let header = Header::new(self.session.page(), &summary_line, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), rows[0]);

        match self.session.page() {
            Page::Overview => self.render_overview(frame, rows[1]),
            Page::Forecast => forecast_view::render_forecast(frame, rows[1], &self.theme),
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(self.key_hints(), self.theme.dim))),
            rows[2],
        );
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Min(6),
            ])
            .split(area);

        metrics::render_metric_row(frame, rows[0], &self.snapshot.summary, &self.theme);
        frame.render_widget(Paragraph::new(self.region_selector_line()), rows[1]);

        if self.snapshot.is_empty() {
            chart_view::render_no_data(frame, rows[2].union(rows[3]), &self.theme);
            return;
        }

        chart_view::render_monthly_trend(frame, rows[2], &self.snapshot.monthly, &self.theme);

        match self.breakdown {
            BreakdownTab::Category => chart_view::render_breakdown(
                frame,
                rows[3],
                "Sales by Product Category",
                &self.snapshot.by_category,
                &self.theme,
            ),
            BreakdownTab::Region => chart_view::render_breakdown(
                frame,
                rows[3],
                "Sales by Region",
                &self.snapshot.by_region,
                &self.theme,
            ),
        }
    }

    /// One line per known region: `[1] Europe ✓  [2] Pacific`, numbered the
    /// way the toggle keys address them.
    fn region_selector_line(&self) -> Line<'_> {
        let mut spans: Vec<Span> = Vec::new();
        for (i, region) in self.session.known_regions().iter().enumerate().take(9) {
            let selected = self.session.is_region_selected(region);
            let style = if selected {
                self.theme.value
            } else {
                self.theme.dim
            };
            spans.push(Span::styled(format!("[{}] ", i + 1), self.theme.label));
            spans.push(Span::styled(
                format!("{}{}  ", region, if selected { " ✓" } else { "" }),
                style,
            ));
        }
        Line::from(spans)
    }

    /// Describe the current filter for the header line.
    fn filter_summary(&self) -> String {
        let dates = match self.session.filter().dates {
            DateSelection::Range { start, end } => format!("{} .. {}", start, end),
            DateSelection::Single(date) => {
                format!("{} (range incomplete, dates unfiltered)", date)
            }
        };
        let selected = self.session.filter().regions.len();
        let known = self.session.known_regions().len();
        format!("{} | {}/{} regions | {} rows", dates, selected, known, self.snapshot.metadata.rows_selected)
    }

    fn key_hints(&self) -> &'static str {
        match self.session.page() {
            Page::Overview => {
                "q quit | Tab page | t breakdown | 1-9 region | a all | x none | ←/→ start ±1mo | ↓/↑ end ±1mo | r reset"
            }
            Page::Forecast => "q quit | Tab back to overview",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
