//! Synchronous dashboard session state.
//!
//! One [`DashboardSession`] per process: it owns the memoized
//! [`DatasetStore`], the current page, and the current [`FilterParams`].
//! Every filter mutation is followed by one from-scratch snapshot
//! recomputation; there is no background refresh and no incremental
//! maintenance, matching the one-interaction-one-recomputation cycle of the
//! upstream dashboard.

use chrono::{Months, NaiveDate};

use dash_core::error::Result;
use dash_core::filters::{DateSelection, FilterParams};
use dash_data::analysis::{build_snapshot, DashboardSnapshot};

use crate::dataset_store::DatasetStore;

// ── Page ──────────────────────────────────────────────────────────────────────

/// Which page of the dashboard is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// The main overview: metrics, monthly trend, breakdowns.
    Overview,
    /// The forecast page. Referenced in navigation but intentionally a
    /// placeholder with no behaviour until its contract is specified.
    Forecast,
}

// ── DashboardSession ──────────────────────────────────────────────────────────

/// Interaction state between the presentation layer and the data core.
pub struct DashboardSession {
    store: DatasetStore,
    page: Page,
    filter: FilterParams,
    /// All region labels discovered at load time, sorted.
    known_regions: Vec<String>,
    /// Min/max order date of the full table; `None` for an empty dataset.
    dataset_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl DashboardSession {
    /// Load the dataset and derive the initial filter state.
    ///
    /// Defaults mirror the upstream widgets: the date range spans the whole
    /// dataset and every discovered region is selected. A lone `from` or
    /// `to` override produces the single-endpoint state in which the date
    /// predicate is disabled (see [`DateSelection::Single`]). An explicit
    /// region list replaces the select-all default verbatim; selecting no
    /// known region legitimately yields an empty dashboard.
    pub fn open(
        mut store: DatasetStore,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        regions: Option<Vec<String>>,
    ) -> Result<Self> {
        store.load()?;

        let known_regions = store.regions();
        let dataset_bounds = store.date_bounds();

        let fallback_day = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let default_bounds = dataset_bounds.unwrap_or((fallback_day, fallback_day));
        let dates = DateSelection::from_bounds(from, to, default_bounds);

        let selected_regions = regions.unwrap_or_else(|| known_regions.clone());
        let filter = FilterParams::new(dates, selected_regions);

        tracing::debug!(
            regions = known_regions.len(),
            ?dataset_bounds,
            "dashboard session opened"
        );

        Ok(Self {
            store,
            page: Page::Overview,
            filter,
            known_regions,
            dataset_bounds,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn filter(&self) -> &FilterParams {
        &self.filter
    }

    /// All region labels discovered at load time, sorted.
    pub fn known_regions(&self) -> &[String] {
        &self.known_regions
    }

    /// `true` when `label` is currently part of the region selection.
    pub fn is_region_selected(&self, label: &str) -> bool {
        self.filter.regions.contains(label)
    }

    /// Min/max order date of the full table.
    pub fn dataset_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.dataset_bounds
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    /// Toggle one region in or out of the selection.
    pub fn toggle_region(&mut self, label: &str) {
        if !self.filter.regions.remove(label) {
            self.filter.regions.insert(label.to_string());
        }
    }

    /// Select every known region.
    pub fn select_all_regions(&mut self) {
        self.filter.regions = self.known_regions.iter().cloned().collect();
    }

    /// Deselect every region. The next snapshot is legitimately empty.
    pub fn clear_regions(&mut self) {
        self.filter.regions.clear();
    }

    /// Move the range start by `months` calendar months, clamped to the
    /// dataset bounds. A no-op in the single-endpoint state, where there is
    /// no active date range to adjust.
    pub fn shift_start_month(&mut self, months: i32) {
        if let DateSelection::Range { start, end } = self.filter.dates {
            let start = self.clamp_to_bounds(shift_months(start, months));
            self.filter.dates = DateSelection::Range { start, end };
        }
    }

    /// Move the range end by `months` calendar months, clamped to the
    /// dataset bounds. A no-op in the single-endpoint state.
    pub fn shift_end_month(&mut self, months: i32) {
        if let DateSelection::Range { start, end } = self.filter.dates {
            let end = self.clamp_to_bounds(shift_months(end, months));
            self.filter.dates = DateSelection::Range { start, end };
        }
    }

    /// Restore the defaults: full date range, all regions selected.
    pub fn reset_filters(&mut self) {
        if let Some((min, max)) = self.dataset_bounds {
            self.filter.dates = DateSelection::Range { start: min, end: max };
        }
        self.select_all_regions();
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    /// Recompute the dashboard aggregates for the current filter.
    ///
    /// Always computed from scratch against the immutable loaded table.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let records = self.store.records().unwrap_or_default();
        build_snapshot(records, &self.filter)
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn clamp_to_bounds(&self, date: NaiveDate) -> NaiveDate {
        match self.dataset_bounds {
            Some((min, max)) => date.clamp(min, max),
            None => date,
        }
    }
}

/// Add or subtract whole calendar months from a date.
fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
