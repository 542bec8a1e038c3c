//! The filter stage: date-range and region-set predicates over the loaded
//! sales table.
//!
//! Filtering never mutates the loaded table; it returns a fresh subset that
//! downstream aggregation consumes. Both predicates are conjunctive and
//! independent, so the order of application cannot change the result.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::dates::parse_order_date;
use crate::error::{DashboardError, Result};
use crate::models::SalesRecord;

// ── DateSelection ─────────────────────────────────────────────────────────────

/// The state of the date-range picker.
///
/// `Single` models the picker with only one endpoint chosen. In that state
/// the date predicate is skipped entirely and every date passes; the region
/// predicate alone decides. This asymmetry is inherited from the upstream
/// product, where an in-progress range selection leaves the data unfiltered
/// by date; it is intentionally preserved rather than redefined as
/// `start == end == that date`, pending product clarification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    /// Both endpoints chosen; the bound is inclusive on each side.
    /// `start > end` legitimately matches nothing; it is not an error.
    Range { start: NaiveDate, end: NaiveDate },
    /// One endpoint chosen; the date predicate is disabled.
    Single(NaiveDate),
}

impl DateSelection {
    /// Build a selection from optional endpoints.
    ///
    /// * both present → `Range`
    /// * exactly one present → `Single` (date predicate disabled)
    /// * neither present → `Range` spanning `default_bounds`
    pub fn from_bounds(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        default_bounds: (NaiveDate, NaiveDate),
    ) -> Self {
        match (from, to) {
            (Some(start), Some(end)) => Self::Range { start, end },
            (Some(point), None) | (None, Some(point)) => Self::Single(point),
            (None, None) => Self::Range {
                start: default_bounds.0,
                end: default_bounds.1,
            },
        }
    }

    /// `true` when `date` passes the date predicate.
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::Range { start, end } => *start <= date && date <= *end,
            Self::Single(_) => true,
        }
    }
}

// ── FilterParams ──────────────────────────────────────────────────────────────

/// One interaction's worth of filter state: a date selection plus the set of
/// region labels to keep. An empty region set means "nothing selected" and
/// matches zero rows, not "no filter applied".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    pub dates: DateSelection,
    pub regions: BTreeSet<String>,
}

impl FilterParams {
    pub fn new(dates: DateSelection, regions: impl IntoIterator<Item = String>) -> Self {
        Self {
            dates,
            regions: regions.into_iter().collect(),
        }
    }

    /// Return exactly the rows where the order date passes the date
    /// predicate AND the region is in the selected set.
    ///
    /// Pure: the input slice is untouched and repeated application of the
    /// same parameters is idempotent.
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        records
            .iter()
            .filter(|r| self.dates.matches(r.order_date) && self.regions.contains(&r.territory_group))
            .cloned()
            .collect()
    }
}

// ── Filter-text parsing ───────────────────────────────────────────────────────

/// Parse a textual filter date (e.g. a `--from` argument).
///
/// Accepts the same formats as the dataset's own order-date column; anything
/// unparseable is an [`DashboardError::InvalidFilter`], not a load error.
pub fn parse_filter_date(raw: &str) -> Result<NaiveDate> {
    parse_order_date(raw)
        .ok_or_else(|| DashboardError::InvalidFilter(format!("not a date: \"{}\"", raw.trim())))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
