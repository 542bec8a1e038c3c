//! The per-interaction snapshot pipeline.
//!
//! One filter change produces one [`DashboardSnapshot`]: the filter is
//! applied to the immutable loaded table and every aggregate is recomputed
//! from scratch. Nothing here is cached or incrementally maintained.

use std::collections::HashMap;

use chrono::Utc;
use dash_core::dates::MonthKey;
use dash_core::filters::FilterParams;
use dash_core::models::{SalesRecord, SalesSummary};

use crate::aggregator::SalesAggregator;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside a snapshot.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SnapshotMetadata {
    /// ISO-8601 timestamp when this snapshot was generated.
    pub generated_at: String,
    /// Number of rows in the full loaded table.
    pub rows_loaded: usize,
    /// Number of rows that survived the filter.
    pub rows_selected: usize,
    /// Wall-clock seconds spent filtering and aggregating.
    pub compute_time_seconds: f64,
}

/// Everything the presentation layer consumes for one interaction:
/// the three scalar summary statistics, the chronologically ordered monthly
/// series, and the two unordered breakdown mappings.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// Total sales / order count / units sold over the selected rows.
    pub summary: SalesSummary,
    /// (month, Rupiah total) pairs, ascending by calendar month.
    pub monthly: Vec<(MonthKey, f64)>,
    /// Rupiah totals per product category.
    pub by_category: HashMap<String, f64>,
    /// Rupiah totals per region.
    pub by_region: HashMap<String, f64>,
    /// Metadata about this snapshot.
    pub metadata: SnapshotMetadata,
}

impl DashboardSnapshot {
    /// `true` when the current filter selected no rows at all.
    pub fn is_empty(&self) -> bool {
        self.metadata.rows_selected == 0
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Apply `filter` to the loaded table and compute all dashboard aggregates.
///
/// The input slice is never mutated; the selected subset lives only for the
/// duration of this call.
pub fn build_snapshot(records: &[SalesRecord], filter: &FilterParams) -> DashboardSnapshot {
    let started = std::time::Instant::now();

    let selected = filter.apply(records);

    let summary = SalesAggregator::summary(&selected);
    let monthly = SalesAggregator::monthly_sales(&selected);
    let by_category = SalesAggregator::category_sales(&selected);
    let by_region = SalesAggregator::region_sales(&selected);

    let metadata = SnapshotMetadata {
        generated_at: Utc::now().to_rfc3339(),
        rows_loaded: records.len(),
        rows_selected: selected.len(),
        compute_time_seconds: started.elapsed().as_secs_f64(),
    };

    tracing::debug!(
        rows_loaded = metadata.rows_loaded,
        rows_selected = metadata.rows_selected,
        "snapshot rebuilt"
    );

    DashboardSnapshot {
        summary,
        monthly,
        by_category,
        by_region,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
