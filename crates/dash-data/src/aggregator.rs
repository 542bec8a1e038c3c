//! Pure reductions over the (filtered) sales table.
//!
//! Every function here is a stateless map from a slice of records to a
//! value: no caching, no shared state, deterministic output for a given
//! input regardless of call order or repetition.

use std::collections::{HashMap, HashSet};

use dash_core::dates::MonthKey;
use dash_core::models::{SalesRecord, SalesSummary};

/// Stateless helper that reduces sales records along the dashboard's
/// dimensions.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Sum of `total_price` across all rows; `0.0` for an empty table.
    pub fn total_sales(records: &[SalesRecord]) -> f64 {
        records.iter().map(|r| r.total_price).sum()
    }

    /// Count of distinct `order_detail_id` values; `0` for an empty table.
    pub fn total_orders(records: &[SalesRecord]) -> usize {
        records
            .iter()
            .map(|r| r.order_detail_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Sum of `quantity` across all rows; `0` for an empty table.
    pub fn total_units(records: &[SalesRecord]) -> u64 {
        records.iter().map(|r| r.quantity).sum()
    }

    /// All three scalar summary statistics in one pass-friendly bundle.
    pub fn summary(records: &[SalesRecord]) -> SalesSummary {
        SalesSummary {
            total_sales: Self::total_sales(records),
            total_orders: Self::total_orders(records),
            total_units: Self::total_units(records),
        }
    }

    /// Rupiah totals grouped by calendar month, ascending chronologically.
    ///
    /// The grouping key is [`MonthKey`], whose derived ordering is
    /// `(year, month)`, so the sort can never degrade to string comparison,
    /// which would misorder labels across a year boundary.
    pub fn monthly_sales(records: &[SalesRecord]) -> Vec<(MonthKey, f64)> {
        let mut map: std::collections::BTreeMap<MonthKey, f64> = std::collections::BTreeMap::new();
        for record in records {
            *map.entry(MonthKey::from_date(record.order_date)).or_insert(0.0) +=
                record.total_price;
        }
        map.into_iter().collect()
    }

    /// Rupiah totals grouped by product category. Iteration order is not
    /// significant; the presentation layer re-sorts for display.
    pub fn category_sales(records: &[SalesRecord]) -> HashMap<String, f64> {
        Self::sales_by_label(records, |r| r.category.as_str())
    }

    /// Rupiah totals grouped by region label.
    pub fn region_sales(records: &[SalesRecord]) -> HashMap<String, f64> {
        Self::sales_by_label(records, |r| r.territory_group.as_str())
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic label-grouping driver.
    ///
    /// `label_fn` maps a record to the grouping label.
    fn sales_by_label<'a>(
        records: &'a [SalesRecord],
        label_fn: impl Fn(&'a SalesRecord) -> &'a str,
    ) -> HashMap<String, f64> {
        let mut map: HashMap<String, f64> = HashMap::new();
        for record in records {
            *map.entry(label_fn(record).to_string()).or_insert(0.0) += record.total_price;
        }
        map
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
