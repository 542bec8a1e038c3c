//! Process-lifetime memoized dataset store.
//!
//! The dashboard loads its dataset exactly once: the store is constructed
//! with the source path, reads the file on first access, and serves the same
//! immutable table for the rest of the process. There is no TTL and no
//! eviction; the cache key is the source identity and there is exactly one
//! dataset. Filter changes never touch the store; they recompute downstream.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dash_core::error::Result;
use dash_core::models::SalesRecord;
use dash_data::loader::load_sales_data;

/// Memoized owner of the full sales table.
pub struct DatasetStore {
    /// Path of the CSV source this store is keyed on.
    source: PathBuf,
    /// The loaded table, `None` until the first [`DatasetStore::load`].
    cache: Option<Vec<SalesRecord>>,
}

impl DatasetStore {
    /// Create a store for `source`. Nothing is read until [`load`] is called.
    ///
    /// [`load`]: DatasetStore::load
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            cache: None,
        }
    }

    /// Path of the CSV source this store reads from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the full table, reading the source file on the first call.
    ///
    /// A load failure is fatal to the caller and leaves the store empty, so
    /// a later call retries the read; a successful load is permanent.
    pub fn load(&mut self) -> Result<&[SalesRecord]> {
        if self.cache.is_none() {
            let records = load_sales_data(&self.source)?;
            tracing::info!(
                rows = records.len(),
                source = %self.source.display(),
                "sales dataset loaded"
            );
            self.cache = Some(records);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    /// The loaded table, or `None` before the first successful [`load`].
    ///
    /// [`load`]: DatasetStore::load
    pub fn records(&self) -> Option<&[SalesRecord]> {
        self.cache.as_deref()
    }

    /// `true` once a table is cached.
    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    /// Discard the cached table, forcing the next [`load`] to re-read.
    ///
    /// [`load`]: DatasetStore::load
    pub fn invalidate(&mut self) {
        self.cache = None;
        tracing::debug!("dataset cache invalidated");
    }

    // ── Derived dataset facts ─────────────────────────────────────────────

    /// Distinct region labels in the loaded table, sorted. Empty before the
    /// first load. These seed the region multi-select (default: all).
    pub fn regions(&self) -> Vec<String> {
        let Some(records) = self.records() else {
            return Vec::new();
        };
        records
            .iter()
            .map(|r| r.territory_group.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Earliest and latest order date in the loaded table, or `None` when
    /// the table is absent or empty. These seed the date-range picker.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let records = self.records()?;
        let min = records.iter().map(|r| r.order_date).min()?;
        let max = records.iter().map(|r| r.order_date).max()?;
        Some((min, max))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
