//! CSV discovery and loading for the sales dashboard.
//!
//! Reads the flat sales export into typed [`SalesRecord`] rows. The load is
//! all-or-nothing: an unreadable file, a missing required column, or a single
//! unparseable row fails the whole load. The table is read once per process;
//! memoization is the runtime store's job.

use std::io::Read;
use std::path::{Path, PathBuf};

use dash_core::dates::parse_order_date;
use dash_core::error::{DashboardError, Result};
use dash_core::models::SalesRecord;
use serde::Deserialize;
use tracing::{debug, warn};

/// Every column the dashboard needs, in normalized spelling.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "order_detail_id",
    "order_date",
    "territory_groups",
    "category",
    "quantity",
    "totalprice_rupiah",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load the full sales table from a CSV file.
///
/// Repeated calls on the same file return an equivalent table, so the result
/// is safe to cache by source path.
pub fn load_sales_data(path: &Path) -> Result<Vec<SalesRecord>> {
    let file = std::fs::File::open(path).map_err(|e| DashboardError::DataLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let records = read_sales_records(file)?;
    debug!(
        "Loaded {} sales records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Read sales records from any reader (the seam used by tests).
///
/// Column names are normalized first (lower-cased, spaces replaced with
/// underscores), so `"Order Date"`, `"order date"` and `"ORDER_DATE"` all
/// resolve to the same column. Columns beyond the required six are ignored.
pub fn read_sales_records<R: Read>(reader: R) -> Result<Vec<SalesRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let normalized: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_column_name)
        .collect();

    for required in REQUIRED_COLUMNS {
        if !normalized.iter().any(|h| h == required) {
            return Err(DashboardError::MissingColumn(required.to_string()));
        }
    }
    csv_reader.set_headers(csv::StringRecord::from(normalized));

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<RawSalesRow>() {
        records.push(row?.into_record()?);
    }

    // Deterministic row order regardless of how the export was written.
    records.sort_by(|a, b| a.order_date.cmp(&b.order_date));

    Ok(records)
}

/// Normalize a raw header cell: lower-case, spaces → underscores.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

// ── Internal row shape ────────────────────────────────────────────────────────

/// A decoded CSV row before date parsing.
///
/// `order_date` stays textual here because the export mixes date and
/// datetime spellings; [`parse_order_date`] handles the fallback chain.
#[derive(Debug, Deserialize)]
struct RawSalesRow {
    order_detail_id: String,
    order_date: String,
    territory_groups: String,
    category: String,
    quantity: u64,
    totalprice_rupiah: f64,
}

impl RawSalesRow {
    fn into_record(self) -> Result<SalesRecord> {
        let order_date = parse_order_date(&self.order_date)
            .ok_or_else(|| DashboardError::DateParse(self.order_date.clone()))?;
        Ok(SalesRecord {
            order_detail_id: self.order_detail_id,
            order_date,
            territory_group: self.territory_groups,
            category: self.category,
            quantity: self.quantity,
            total_price: self.totalprice_rupiah,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
Order Detail ID,Order Date,Territory Groups,Category,Quantity,TotalPrice Rupiah
101,2024-01-15,North America,Bikes,2,3000000
102,2024-01-20,Europe,Accessories,1,250000
103,2024-02-01,Pacific,Bikes,5,7500000
";

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    // ── normalize_column_name ─────────────────────────────────────────────────

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Order Date"), "order_date");
        assert_eq!(normalize_column_name("TERRITORY GROUPS"), "territory_groups");
        assert_eq!(normalize_column_name(" quantity "), "quantity");
        assert_eq!(normalize_column_name("totalprice_rupiah"), "totalprice_rupiah");
    }

    // ── find_csv_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_csv_files_in_flat_dir() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "a.csv", SAMPLE_CSV);
        write_csv(dir.path(), "b.csv", SAMPLE_CSV);
        write_csv(dir.path(), "notes.txt", "not a dataset");

        let files = find_csv_files(dir.path());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_find_csv_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("archive");
        std::fs::create_dir_all(&sub).unwrap();
        write_csv(dir.path(), "b.csv", SAMPLE_CSV);
        write_csv(&sub, "a.csv", SAMPLE_CSV);

        let files = find_csv_files(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0] < files[1]);
    }

    #[test]
    fn test_find_csv_files_case_insensitive_extension() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "export.CSV", SAMPLE_CSV);
        assert_eq!(find_csv_files(dir.path()).len(), 1);
    }

    #[test]
    fn test_find_csv_files_nonexistent_path() {
        let files = find_csv_files(Path::new("/tmp/does-not-exist-beecycle-test"));
        assert!(files.is_empty());
    }

    // ── read_sales_records ────────────────────────────────────────────────────

    #[test]
    fn test_read_normalizes_headers() {
        let records = read_sales_records(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].order_detail_id, "101");
        assert_eq!(records[0].territory_group, "North America");
        assert_eq!(records[0].quantity, 2);
        assert!((records[0].total_price - 3_000_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_read_sorted_by_order_date() {
        let csv = "\
order_detail_id,order_date,territory_groups,category,quantity,totalprice_rupiah
2,2024-03-01,Europe,Bikes,1,100
1,2024-01-01,Europe,Bikes,1,100
";
        let records = read_sales_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].order_detail_id, "1");
        assert_eq!(records[1].order_detail_id, "2");
    }

    #[test]
    fn test_read_datetime_cells_truncate_to_date() {
        let csv = "\
order_detail_id,order_date,territory_groups,category,quantity,totalprice_rupiah
1,2024-01-15 13:45:00,Europe,Bikes,1,100
";
        let records = read_sales_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].order_date, "2024-01-15".parse().unwrap());
    }

    #[test]
    fn test_read_extra_columns_ignored() {
        let csv = "\
order_detail_id,order_date,territory_groups,category,quantity,totalprice_rupiah,Sales Person
1,2024-01-15,Europe,Bikes,1,100,Ani
";
        let records = read_sales_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_read_missing_column_fails() {
        let csv = "\
order_detail_id,order_date,category,quantity,totalprice_rupiah
1,2024-01-15,Bikes,1,100
";
        let err = read_sales_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == "territory_groups"));
    }

    #[test]
    fn test_read_unparseable_date_fails_whole_load() {
        let csv = "\
order_detail_id,order_date,territory_groups,category,quantity,totalprice_rupiah
1,2024-01-15,Europe,Bikes,1,100
2,someday,Europe,Bikes,1,100
";
        let err = read_sales_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::DateParse(ref d) if d == "someday"));
    }

    #[test]
    fn test_read_non_numeric_quantity_fails() {
        let csv = "\
order_detail_id,order_date,territory_groups,category,quantity,totalprice_rupiah
1,2024-01-15,Europe,Bikes,lots,100
";
        let err = read_sales_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::CsvParse(_)));
    }

    #[test]
    fn test_read_empty_table_is_ok() {
        let csv = "order_detail_id,order_date,territory_groups,category,quantity,totalprice_rupiah\n";
        let records = read_sales_records(csv.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    // ── load_sales_data ───────────────────────────────────────────────────────

    #[test]
    fn test_load_sales_data_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "sales.csv", SAMPLE_CSV);

        let records = load_sales_data(&path).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_load_sales_data_missing_file() {
        let err = load_sales_data(Path::new("/tmp/missing-beecycle.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
    }

    #[test]
    fn test_load_sales_data_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "sales.csv", SAMPLE_CSV);

        let first = load_sales_data(&path).unwrap();
        let second = load_sales_data(&path).unwrap();
        assert_eq!(first, second);
    }
}
