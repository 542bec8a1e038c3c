use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One order line of the sales dataset.
///
/// Field names track the normalized source columns (lower-cased, spaces
/// replaced with underscores); the two renames keep the Rust side singular
/// and unit-free while still round-tripping the dataset's own spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Order line key. Not guaranteed unique in the raw export, but it is
    /// the unit of distinct counting for "number of orders".
    pub order_detail_id: String,
    /// Calendar date of the order. Any time component in the source is
    /// discarded at load.
    pub order_date: NaiveDate,
    /// Sales region label (source column `territory_groups`).
    #[serde(rename = "territory_groups")]
    pub territory_group: String,
    /// Product category label.
    pub category: String,
    /// Units sold on this line.
    pub quantity: u64,
    /// Line total in Rupiah (source column `totalprice_rupiah`).
    #[serde(rename = "totalprice_rupiah")]
    pub total_price: f64,
}

/// The three scalar summary statistics shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Sum of `total_price` across the selected rows.
    pub total_sales: f64,
    /// Count of distinct `order_detail_id` values.
    pub total_orders: usize,
    /// Sum of `quantity` across the selected rows.
    pub total_units: u64,
}

impl SalesSummary {
    /// Mean Rupiah value per distinct order, `0.0` when no orders matched.
    pub fn average_order_value(&self) -> f64 {
        if self.total_orders == 0 {
            return 0.0;
        }
        self.total_sales / self.total_orders as f64
    }
}
