use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{Category, RouteCategory};
use crate::record::FlightKey;

/// One report row: the totals of every kept line-item on one flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: FlightKey,
    /// `ORIGIN-DEST` sector.
    pub route: String,
    pub route_category: RouteCategory,
    pub weights: BTreeMap<Category, f64>,
    /// Distinct AWBs per category. Mail never appears here.
    pub awb_counts: BTreeMap<Category, usize>,
    pub total_weight: f64,
    /// Sum of `awb_counts`; mail AWBs excluded.
    pub total_awbs: usize,
    /// Number of line-items folded into this row.
    pub line_items: usize,
}

impl AggregateRow {
    pub fn weight(&self, category: Category) -> f64 {
        self.weights.get(&category).copied().unwrap_or(0.0)
    }

    pub fn awb_count(&self, category: Category) -> usize {
        self.awb_counts.get(&category).copied().unwrap_or(0)
    }
}
