//! Diagnostic entries surfaced for operator review.
//!
//! Diagnostics are anomalies, not failures: the pipeline always produces a
//! category for every surviving record and records what looked suspicious on
//! the way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::Category;
use crate::record::{FlightKey, NormalizedRecord};

/// A line-item dropped by the duplicate filter, with its own field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    pub flight_date: Option<NaiveDate>,
    pub flight_no: String,
    pub awb: String,
    pub pieces: i64,
    pub weight: f64,
    pub uld: String,
    pub nature_goods: String,
    pub shcs: String,
    pub import_status: String,
    pub awb_dest: String,
}

impl DuplicateEntry {
    pub fn from_record(record: &NormalizedRecord) -> Self {
        Self {
            flight_date: record.flight_date,
            flight_no: record.flight_no.clone(),
            awb: record.awb.clone(),
            pieces: record.pieces,
            weight: record.weight,
            uld: record.uld.clone(),
            nature_goods: record.nature_goods.clone(),
            shcs: record.shc_raw.clone(),
            import_status: record.import_status.clone(),
            awb_dest: record.awb_dest.clone(),
        }
    }
}

/// Exactly one of the two transit sub-conditions held, so the record was
/// classified by the rest of the chain instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitConflict {
    pub awb: String,
    /// Import status carries the transit token (`CKD`).
    pub has_transit_status: bool,
    /// Waybill destination is non-blank and not the reporting station.
    pub destination_outside_station: bool,
    pub import_status: String,
    pub awb_dest: String,
    pub flight_date: Option<NaiveDate>,
    pub flight_no: String,
    pub weight: f64,
    pub nature_goods: String,
    pub shcs: String,
}

/// Free-text description that matched no rule and is not a generic
/// placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnclassifiedEntry {
    pub awb: String,
    pub nature_goods: String,
    pub shcs: String,
    pub import_status: String,
    pub awb_dest: String,
    pub weight: f64,
}

/// Where a category disagreement was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSource {
    /// SHC codes and description keywords named different commodities.
    ShcVsDescription,
    /// Line-items of one AWB on one flight were classified differently.
    LineItems,
}

impl ConflictSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictSource::ShcVsDescription => "shc_vs_description",
            ConflictSource::LineItems => "line_items",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConflict {
    pub source: ConflictSource,
    pub awb: String,
    pub flight: Option<FlightKey>,
    /// Competing categories in the order they were encountered.
    pub candidates: Vec<Category>,
    pub resolved: Category,
    pub nature_goods: String,
    pub shcs: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Duplicate,
    TransitConflict,
    Unclassified,
    CategoryConflict,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Duplicate => "duplicate",
            DiagnosticKind::TransitConflict => "transit_conflict",
            DiagnosticKind::Unclassified => "unclassified",
            DiagnosticKind::CategoryConflict => "category_conflict",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticEntry {
    Duplicate(DuplicateEntry),
    TransitConflict(TransitConflict),
    Unclassified(UnclassifiedEntry),
    CategoryConflict(CategoryConflict),
}

impl DiagnosticEntry {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            DiagnosticEntry::Duplicate(_) => DiagnosticKind::Duplicate,
            DiagnosticEntry::TransitConflict(_) => DiagnosticKind::TransitConflict,
            DiagnosticEntry::Unclassified(_) => DiagnosticKind::Unclassified,
            DiagnosticEntry::CategoryConflict(_) => DiagnosticKind::CategoryConflict,
        }
    }

    pub fn awb(&self) -> &str {
        match self {
            DiagnosticEntry::Duplicate(entry) => &entry.awb,
            DiagnosticEntry::TransitConflict(entry) => &entry.awb,
            DiagnosticEntry::Unclassified(entry) => &entry.awb,
            DiagnosticEntry::CategoryConflict(entry) => &entry.awb,
        }
    }
}
