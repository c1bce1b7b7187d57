//! Report output for the cargo report.
//!
//! - **Flight report**: one CSV row per flight, built as a polars frame
//! - **Diagnostic logs**: tab-separated text per stream plus a JSON document

mod error;
mod frame;
mod layout;
mod logs;

pub use error::{ReportError, Result};
pub use frame::{build_report_frame, write_report_csv};
pub use layout::ReportLayout;
pub use logs::{
    CATEGORY_CONFLICTS_FILE, DIAGNOSTICS_JSON_FILE, DUPLICATES_FILE, RunHeader,
    TRANSIT_CONFLICTS_FILE, UNCLASSIFIED_FILE, render_category_conflicts, render_diagnostics_json,
    render_duplicates, render_transit_conflicts, render_unclassified, write_diagnostic_logs,
};
