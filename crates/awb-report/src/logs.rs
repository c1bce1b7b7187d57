//! Diagnostic logs for operator review.
//!
//! Each stream gets a tab-separated text file opened by a run header. An
//! empty stream still gets its file, holding a single "No ... found." line,
//! so a stale log from an earlier run never survives.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use awb_core::Diagnostics;
use awb_model::{
    Category, CategoryConflict, DuplicateEntry, FlightKey, TransitConflict, UnclassifiedEntry,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::error::{ReportError, Result};

pub const DUPLICATES_FILE: &str = "duplicate_entries.txt";
pub const TRANSIT_CONFLICTS_FILE: &str = "transit_conflicts.txt";
pub const UNCLASSIFIED_FILE: &str = "unclassified_words.txt";
pub const CATEGORY_CONFLICTS_FILE: &str = "category_conflicts.txt";
pub const DIAGNOSTICS_JSON_FILE: &str = "diagnostics.json";

/// Identifies the run that produced a set of logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunHeader {
    pub generated_at: NaiveDateTime,
    pub input: PathBuf,
    pub input_fingerprint: String,
    pub config_fingerprint: String,
}

impl RunHeader {
    pub fn now(
        input: impl Into<PathBuf>,
        input_fingerprint: impl Into<String>,
        config_fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            generated_at: Local::now().naive_local(),
            input: input.into(),
            input_fingerprint: input_fingerprint.into(),
            config_fingerprint: config_fingerprint.into(),
        }
    }

    fn render(&self) -> String {
        format!(
            "==== Run on {} ====\nInput: {}\nInput SHA-256: {}\nConfig SHA-256: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            self.input.display(),
            self.input_fingerprint,
            self.config_fingerprint,
        )
    }
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn flight_text(flight: Option<&FlightKey>) -> String {
    flight
        .map(|key| {
            format!(
                "{} {} {}",
                key.date.format("%Y-%m-%d"),
                key.flight_no,
                key.route()
            )
        })
        .unwrap_or_default()
}

fn categories_text(categories: &[Category]) -> String {
    categories
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Header line, then one line per entry; or the empty message alone.
fn render_stream<T>(
    header: &RunHeader,
    entries: &[T],
    empty_message: &str,
    columns: &[&str],
    line: impl Fn(&T) -> Vec<String>,
) -> String {
    let mut out = header.render();
    if entries.is_empty() {
        out.push_str(empty_message);
        out.push('\n');
        return out;
    }
    out.push_str(&columns.join("\t"));
    out.push('\n');
    for entry in entries {
        let _ = writeln!(out, "{}", line(entry).join("\t"));
    }
    out
}

pub fn render_duplicates(header: &RunHeader, entries: &[DuplicateEntry]) -> String {
    render_stream(
        header,
        entries,
        "No strict duplicates found.",
        &[
            "Flight_Date",
            "Flight_No",
            "AWB",
            "Pieces",
            "Weight",
            "ULD",
            "Nature_Goods",
            "SHCs",
            "Import_Status",
            "AWB_Dest",
        ],
        |entry| {
            vec![
                date_text(entry.flight_date),
                entry.flight_no.clone(),
                entry.awb.clone(),
                entry.pieces.to_string(),
                entry.weight.to_string(),
                entry.uld.clone(),
                entry.nature_goods.clone(),
                entry.shcs.clone(),
                entry.import_status.clone(),
                entry.awb_dest.clone(),
            ]
        },
    )
}

pub fn render_transit_conflicts(header: &RunHeader, entries: &[TransitConflict]) -> String {
    render_stream(
        header,
        entries,
        "No transit conflicts found.",
        &[
            "AWB",
            "Has_Transit_Status",
            "Dest_Outside_Station",
            "Import_Status",
            "AWB_Dest",
            "Flight_Date",
            "Flight_No",
            "Weight",
            "Nature_Goods",
            "SHCs",
        ],
        |entry| {
            vec![
                entry.awb.clone(),
                entry.has_transit_status.to_string(),
                entry.destination_outside_station.to_string(),
                entry.import_status.clone(),
                entry.awb_dest.clone(),
                date_text(entry.flight_date),
                entry.flight_no.clone(),
                entry.weight.to_string(),
                entry.nature_goods.clone(),
                entry.shcs.clone(),
            ]
        },
    )
}

pub fn render_unclassified(header: &RunHeader, entries: &[UnclassifiedEntry]) -> String {
    render_stream(
        header,
        entries,
        "No unclassified AWBs found.",
        &[
            "AWB",
            "Nature_Goods",
            "SHCs",
            "Import_Status",
            "AWB_Dest",
            "Weight",
        ],
        |entry| {
            vec![
                entry.awb.clone(),
                entry.nature_goods.clone(),
                entry.shcs.clone(),
                entry.import_status.clone(),
                entry.awb_dest.clone(),
                entry.weight.to_string(),
            ]
        },
    )
}

pub fn render_category_conflicts(header: &RunHeader, entries: &[CategoryConflict]) -> String {
    render_stream(
        header,
        entries,
        "No category conflicts found.",
        &[
            "AWB",
            "Source",
            "Flight",
            "Candidates",
            "Resolved",
            "Nature_Goods",
            "SHCs",
        ],
        |entry| {
            vec![
                entry.awb.clone(),
                entry.source.as_str().to_string(),
                flight_text(entry.flight.as_ref()),
                categories_text(&entry.candidates),
                entry.resolved.as_str().to_string(),
                entry.nature_goods.clone(),
                entry.shcs.clone(),
            ]
        },
    )
}

#[derive(Serialize)]
struct DiagnosticsDocument<'a> {
    run: &'a RunHeader,
    streams: &'a Diagnostics,
}

pub fn render_diagnostics_json(
    header: &RunHeader,
    diagnostics: &Diagnostics,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DiagnosticsDocument {
        run: header,
        streams: diagnostics,
    })
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf> {
    fs::write(&path, contents).map_err(|source| ReportError::io(&path, source))?;
    Ok(path)
}

/// Writes the four text logs and `diagnostics.json` into `dir`, replacing
/// earlier copies. Returns the written paths.
pub fn write_diagnostic_logs(
    dir: &Path,
    diagnostics: &Diagnostics,
    header: &RunHeader,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| ReportError::io(dir, source))?;

    let json_path = dir.join(DIAGNOSTICS_JSON_FILE);
    let json = render_diagnostics_json(header, diagnostics).map_err(|source| ReportError::Json {
        path: json_path.clone(),
        source,
    })?;

    let written = vec![
        write_file(
            dir.join(DUPLICATES_FILE),
            &render_duplicates(header, diagnostics.duplicates()),
        )?,
        write_file(
            dir.join(TRANSIT_CONFLICTS_FILE),
            &render_transit_conflicts(header, diagnostics.transit_conflicts()),
        )?,
        write_file(
            dir.join(UNCLASSIFIED_FILE),
            &render_unclassified(header, diagnostics.unclassified()),
        )?,
        write_file(
            dir.join(CATEGORY_CONFLICTS_FILE),
            &render_category_conflicts(header, diagnostics.category_conflicts()),
        )?,
        write_file(json_path, &json)?,
    ];
    info!(
        dir = %dir.display(),
        files = written.len(),
        entries = diagnostics.len(),
        "diagnostic logs written"
    );
    Ok(written)
}
