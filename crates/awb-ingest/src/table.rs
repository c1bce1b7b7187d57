//! Raw tabular reading of CSV and Excel exports.
//!
//! Both formats come back as rows of trimmed text cells. Blank rows are
//! dropped here so header detection only sees rows with content.

use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Supported input encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Excel,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xls" => Ok(Self::Excel),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Non-blank rows of one sheet or CSV file, header rows included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().any(|cell| !cell.is_empty()) {
        rows.push(row);
    }
}

pub fn read_table(path: &Path) -> Result<RawTable> {
    match InputFormat::from_path(path)? {
        InputFormat::Csv => read_csv(path),
        InputFormat::Excel => read_workbook(path),
    }
}

fn read_csv(path: &Path) -> Result<RawTable> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        push_row(&mut rows, record.iter().map(normalize_cell).collect());
    }
    debug!(path = %path.display(), rows = rows.len(), "read csv");
    Ok(RawTable { rows })
}

/// Reads the first worksheet. Date cells arrive as Excel serial numbers and
/// are interpreted by the normalizer.
fn read_workbook(path: &Path) -> Result<RawTable> {
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::NoWorksheet {
            path: path.to_path_buf(),
        });
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(workbook_error)?;

    let mut rows = Vec::new();
    for row in range.rows() {
        push_row(
            &mut rows,
            row.iter().map(|cell| normalize_cell(&cell.to_string())).collect(),
        );
    }
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = rows.len(),
        "read worksheet"
    );
    Ok(RawTable { rows })
}
