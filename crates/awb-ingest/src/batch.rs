//! Record batches handed to the core.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use awb_model::{IngestConfig, RawField, RawRecord};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, info_span};

use crate::error::{IngestError, Result};
use crate::mapping::{ColumnMap, HEADER_PROBE_ROWS, detect_columns};
use crate::table::read_table;

/// Records read from one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBatch {
    pub source: PathBuf,
    /// Canonical fields that had a column in the input.
    pub fields_present: BTreeSet<RawField>,
    pub records: Vec<RawRecord>,
}

impl RecordBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads a CSV or Excel export into raw records.
///
/// Cells of mapped columns become field values; blank cells and cells past
/// the end of a short row stay `None`.
pub fn read_input(path: &Path, config: &IngestConfig) -> Result<RecordBatch> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let table = read_table(path)?;
    let columns = detect_columns(&table.rows, config).ok_or_else(|| IngestError::NoHeader {
        path: path.to_path_buf(),
        probed: HEADER_PROBE_ROWS.min(table.rows.len()),
    })?;

    let records: Vec<RawRecord> = table
        .rows
        .iter()
        .skip(columns.header_row + 1)
        .map(|row| build_record(row, &columns))
        .collect();

    let fields_present = columns.fields();
    info!(
        records = records.len(),
        fields = fields_present.len(),
        unmapped = columns.unmapped.len(),
        duration_ms = start.elapsed().as_millis(),
        "input read"
    );
    Ok(RecordBatch {
        source: path.to_path_buf(),
        fields_present,
        records,
    })
}

fn build_record(row: &[String], columns: &ColumnMap) -> RawRecord {
    let mut record = RawRecord::default();
    for (field, index) in &columns.columns {
        if let Some(value) = row.get(*index).filter(|value| !value.is_empty()) {
            record.set(*field, value.as_str());
        }
    }
    record
}

/// Counts of what [`prefilter`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrefilterStats {
    pub input: usize,
    pub excluded_status: usize,
    pub missing_identity: usize,
    pub kept: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefilterOutcome {
    pub batch: RecordBatch,
    pub stats: PrefilterStats,
}

/// Drops records with an excluded import status and records lacking any
/// flight-identity field. Status is checked first.
pub fn prefilter(batch: RecordBatch, config: &IngestConfig) -> PrefilterOutcome {
    let excluded: BTreeSet<String> = config
        .excluded_statuses
        .iter()
        .map(|status| status.trim().to_uppercase())
        .collect();
    let mut stats = PrefilterStats {
        input: batch.records.len(),
        ..PrefilterStats::default()
    };

    let RecordBatch {
        source,
        fields_present,
        records,
    } = batch;
    let records: Vec<RawRecord> = records
        .into_iter()
        .filter(|record| {
            let status = record
                .import_status
                .as_deref()
                .map(|status| status.trim().to_uppercase())
                .unwrap_or_default();
            if excluded.contains(&status) {
                stats.excluded_status += 1;
                return false;
            }
            if !config
                .identity_fields
                .iter()
                .all(|field| record.has_value(*field))
            {
                stats.missing_identity += 1;
                return false;
            }
            true
        })
        .collect();
    stats.kept = records.len();

    debug!(
        input = stats.input,
        excluded_status = stats.excluded_status,
        missing_identity = stats.missing_identity,
        kept = stats.kept,
        "prefiltered records"
    );
    PrefilterOutcome {
        batch: RecordBatch {
            source,
            fields_present,
            records,
        },
        stats,
    }
}

/// SHA-256 of the input file bytes, hex encoded.
pub fn fingerprint(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| IngestError::io(path, source))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
