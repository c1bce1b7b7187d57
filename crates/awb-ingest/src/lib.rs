//! Ingestion of waybill line-item exports.
//!
//! Reads CSV and Excel files, maps their headers onto canonical fields and
//! drops records the report never considers (excluded import statuses and
//! records without a flight identity).

pub mod batch;
pub mod error;
pub mod mapping;
pub mod table;

pub use batch::{
    PrefilterOutcome, PrefilterStats, RecordBatch, fingerprint, prefilter, read_input,
};
pub use error::{IngestError, Result};
pub use mapping::{ColumnMap, HEADER_PROBE_ROWS, detect_columns, normalize_header};
pub use table::{InputFormat, RawTable, read_table};
