//! Classification-and-aggregation engine for the air waybill cargo report.
//!
//! The engine performs no I/O: it takes ingested [`awb_model::RawRecord`]s
//! and returns aggregate rows plus diagnostic streams.

pub mod aggregate;
pub mod classify;
pub mod dedupe;
pub mod diagnostics;
pub mod error;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use aggregate::{Aggregation, Aggregator};
pub use classify::{CategoryRanking, Classification, Classifier};
pub use dedupe::{DedupeOutcome, dedupe};
pub use diagnostics::Diagnostics;
pub use error::{CoreError, Result};
pub use pipeline::{Pipeline, PipelineOutput, PipelineStats, run};
