//! Stages of one report run: ingest, classify and aggregate, output.
//!
//! Kept in the library so the stages can be exercised without the binary.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use awb_config::LoadedConfig;
use awb_core::{Diagnostics, Pipeline, PipelineOutput, PipelineStats};
use awb_ingest::{PrefilterStats, RecordBatch, fingerprint, prefilter, read_input};
use awb_model::{AggregateRow, IngestConfig};
use awb_report::{ReportLayout, RunHeader, write_diagnostic_logs, write_report_csv};
use tracing::{info, info_span, trace};

use crate::logging::redact_value;

/// Inputs of a report run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            log_dir: None,
            dry_run: false,
        }
    }

    /// `<stem>_report.csv` next to the input unless given.
    pub fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let stem = self
            .input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "awb".to_string());
        self.input.with_file_name(format!("{stem}_report.csv"))
    }

    /// The report's directory unless given.
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        self.output_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

/// Everything a run produced, for the console summary.
#[derive(Debug)]
pub struct RunOutcome {
    pub input: PathBuf,
    pub input_fingerprint: String,
    pub config_source: Option<PathBuf>,
    pub config_fingerprint: String,
    pub layout: ReportLayout,
    pub prefilter: PrefilterStats,
    pub stats: PipelineStats,
    pub rows: Vec<AggregateRow>,
    pub diagnostics: Diagnostics,
    /// `None` on a dry run.
    pub report: Option<PathBuf>,
    pub log_files: Vec<PathBuf>,
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

pub struct Ingested {
    pub batch: RecordBatch,
    pub prefilter: PrefilterStats,
    pub fingerprint: String,
}

/// Reads the export and drops records the report never considers.
pub fn ingest(input: &Path, config: &IngestConfig) -> Result<Ingested> {
    let input_fingerprint =
        fingerprint(input).with_context(|| format!("fingerprint {}", input.display()))?;
    let batch = read_input(input, config).with_context(|| format!("read {}", input.display()))?;
    let outcome = prefilter(batch, config);
    info!(
        read = outcome.stats.input,
        excluded_status = outcome.stats.excluded_status,
        missing_identity = outcome.stats.missing_identity,
        kept = outcome.stats.kept,
        "ingest complete"
    );
    Ok(Ingested {
        batch: outcome.batch,
        prefilter: outcome.stats,
        fingerprint: input_fingerprint,
    })
}

// ============================================================================
// Stage 2: Classify and aggregate
// ============================================================================

pub fn process(batch: &RecordBatch, config: &LoadedConfig) -> Result<PipelineOutput> {
    let output = Pipeline::new(&config.config)
        .run(&batch.fields_present, &batch.records)
        .with_context(|| format!("process {}", batch.source.display()))?;
    trace_diagnostics(&output.diagnostics);
    Ok(output)
}

fn trace_diagnostics(diagnostics: &Diagnostics) {
    for entry in diagnostics.unclassified() {
        trace!(
            awb = redact_value(&entry.awb),
            nature_goods = redact_value(&entry.nature_goods),
            shcs = redact_value(&entry.shcs),
            "unclassified description"
        );
    }
    for entry in diagnostics.transit_conflicts() {
        trace!(
            awb = redact_value(&entry.awb),
            has_transit_status = entry.has_transit_status,
            destination_outside_station = entry.destination_outside_station,
            "transit conflict"
        );
    }
    for entry in diagnostics.category_conflicts() {
        trace!(
            awb = redact_value(&entry.awb),
            source = entry.source.as_str(),
            resolved = entry.resolved.as_str(),
            "category conflict"
        );
    }
}

// ============================================================================
// Stage 3: Output
// ============================================================================

pub struct Written {
    pub report: Option<PathBuf>,
    pub log_files: Vec<PathBuf>,
}

pub fn output(
    options: &RunOptions,
    processed: &PipelineOutput,
    layout: &ReportLayout,
    header: &RunHeader,
) -> Result<Written> {
    let span = info_span!("output");
    let _guard = span.enter();
    let start = Instant::now();

    if options.dry_run {
        info!(
            rows = processed.rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "output skipped (dry run)"
        );
        return Ok(Written {
            report: None,
            log_files: Vec::new(),
        });
    }

    let report = options.output_path();
    write_report_csv(&report, &processed.rows, layout)
        .with_context(|| format!("write report {}", report.display()))?;
    let log_dir = options.log_dir();
    let log_files = write_diagnostic_logs(&log_dir, &processed.diagnostics, header)
        .with_context(|| format!("write diagnostic logs to {}", log_dir.display()))?;
    info!(
        report = %report.display(),
        log_files = log_files.len(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(Written {
        report: Some(report),
        log_files,
    })
}

/// Runs every stage for one input file.
pub fn run_report(options: &RunOptions, config: &LoadedConfig) -> Result<RunOutcome> {
    let span = info_span!("run", input = %options.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let ingested = ingest(&options.input, &config.config.ingest)?;
    let processed = process(&ingested.batch, config)?;
    let layout = ReportLayout::for_classification(&config.config.classification);
    let header = RunHeader::now(&options.input, &ingested.fingerprint, &config.fingerprint);
    let written = output(options, &processed, &layout, &header)?;

    info!(
        flights = processed.stats.flights,
        diagnostics = processed.diagnostics.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunOutcome {
        input: options.input.clone(),
        input_fingerprint: ingested.fingerprint,
        config_source: config.source.clone(),
        config_fingerprint: config.fingerprint.clone(),
        layout,
        prefilter: ingested.prefilter,
        stats: processed.stats,
        rows: processed.rows,
        diagnostics: processed.diagnostics,
        report: written.report,
        log_files: written.log_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_follow_the_input() {
        let options = RunOptions::new("/data/exports/jan.xlsx");
        assert_eq!(
            options.output_path(),
            PathBuf::from("/data/exports/jan_report.csv")
        );
        assert_eq!(options.log_dir(), PathBuf::from("/data/exports"));

        let options = RunOptions {
            output: Some(PathBuf::from("/out/report.csv")),
            ..RunOptions::new("jan.csv")
        };
        assert_eq!(options.log_dir(), PathBuf::from("/out"));
    }
}
