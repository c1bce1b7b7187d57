//! Pipeline driver.
//!
//! # Stage order
//!
//! 1. Required-field check (the only fatal condition)
//! 2. Field normalization
//! 3. Deduplication
//! 4. Zero-weight exclusion
//! 5. Flight-key check
//! 6. Classification
//! 7. Aggregation
//!
//! Diagnostics are collected in stage order: duplicates first, then the
//! classification streams in kept-record order, then line-item conflicts.
//! An unclassified line-item whose waybill resolved to another category is
//! not reported as unclassified.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use awb_model::{
    AggregateRow, Category, DiagnosticEntry, DuplicateField, NormalizedRecord, RawField, RawRecord,
    ReportConfig,
};
use awb_transform::{NormalizeStats, Normalizer, RouteTable};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::aggregate::Aggregator;
use crate::classify::Classifier;
use crate::dedupe::dedupe;
use crate::diagnostics::Diagnostics;
use crate::error::{CoreError, Result};

/// Counters describing one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineStats {
    pub input_records: usize,
    pub normalize: NormalizeStats,
    pub duplicates: usize,
    pub zero_weight: usize,
    pub missing_flight_key: usize,
    pub classified: usize,
    /// Unclassified line-items whose waybill resolved to another category.
    pub unclassified_resolved: usize,
    pub flights: usize,
    /// Distinct AWBs across the run, mail excluded.
    pub distinct_awbs: usize,
    pub total_weight: f64,
    pub category_weights: BTreeMap<Category, f64>,
    pub category_awbs: BTreeMap<Category, usize>,
}

impl PipelineStats {
    pub fn weight(&self, category: Category) -> f64 {
        self.category_weights.get(&category).copied().unwrap_or(0.0)
    }

    pub fn awbs(&self, category: Category) -> usize {
        self.category_awbs.get(&category).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// One row per flight, ordered by flight key.
    pub rows: Vec<AggregateRow>,
    pub diagnostics: Diagnostics,
    pub stats: PipelineStats,
}

pub struct Pipeline {
    normalizer: Normalizer,
    classifier: Classifier,
    routes: RouteTable,
    key_fields: Vec<DuplicateField>,
    required_fields: Vec<RawField>,
}

impl Pipeline {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.normalize),
            classifier: Classifier::new(&config.classification),
            routes: RouteTable::new(&config.routes),
            key_fields: config.dedupe.key_fields.clone(),
            required_fields: config.pipeline.required_fields.clone(),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Refuses to run when a required field is absent from the input or
    /// carries no value in any record.
    pub fn check_required_fields(
        &self,
        fields_present: &BTreeSet<RawField>,
        records: &[RawRecord],
    ) -> Result<()> {
        for field in &self.required_fields {
            let present = fields_present.contains(field)
                && (records.is_empty() || records.iter().any(|record| record.has_value(*field)));
            if !present {
                return Err(CoreError::MissingRequiredField { field: *field });
            }
        }
        Ok(())
    }

    pub fn run(
        &self,
        fields_present: &BTreeSet<RawField>,
        records: &[RawRecord],
    ) -> Result<PipelineOutput> {
        let span = info_span!("pipeline", records = records.len());
        let _guard = span.enter();
        let start = Instant::now();

        self.check_required_fields(fields_present, records)?;

        let mut stats = PipelineStats {
            input_records: records.len(),
            ..PipelineStats::default()
        };
        let mut diagnostics = Diagnostics::new();

        let (normalized, normalize_stats) = self.normalizer.normalize_all(records);
        stats.normalize = normalize_stats;

        let deduped = dedupe(normalized, &self.key_fields);
        stats.duplicates = deduped.duplicates.len();
        diagnostics.extend(deduped.duplicates);
        debug!(
            kept = deduped.kept.len(),
            duplicates = stats.duplicates,
            "deduplicated records"
        );

        let mut eligible: Vec<NormalizedRecord> = Vec::with_capacity(deduped.kept.len());
        for record in deduped.kept {
            if record.weight == 0.0 {
                stats.zero_weight += 1;
            } else if record.flight_key().is_none() {
                stats.missing_flight_key += 1;
            } else {
                eligible.push(record);
            }
        }

        let mut classified: Vec<(&NormalizedRecord, Category)> = Vec::with_capacity(eligible.len());
        let mut raised: Vec<(&NormalizedRecord, Vec<DiagnosticEntry>)> = Vec::new();
        for record in &eligible {
            if let Some(classification) = self.classifier.classify(record) {
                if !classification.diagnostics.is_empty() {
                    raised.push((record, classification.diagnostics));
                }
                classified.push((record, classification.category));
            }
        }
        stats.classified = classified.len();

        let aggregation =
            Aggregator::new(self.classifier.ranking(), &self.routes).aggregate(classified);
        for (record, entries) in raised {
            let resolved = aggregation.resolved_category(record);
            for entry in entries {
                let resolved_elsewhere = matches!(entry, DiagnosticEntry::Unclassified(_))
                    && resolved.is_some_and(|category| category != Category::GeneralCargo);
                if resolved_elsewhere {
                    stats.unclassified_resolved += 1;
                } else {
                    diagnostics.push(entry);
                }
            }
        }
        diagnostics.extend(aggregation.conflicts);

        stats.flights = aggregation.rows.len();
        stats.distinct_awbs = aggregation.distinct_awbs.len();
        for row in &aggregation.rows {
            stats.total_weight += row.total_weight;
            for (category, weight) in &row.weights {
                *stats.category_weights.entry(*category).or_insert(0.0) += weight;
            }
            for (category, count) in &row.awb_counts {
                *stats.category_awbs.entry(*category).or_insert(0) += count;
            }
        }

        info!(
            input = stats.input_records,
            duplicates = stats.duplicates,
            zero_weight = stats.zero_weight,
            missing_flight_key = stats.missing_flight_key,
            flights = stats.flights,
            diagnostics = diagnostics.len(),
            duration_ms = start.elapsed().as_millis(),
            "pipeline complete"
        );

        Ok(PipelineOutput {
            rows: aggregation.rows,
            diagnostics,
            stats,
        })
    }
}

/// Runs the pipeline once with `config`.
pub fn run(
    fields_present: &BTreeSet<RawField>,
    records: &[RawRecord],
    config: &ReportConfig,
) -> Result<PipelineOutput> {
    Pipeline::new(config).run(fields_present, records)
}
