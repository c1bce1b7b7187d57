//! Property tests for the aggregation invariants.

use std::collections::{BTreeMap, BTreeSet};

use awb_core::{Classifier, dedupe, run};
use awb_model::{Category, DuplicateField, FlightKey, RawField, RawRecord, ReportConfig};
use awb_transform::Normalizer;
use proptest::prelude::*;

fn line_item() -> impl Strategy<Value = RawRecord> {
    (
        prop::sample::select(vec!["TC100", "TC215", "PW717", "KQ484"]),
        prop::sample::select(vec!["", "MAL900", "MAL901", "1111", "2222", "3333"]),
        prop::sample::select(vec!["0", "1.5", "10", "25", "40.25", "bad"]),
        prop::sample::select(vec!["", "CKD", "RCF", "CKD RCF"]),
        prop::sample::select(vec!["", "DAR", "NBO"]),
        prop::sample::select(vec!["", "fresh fish", "spare parts", "general cargo", "courier"]),
        prop::sample::select(vec!["", "PER", "DGR", "COU", "MAL COU", "PES,PEM"]),
        prop::sample::select(vec!["", "AKE1", "AKE2"]),
    )
        .prop_map(|(flight, awb, weight, status, dest, nature, shcs, uld)| {
            let mut record = RawRecord::default();
            record.set(RawField::FlightDate, "2024-01-05");
            record.set(RawField::Carrier, &flight[..2]);
            record.set(RawField::FlightNo, flight);
            record.set(RawField::Origin, "NBO");
            record.set(RawField::Dest, "DAR");
            record.set(RawField::Awb, awb);
            record.set(RawField::Pieces, "1");
            record.set(RawField::Weight, weight);
            record.set(RawField::Uld, uld);
            record.set(RawField::ImportStatus, status);
            record.set(RawField::AwbDest, dest);
            record.set(RawField::NatureGoods, nature);
            record.set(RawField::Shcs, shcs);
            record
        })
}

fn all_fields() -> BTreeSet<RawField> {
    RawField::ALL.into_iter().collect()
}

/// Generated batches may have no AWB at all; the structural check is
/// covered elsewhere.
fn config() -> ReportConfig {
    let mut config = ReportConfig::default();
    config.pipeline.required_fields.clear();
    config
}

fn kept_weight_by_flight(records: &[RawRecord]) -> BTreeMap<FlightKey, f64> {
    let (normalized, _) = Normalizer::default().normalize_all(records);
    let kept = dedupe(normalized, &DuplicateField::DEFAULT_KEY).kept;
    let mut weights = BTreeMap::new();
    for record in kept {
        if let Some(key) = record.flight_key() {
            if record.weight != 0.0 {
                *weights.entry(key).or_insert(0.0) += record.weight;
            }
        }
    }
    weights
}

proptest! {
    #[test]
    fn weight_is_conserved_per_flight(records in prop::collection::vec(line_item(), 0..40)) {
        let output = run(&all_fields(), &records, &config()).unwrap();
        let expected = kept_weight_by_flight(&records);
        prop_assert_eq!(output.rows.len(), expected.len());
        for row in &output.rows {
            let categories: f64 = row.weights.values().sum();
            prop_assert!((categories - row.total_weight).abs() < 1e-9);
            let input = expected.get(&row.key).copied().unwrap_or(f64::NAN);
            prop_assert!((row.total_weight - input).abs() < 1e-6);
        }
    }

    #[test]
    fn mail_never_counts_and_totals_match(records in prop::collection::vec(line_item(), 0..40)) {
        let output = run(&all_fields(), &records, &config()).unwrap();
        for row in &output.rows {
            prop_assert_eq!(row.awb_count(Category::PostalMail), 0);
            let non_mail: usize = row
                .awb_counts
                .iter()
                .filter(|(category, _)| !category.is_mail())
                .map(|(_, count)| *count)
                .sum();
            prop_assert_eq!(row.total_awbs, non_mail);
        }
    }

    #[test]
    fn each_waybill_counts_in_one_category(records in prop::collection::vec(line_item(), 0..40)) {
        let output = run(&all_fields(), &records, &config()).unwrap();
        let (normalized, _) = Normalizer::default().normalize_all(&records);
        for row in &output.rows {
            let waybills: BTreeSet<&str> = normalized
                .iter()
                .filter(|record| record.weight != 0.0 && record.has_awb())
                .filter(|record| record.flight_key().as_ref() == Some(&row.key))
                .map(|record| record.awb.as_str())
                .collect();
            prop_assert!(row.total_awbs <= waybills.len());
        }
    }

    #[test]
    fn dedupe_is_idempotent(records in prop::collection::vec(line_item(), 0..40)) {
        let (normalized, _) = Normalizer::default().normalize_all(&records);
        let once = dedupe(normalized, &DuplicateField::DEFAULT_KEY);
        let twice = dedupe(once.kept.clone(), &DuplicateField::DEFAULT_KEY);
        prop_assert!(twice.duplicates.is_empty());
        prop_assert_eq!(twice.kept, once.kept);
    }

    #[test]
    fn classification_is_deterministic(record in line_item()) {
        let normalized = Normalizer::default().normalize(&record);
        let classifier = Classifier::default();
        prop_assert_eq!(classifier.classify(&normalized), classifier.classify(&normalized));
        prop_assert_eq!(
            classifier.classify(&normalized).is_none(),
            normalized.weight == 0.0
        );
    }
}
