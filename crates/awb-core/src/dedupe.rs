//! Deduplication Filter.

use std::collections::HashSet;

use awb_model::{DiagnosticEntry, DuplicateEntry, DuplicateField, DuplicateKey, NormalizedRecord};

/// Records split into the kept set and the duplicates dropped from it.
#[derive(Debug, Clone, Default)]
pub struct DedupeOutcome {
    pub kept: Vec<NormalizedRecord>,
    /// One `Duplicate` entry per dropped record, in input order.
    pub duplicates: Vec<DiagnosticEntry>,
}

/// Keeps the first record of every duplicate group in input order.
///
/// Two records are duplicates when their keys over `key_fields` are equal.
/// Order is preserved, so re-running on the same input keeps the same
/// records.
pub fn dedupe(records: Vec<NormalizedRecord>, key_fields: &[DuplicateField]) -> DedupeOutcome {
    let mut seen: HashSet<DuplicateKey> = HashSet::with_capacity(records.len());
    let mut outcome = DedupeOutcome {
        kept: Vec::with_capacity(records.len()),
        duplicates: Vec::new(),
    };
    for record in records {
        if seen.insert(DuplicateKey::from_record(&record, key_fields)) {
            outcome.kept.push(record);
        } else {
            outcome
                .duplicates
                .push(DiagnosticEntry::Duplicate(DuplicateEntry::from_record(&record)));
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordExt, record};

    #[test]
    fn first_occurrence_wins() {
        let records = vec![
            record("111", 10.0).uld("AKE1").nature("one"),
            record("111", 10.0).uld("AKE2"),
            record("111", 10.0).uld("AKE1").nature("one"),
            record("222", 10.0),
        ];
        let outcome = dedupe(records.clone(), &DuplicateField::DEFAULT_KEY);
        assert_eq!(outcome.kept, vec![records[0].clone(), records[1].clone(), records[3].clone()]);
        assert_eq!(outcome.duplicates.len(), 1);
        match &outcome.duplicates[0] {
            DiagnosticEntry::Duplicate(entry) => {
                assert_eq!(entry.awb, "111");
                assert_eq!(entry.uld, "AKE1");
                assert_eq!(entry.nature_goods, "ONE");
            }
            other => panic!("unexpected diagnostic {other:?}"),
        }
    }

    #[test]
    fn carrier_is_not_part_of_the_default_key() {
        let mut other_carrier = record("111", 10.0);
        other_carrier.carrier = "PW".to_string();
        let outcome = dedupe(
            vec![record("111", 10.0), other_carrier],
            &DuplicateField::DEFAULT_KEY,
        );
        assert_eq!(outcome.kept.len(), 1);
    }

    #[test]
    fn second_pass_finds_nothing() {
        let records = vec![record("1", 1.0), record("1", 1.0), record("2", 1.0)];
        let once = dedupe(records, &DuplicateField::DEFAULT_KEY);
        let twice = dedupe(once.kept.clone(), &DuplicateField::DEFAULT_KEY);
        assert!(twice.duplicates.is_empty());
        assert_eq!(twice.kept, once.kept);
    }
}
