//! Diagnostics Collector.

use awb_model::{
    CategoryConflict, DiagnosticEntry, DiagnosticKind, DuplicateEntry, TransitConflict,
    UnclassifiedEntry,
};
use serde::Serialize;

/// Diagnostic streams in first-produced order.
///
/// Entries are never deduplicated; suppressing repeats across runs is left to
/// whoever persists the logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    duplicates: Vec<DuplicateEntry>,
    transit_conflicts: Vec<TransitConflict>,
    unclassified: Vec<UnclassifiedEntry>,
    category_conflicts: Vec<CategoryConflict>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the entry to the stream matching its kind.
    pub fn push(&mut self, entry: DiagnosticEntry) {
        match entry {
            DiagnosticEntry::Duplicate(entry) => self.duplicates.push(entry),
            DiagnosticEntry::TransitConflict(entry) => self.transit_conflicts.push(entry),
            DiagnosticEntry::Unclassified(entry) => self.unclassified.push(entry),
            DiagnosticEntry::CategoryConflict(entry) => self.category_conflicts.push(entry),
        }
    }

    pub fn duplicates(&self) -> &[DuplicateEntry] {
        &self.duplicates
    }

    pub fn transit_conflicts(&self) -> &[TransitConflict] {
        &self.transit_conflicts
    }

    pub fn unclassified(&self) -> &[UnclassifiedEntry] {
        &self.unclassified
    }

    pub fn category_conflicts(&self) -> &[CategoryConflict] {
        &self.category_conflicts
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        match kind {
            DiagnosticKind::Duplicate => self.duplicates.len(),
            DiagnosticKind::TransitConflict => self.transit_conflicts.len(),
            DiagnosticKind::Unclassified => self.unclassified.len(),
            DiagnosticKind::CategoryConflict => self.category_conflicts.len(),
        }
    }

    /// Total entries across all streams.
    pub fn len(&self) -> usize {
        self.duplicates.len()
            + self.transit_conflicts.len()
            + self.unclassified.len()
            + self.category_conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<DiagnosticEntry> for Diagnostics {
    fn extend<I: IntoIterator<Item = DiagnosticEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn entries_are_routed_by_kind_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.extend([
            DiagnosticEntry::Duplicate(DuplicateEntry::from_record(&record("A", 1.0))),
            DiagnosticEntry::Unclassified(UnclassifiedEntry {
                awb: "B".to_string(),
                nature_goods: "BOLTS".to_string(),
                shcs: String::new(),
                import_status: String::new(),
                awb_dest: String::new(),
                weight: 2.0,
            }),
            DiagnosticEntry::Duplicate(DuplicateEntry::from_record(&record("C", 1.0))),
        ]);
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::Duplicate), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::TransitConflict), 0);
        let awbs: Vec<&str> = diagnostics
            .duplicates()
            .iter()
            .map(|entry| entry.awb.as_str())
            .collect();
        assert_eq!(awbs, vec!["A", "C"]);
        assert_eq!(diagnostics.unclassified()[0].nature_goods, "BOLTS");
    }
}
