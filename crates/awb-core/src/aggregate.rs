//! Aggregation Engine.
//!
//! Kept, classified line-items are partitioned by [`FlightKey`], then by AWB.
//! Each waybill resolves to one category; its whole weight goes to that
//! category and it is counted once, unless the category is postal mail.
//! Line-items without an AWB number are weighed but never counted.
//!
//! Accumulators are local to one call and one flight.

use std::collections::{BTreeMap, BTreeSet};

use awb_model::{
    AggregateRow, Category, CategoryConflict, ConflictSource, DiagnosticEntry, FlightKey,
    NormalizedRecord,
};
use awb_transform::RouteTable;

use crate::classify::CategoryRanking;

/// Rows ordered by flight key, plus what aggregation observed on the way.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub rows: Vec<AggregateRow>,
    /// Line-item disagreements within one waybill.
    pub conflicts: Vec<DiagnosticEntry>,
    /// Distinct AWB numbers across all flights whose category is not mail.
    pub distinct_awbs: BTreeSet<String>,
    /// Records skipped for a missing flight key or zero weight.
    pub skipped: usize,
    /// Category each waybill resolved to, per flight.
    pub resolved: BTreeMap<FlightKey, BTreeMap<String, Category>>,
}

impl Aggregation {
    /// Category the record's waybill resolved to; `None` for blank AWBs and
    /// records that were not aggregated.
    pub fn resolved_category(&self, record: &NormalizedRecord) -> Option<Category> {
        if !record.has_awb() {
            return None;
        }
        let key = record.flight_key()?;
        self.resolved.get(&key)?.get(record.awb.as_str()).copied()
    }
}

#[derive(Debug, Default)]
struct AwbGroup {
    /// Categories in first-seen order, without repeats.
    categories: Vec<Category>,
    weight: f64,
    descriptions: Vec<String>,
    shcs: Vec<String>,
}

impl AwbGroup {
    fn add(&mut self, record: &NormalizedRecord, category: Category) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self.weight += record.weight;
        push_distinct(&mut self.descriptions, &record.nature_goods);
        push_distinct(&mut self.shcs, &record.shc_raw);
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

#[derive(Debug, Default)]
struct FlightAccumulator {
    awbs: BTreeMap<String, AwbGroup>,
    /// Weight of line-items with no AWB number, by category.
    anonymous: BTreeMap<Category, f64>,
    line_items: usize,
}

pub struct Aggregator<'a> {
    ranking: &'a CategoryRanking,
    routes: &'a RouteTable,
}

impl<'a> Aggregator<'a> {
    pub fn new(ranking: &'a CategoryRanking, routes: &'a RouteTable) -> Self {
        Self { ranking, routes }
    }

    /// Rolls classified line-items up to one row per flight.
    pub fn aggregate<'r, I>(&self, records: I) -> Aggregation
    where
        I: IntoIterator<Item = (&'r NormalizedRecord, Category)>,
    {
        let mut flights: BTreeMap<FlightKey, FlightAccumulator> = BTreeMap::new();
        let mut aggregation = Aggregation::default();

        for (record, category) in records {
            let key = match record.flight_key() {
                Some(key) if record.weight != 0.0 => key,
                _ => {
                    aggregation.skipped += 1;
                    continue;
                }
            };
            let flight = flights.entry(key).or_default();
            flight.line_items += 1;
            if record.has_awb() {
                flight
                    .awbs
                    .entry(record.awb.clone())
                    .or_default()
                    .add(record, category);
            } else {
                *flight.anonymous.entry(category).or_insert(0.0) += record.weight;
            }
        }

        for (key, flight) in flights {
            let row = self.build_row(key, flight, &mut aggregation);
            aggregation.rows.push(row);
        }
        aggregation
    }

    fn build_row(
        &self,
        key: FlightKey,
        flight: FlightAccumulator,
        aggregation: &mut Aggregation,
    ) -> AggregateRow {
        let mut weights: BTreeMap<Category, f64> = BTreeMap::new();
        let mut awb_counts: BTreeMap<Category, usize> = BTreeMap::new();
        let mut resolved_awbs: BTreeMap<String, Category> = BTreeMap::new();

        for (awb, group) in flight.awbs {
            let resolved = self
                .ranking
                .resolve(&group.categories)
                .unwrap_or(Category::GeneralCargo);
            if group.categories.len() > 1 {
                aggregation
                    .conflicts
                    .push(DiagnosticEntry::CategoryConflict(CategoryConflict {
                        source: ConflictSource::LineItems,
                        awb: awb.clone(),
                        flight: Some(key.clone()),
                        candidates: group.categories.clone(),
                        resolved,
                        nature_goods: group.descriptions.join("; "),
                        shcs: group.shcs.join("; "),
                    }));
            }
            *weights.entry(resolved).or_insert(0.0) += group.weight;
            resolved_awbs.insert(awb.clone(), resolved);
            if !resolved.is_mail() {
                *awb_counts.entry(resolved).or_insert(0) += 1;
                aggregation.distinct_awbs.insert(awb);
            }
        }

        for (category, weight) in flight.anonymous {
            *weights.entry(category).or_insert(0.0) += weight;
        }

        aggregation.resolved.insert(key.clone(), resolved_awbs);
        let total_weight = weights.values().sum();
        let total_awbs = awb_counts.values().sum();
        AggregateRow {
            route: key.route(),
            route_category: self.routes.category(&key.carrier, &key.flight_no),
            key,
            weights,
            awb_counts,
            total_weight,
            total_awbs,
            line_items: flight.line_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::test_support::{RecordExt, record};
    use awb_model::RouteCategory;

    fn run(records: &[(NormalizedRecord, Category)]) -> Aggregation {
        let classifier = Classifier::default();
        let routes = RouteTable::default();
        Aggregator::new(classifier.ranking(), &routes)
            .aggregate(records.iter().map(|(record, category)| (record, *category)))
    }

    #[test]
    fn mail_is_weighed_but_not_counted() {
        let records: Vec<_> = (0..3)
            .map(|_| (record("MAL900", 50.0), Category::PostalMail))
            .collect();
        let aggregation = run(&records);
        assert_eq!(aggregation.rows.len(), 1);
        let row = &aggregation.rows[0];
        assert_eq!(row.weight(Category::PostalMail), 150.0);
        assert_eq!(row.awb_count(Category::PostalMail), 0);
        assert_eq!(row.total_weight, 150.0);
        assert_eq!(row.total_awbs, 0);
        assert_eq!(row.line_items, 3);
        assert!(aggregation.distinct_awbs.is_empty());
    }

    #[test]
    fn split_waybill_counts_once() {
        let records = vec![
            (record("111", 10.0).uld("AKE1"), Category::PerishableCold),
            (record("111", 15.0).uld("AKE2"), Category::PerishableCold),
            (record("222", 5.0), Category::GeneralCargo),
        ];
        let row = run(&records).rows.remove(0);
        assert_eq!(row.weight(Category::PerishableCold), 25.0);
        assert_eq!(row.awb_count(Category::PerishableCold), 1);
        assert_eq!(row.awb_count(Category::GeneralCargo), 1);
        assert_eq!(row.total_awbs, 2);
        assert_eq!(row.total_weight, 30.0);
        assert_eq!(row.route, "NBO-DAR");
        assert_eq!(row.route_category, RouteCategory::Domestic);
    }

    #[test]
    fn disagreeing_line_items_resolve_by_rank() {
        let records = vec![
            (record("111", 10.0).nature("bolts"), Category::GeneralCargo),
            (record("111", 4.0).shc("DGR"), Category::DangerousGoods),
        ];
        let aggregation = run(&records);
        let row = &aggregation.rows[0];
        assert_eq!(row.weight(Category::DangerousGoods), 14.0);
        assert_eq!(row.weight(Category::GeneralCargo), 0.0);
        assert_eq!(row.awb_count(Category::DangerousGoods), 1);
        assert_eq!(aggregation.conflicts.len(), 1);
        match &aggregation.conflicts[0] {
            DiagnosticEntry::CategoryConflict(conflict) => {
                assert_eq!(conflict.source, ConflictSource::LineItems);
                assert_eq!(
                    conflict.candidates,
                    vec![Category::GeneralCargo, Category::DangerousGoods]
                );
                assert_eq!(conflict.resolved, Category::DangerousGoods);
                assert_eq!(conflict.nature_goods, "BOLTS");
            }
            other => panic!("unexpected diagnostic {other:?}"),
        }
    }

    #[test]
    fn commodity_outranks_its_coarse_parent() {
        let records = vec![
            (record("111", 10.0).nature("frozen beef"), Category::Meat),
            (record("111", 5.0).nature("frozen goods"), Category::PerishableCold),
        ];
        let aggregation = run(&records);
        let row = &aggregation.rows[0];
        assert_eq!(row.weight(Category::Meat), 15.0);
        assert_eq!(row.weight(Category::PerishableCold), 0.0);
        assert_eq!(row.awb_count(Category::Meat), 1);
        assert_eq!(aggregation.conflicts.len(), 1);
        assert!(matches!(
            &aggregation.conflicts[0],
            DiagnosticEntry::CategoryConflict(conflict) if conflict.resolved == Category::Meat
        ));
        assert_eq!(
            aggregation.resolved_category(&records[1].0),
            Some(Category::Meat)
        );
        assert_eq!(aggregation.resolved_category(&record("999", 1.0)), None);
    }

    #[test]
    fn blank_awb_is_weighed_not_counted() {
        let records = vec![
            (record("", 7.5), Category::GeneralCargo),
            (record("", 2.5), Category::GeneralCargo),
        ];
        let aggregation = run(&records);
        let row = &aggregation.rows[0];
        assert_eq!(row.weight(Category::GeneralCargo), 10.0);
        assert_eq!(row.total_awbs, 0);
        assert!(aggregation.distinct_awbs.is_empty());
    }

    #[test]
    fn rows_are_ordered_by_flight_key() {
        let records = vec![
            (record("1", 1.0).flight("TC300"), Category::GeneralCargo),
            (record("2", 1.0).flight("TC100"), Category::GeneralCargo),
            (record("3", 0.0).flight("TC200"), Category::GeneralCargo),
        ];
        let aggregation = run(&records);
        let flights: Vec<&str> = aggregation
            .rows
            .iter()
            .map(|row| row.key.flight_no.as_str())
            .collect();
        assert_eq!(flights, vec!["TC100", "TC300"]);
        assert_eq!(aggregation.skipped, 1);
        assert_eq!(aggregation.distinct_awbs.len(), 2);
    }
}
