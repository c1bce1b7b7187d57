//! Flight report as a polars frame and its CSV serialization.

use std::fs::{self, File};
use std::path::Path;

use awb_model::AggregateRow;
use polars::prelude::{Column, CsvWriter, DataFrame, NamedFrom, SerWriter, Series};
use tracing::info;

use crate::error::{ReportError, Result};
use crate::layout::{
    AIRLINE_COLUMN, AWB_TOTAL_COLUMN, DATE_COLUMN, FLIGHT_NO_COLUMN, ROUTE_CATEGORY_COLUMN,
    ROUTE_COLUMN, ReportLayout, TOTAL_WEIGHT_COLUMN,
};

/// Report weights carry three decimals; sums of fractional kilograms
/// otherwise print with float noise.
fn round_weight(weight: f64) -> f64 {
    (weight * 1000.0).round() / 1000.0
}

/// Sum of the rounded category cells, so the written total always equals
/// the sum of the written columns.
fn rounded_total(row: &AggregateRow, layout: &ReportLayout) -> f64 {
    let total: f64 = layout
        .categories()
        .iter()
        .map(|category| round_weight(row.weight(*category)))
        .sum();
    round_weight(total)
}

fn text_column(name: &str, values: Vec<String>) -> Column {
    Series::new(name.into(), values).into()
}

fn weight_column(name: &str, values: Vec<f64>) -> Column {
    Series::new(name.into(), values).into()
}

fn count_column(name: &str, values: Vec<u64>) -> Column {
    Series::new(name.into(), values).into()
}

/// One frame row per aggregate row, columns in [`ReportLayout::column_names`]
/// order.
pub fn build_report_frame(rows: &[AggregateRow], layout: &ReportLayout) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(layout.column_names().len());
    columns.push(text_column(
        DATE_COLUMN,
        rows.iter()
            .map(|row| row.key.date.format("%Y-%m-%d").to_string())
            .collect(),
    ));
    columns.push(text_column(
        AIRLINE_COLUMN,
        rows.iter().map(|row| row.key.carrier.clone()).collect(),
    ));
    columns.push(text_column(
        FLIGHT_NO_COLUMN,
        rows.iter().map(|row| row.key.flight_no.clone()).collect(),
    ));
    columns.push(text_column(
        ROUTE_COLUMN,
        rows.iter().map(|row| row.route.clone()).collect(),
    ));
    columns.push(text_column(
        ROUTE_CATEGORY_COLUMN,
        rows.iter()
            .map(|row| row.route_category.as_str().to_string())
            .collect(),
    ));

    for category in layout.categories() {
        columns.push(weight_column(
            category.report_label(),
            rows.iter()
                .map(|row| round_weight(row.weight(*category)))
                .collect(),
        ));
    }
    for (category, label) in layout.counted_categories() {
        columns.push(count_column(
            label,
            rows.iter().map(|row| row.awb_count(category) as u64).collect(),
        ));
    }

    columns.push(count_column(
        AWB_TOTAL_COLUMN,
        rows.iter().map(|row| row.total_awbs as u64).collect(),
    ));
    columns.push(weight_column(
        TOTAL_WEIGHT_COLUMN,
        rows.iter().map(|row| rounded_total(row, layout)).collect(),
    ));

    DataFrame::new(columns).map_err(|source| ReportError::Frame { source })
}

/// Writes the flight report, creating the parent directory when needed.
pub fn write_report_csv(path: &Path, rows: &[AggregateRow], layout: &ReportLayout) -> Result<()> {
    let mut frame = build_report_frame(rows, layout)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::io(parent, source))?;
    }
    let mut file = File::create(path).map_err(|source| ReportError::io(path, source))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "report written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_rounded_to_grams() {
        assert_eq!(round_weight(0.1 + 0.2), 0.3);
        assert_eq!(round_weight(40.5), 40.5);
    }

    #[test]
    fn empty_report_keeps_every_column() {
        let frame = build_report_frame(&[], &ReportLayout::core()).unwrap();
        assert_eq!(frame.height(), 0);
        let names: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, ReportLayout::core().column_names());
    }
}
