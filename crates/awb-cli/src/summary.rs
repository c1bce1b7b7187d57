use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use awb_cli::pipeline::RunOutcome;
use awb_model::{Category, DiagnosticKind};

pub fn print_summary(outcome: &RunOutcome) {
    println!("Input: {}", outcome.input.display());
    match &outcome.config_source {
        Some(path) => println!("Config: {}", path.display()),
        None => println!("Config: built-in defaults"),
    }
    match &outcome.report {
        Some(path) => println!("Report: {}", path.display()),
        None => println!("Report: not written (dry run)"),
    }
    if let Some(first) = outcome.log_files.first()
        && let Some(dir) = first.parent()
    {
        println!("Diagnostic logs: {}", dir.display());
    }

    println!("{}", counts_table(outcome));
    println!("{}", category_table(outcome));
    print_diagnostics(outcome);
}

fn counts_table(outcome: &RunOutcome) -> Table {
    let prefilter = &outcome.prefilter;
    let stats = &outcome.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: [(&str, usize); 8] = [
        ("Rows read", prefilter.input),
        ("Removed by import status", prefilter.excluded_status),
        ("Removed for missing flight identity", prefilter.missing_identity),
        ("Duplicates removed", stats.duplicates),
        ("Zero weight", stats.zero_weight),
        ("Unusable flight date", stats.missing_flight_key),
        ("Classified", stats.classified),
        ("Flights", stats.flights),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count)]);
    }
    table.add_row(vec![
        Cell::new("Distinct AWBs (mail excluded)").add_attribute(Attribute::Bold),
        Cell::new(stats.distinct_awbs).add_attribute(Attribute::Bold),
    ]);
    table
}

fn category_table(outcome: &RunOutcome) -> Table {
    let stats = &outcome.stats;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Column"),
        header_cell("Weight"),
        header_cell("AWBs"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for category in outcome.layout.categories() {
        let awbs = if category.is_mail() {
            dim_cell("excluded")
        } else {
            count_cell(stats.awbs(*category))
        };
        table.add_row(vec![
            Cell::new(category.as_str()),
            Cell::new(category.report_label()),
            weight_cell(stats.weight(*category)),
            awbs,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{:.3}", stats.total_weight)).add_attribute(Attribute::Bold),
        Cell::new(stats.distinct_awbs).add_attribute(Attribute::Bold),
    ]);
    table
}

fn print_diagnostics(outcome: &RunOutcome) {
    let diagnostics = &outcome.diagnostics;
    if diagnostics.is_empty() {
        println!("No diagnostics.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Diagnostic"), header_cell("Entries")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for kind in [
        DiagnosticKind::Duplicate,
        DiagnosticKind::TransitConflict,
        DiagnosticKind::Unclassified,
        DiagnosticKind::CategoryConflict,
    ] {
        let count = diagnostics.count(kind);
        let cell = if count > 0 {
            Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
        } else {
            dim_cell(count)
        };
        table.add_row(vec![Cell::new(kind.as_str()), cell]);
    }
    println!("{table}");
}

/// Table for `awb-report categories`.
pub fn categories_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Weight column"),
        header_cell("AWB column"),
        header_cell("Set"),
    ]);
    apply_table_style(&mut table);
    for category in Category::CORE.iter().chain(Category::FINE_GRAINED.iter()) {
        table.add_row(vec![
            Cell::new(category.as_str()),
            Cell::new(category.report_label()),
            match category.awb_count_label() {
                Some(label) => Cell::new(label),
                None => dim_cell("never counted"),
            },
            Cell::new(if category.is_fine_grained() {
                "extended"
            } else {
                "core"
            }),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn weight_cell(weight: f64) -> Cell {
    if weight > 0.0 {
        Cell::new(format!("{weight:.3}"))
    } else {
        dim_cell("0")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
