use std::fs;

use awb_core::Diagnostics;
use awb_model::{
    Category, CategoryConflict, ConflictSource, DiagnosticEntry, DuplicateEntry, FlightKey,
};
use awb_report::{
    CATEGORY_CONFLICTS_FILE, DIAGNOSTICS_JSON_FILE, DUPLICATES_FILE, RunHeader,
    TRANSIT_CONFLICTS_FILE, UNCLASSIFIED_FILE, render_category_conflicts, render_duplicates,
    render_transit_conflicts, write_diagnostic_logs,
};
use chrono::NaiveDate;
use tempfile::TempDir;

fn header() -> RunHeader {
    RunHeader {
        generated_at: NaiveDate::from_ymd_opt(2024, 1, 6)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap(),
        input: "exports/2024-01-05.csv".into(),
        input_fingerprint: "abc123".to_string(),
        config_fingerprint: "def456".to_string(),
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

fn diagnostics() -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(DiagnosticEntry::Duplicate(DuplicateEntry {
        flight_date: Some(date()),
        flight_no: "TC100".to_string(),
        awb: "12345678".to_string(),
        pieces: 2,
        weight: 40.5,
        uld: "AKE1".to_string(),
        nature_goods: "SPARE PARTS".to_string(),
        shcs: "GEN".to_string(),
        import_status: "RCF".to_string(),
        awb_dest: "DAR".to_string(),
    }));
    diagnostics.push(DiagnosticEntry::CategoryConflict(CategoryConflict {
        source: ConflictSource::LineItems,
        awb: "777".to_string(),
        flight: Some(FlightKey {
            date: date(),
            carrier: "TC".to_string(),
            flight_no: "TC100".to_string(),
            origin: "NBO".to_string(),
            dest: "DAR".to_string(),
        }),
        candidates: vec![Category::GeneralCargo, Category::DangerousGoods],
        resolved: Category::DangerousGoods,
        nature_goods: "BOLTS".to_string(),
        shcs: "DGR".to_string(),
    }));
    diagnostics
}

/// Tabs shown as pipes so the snapshots stay readable.
fn visible(text: &str) -> String {
    text.replace('\t', " | ")
}

#[test]
fn duplicate_log_snapshot() {
    let text = render_duplicates(&header(), diagnostics().duplicates());
    insta::assert_snapshot!(visible(&text), @r"
    ==== Run on 2024-01-06 08:30:00 ====
    Input: exports/2024-01-05.csv
    Input SHA-256: abc123
    Config SHA-256: def456

    Flight_Date | Flight_No | AWB | Pieces | Weight | ULD | Nature_Goods | SHCs | Import_Status | AWB_Dest
    2024-01-05 | TC100 | 12345678 | 2 | 40.5 | AKE1 | SPARE PARTS | GEN | RCF | DAR
    ");
}

#[test]
fn empty_transit_log_snapshot() {
    let text = render_transit_conflicts(&header(), diagnostics().transit_conflicts());
    insta::assert_snapshot!(visible(&text), @r"
    ==== Run on 2024-01-06 08:30:00 ====
    Input: exports/2024-01-05.csv
    Input SHA-256: abc123
    Config SHA-256: def456

    No transit conflicts found.
    ");
}

#[test]
fn category_conflict_log_snapshot() {
    let text = render_category_conflicts(&header(), diagnostics().category_conflicts());
    insta::assert_snapshot!(visible(&text), @r"
    ==== Run on 2024-01-06 08:30:00 ====
    Input: exports/2024-01-05.csv
    Input SHA-256: abc123
    Config SHA-256: def456

    AWB | Source | Flight | Candidates | Resolved | Nature_Goods | SHCs
    777 | line_items | 2024-01-05 TC100 NBO-DAR | GENERAL_CARGO,DANGEROUS_GOODS | DANGEROUS_GOODS | BOLTS | DGR
    ");
}

#[test]
fn writes_every_log_file() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("logs");

    let written = write_diagnostic_logs(&logs, &diagnostics(), &header()).unwrap();

    assert_eq!(written.len(), 5);
    for name in [
        DUPLICATES_FILE,
        TRANSIT_CONFLICTS_FILE,
        UNCLASSIFIED_FILE,
        CATEGORY_CONFLICTS_FILE,
        DIAGNOSTICS_JSON_FILE,
    ] {
        assert!(logs.join(name).is_file(), "missing {name}");
    }
    let unclassified = fs::read_to_string(logs.join(UNCLASSIFIED_FILE)).unwrap();
    assert!(unclassified.ends_with("No unclassified AWBs found.\n"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(logs.join(DIAGNOSTICS_JSON_FILE)).unwrap())
            .unwrap();
    assert_eq!(json["run"]["input_fingerprint"], "abc123");
    assert_eq!(json["streams"]["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(json["streams"]["duplicates"][0]["awb"], "12345678");
    assert_eq!(
        json["streams"]["category_conflicts"][0]["resolved"],
        "DANGEROUS_GOODS"
    );
    assert!(json["streams"]["unclassified"].as_array().unwrap().is_empty());
}
