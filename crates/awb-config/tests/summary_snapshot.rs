use std::fs;

use awb_config::{ConfigError, ConfigSummary, load_config};

#[test]
fn default_summary_snapshot_is_stable() {
    let loaded = load_config(None).expect("defaults load");
    let mut summary = ConfigSummary::from_loaded(&loaded);
    assert_eq!(summary.fingerprint.len(), 64);
    summary.fingerprint = "[fingerprint]".to_string();

    insta::assert_json_snapshot!(summary, @r#"
    {
      "schema": "awb-report.config-summary",
      "schema_version": 1,
      "source": null,
      "fingerprint": "[fingerprint]",
      "station": "DAR",
      "chain": [
        {
          "rule": "transit",
          "category": "TRANSIT",
          "shc_codes": 0,
          "keywords": 0
        },
        {
          "rule": "mail_prefix",
          "category": "POSTAL_MAIL",
          "shc_codes": 0,
          "keywords": 0
        },
        {
          "rule": "signals",
          "category": "COURIER",
          "shc_codes": 1,
          "keywords": 1
        },
        {
          "rule": "signals",
          "category": "PERISHABLE_COLD",
          "shc_codes": 9,
          "keywords": 12
        },
        {
          "rule": "signals",
          "category": "DANGEROUS_GOODS",
          "shc_codes": 9,
          "keywords": 1
        }
      ],
      "generic_terms": 6,
      "commodities": null,
      "dedupe_key": [
        "flight_date",
        "flight_no",
        "awb",
        "pieces",
        "weight",
        "uld",
        "nature_goods",
        "shcs"
      ],
      "excluded_statuses": [
        "ACC",
        "MIS",
        "NOT"
      ],
      "route_rules": 3,
      "default_route": "FOREIGN"
    }
    "#);
}

#[test]
fn file_overrides_are_loaded_and_fingerprinted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.toml");
    fs::write(
        &path,
        r#"
[classification]
station = "ZNZ"

[classification.commodities]
conflict_policy = "prefer_description"
"#,
    )
    .unwrap();

    let loaded = load_config(Some(&path)).unwrap();
    let defaults = load_config(None).unwrap();
    assert_eq!(loaded.config.classification.station, "ZNZ");
    assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    assert_ne!(loaded.fingerprint, defaults.fingerprint);

    let summary = ConfigSummary::from_loaded(&loaded);
    let commodities = summary.commodities.expect("commodity summary");
    assert_eq!(commodities.conflict_policy, "prefer_description");
    assert_eq!(commodities.keyword_groups, 7);
}

#[test]
fn malformed_and_invalid_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[classification\nstation = ").unwrap();
    assert!(matches!(
        load_config(Some(&broken)),
        Err(ConfigError::Toml { .. })
    ));

    let invalid = dir.path().join("invalid.toml");
    fs::write(&invalid, "[classification]\nstation = \"  \"\n").unwrap();
    let err = load_config(Some(&invalid)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("classification.station"));

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        load_config(Some(&missing)),
        Err(ConfigError::Io { .. })
    ));
}
