//! Tests for awb-model types.

use awb_model::{
    Category, ChainRule, ConflictPolicy, DateOrder, DuplicateField, RawField, ReportConfig,
    RouteCategory,
};

#[test]
fn partial_toml_keeps_defaults_for_missing_sections() {
    let config: ReportConfig = toml::from_str(
        r#"
[classification]
station = "ZNZ"

[normalize]
date_order = "month_first"
"#,
    )
    .expect("parse config");

    assert_eq!(config.classification.station, "ZNZ");
    assert_eq!(config.classification.transit_status, "CKD");
    assert_eq!(config.classification.chain.len(), 5);
    assert_eq!(config.normalize.date_order, DateOrder::MonthFirst);
    assert_eq!(config.dedupe.key_fields, DuplicateField::DEFAULT_KEY.to_vec());
    assert!(config.ingest.excluded_statuses.contains("MIS"));
    assert_eq!(config.routes.default, RouteCategory::Foreign);
}

#[test]
fn chain_rules_parse_from_tagged_tables() {
    let config: ReportConfig = toml::from_str(
        r#"
[[classification.chain]]
rule = "mail_prefix"

[[classification.chain]]
rule = "signals"
category = "DANGEROUS_GOODS"
shc_codes = ["DGR"]

[[classification.chain]]
rule = "transit"
"#,
    )
    .expect("parse chain");

    let order: Vec<Category> = config
        .classification
        .chain
        .iter()
        .map(ChainRule::category)
        .collect();
    assert_eq!(
        order,
        vec![Category::PostalMail, Category::DangerousGoods, Category::Transit]
    );
    match &config.classification.chain[1] {
        ChainRule::Signals(rule) => {
            assert!(rule.shc_codes.contains("DGR"));
            assert!(rule.keywords.is_empty());
        }
        other => panic!("unexpected rule {other:?}"),
    }
}

#[test]
fn commodity_table_parses_with_policy() {
    let config: ReportConfig = toml::from_str(
        r#"
[classification.commodities]
conflict_policy = "prefer_shc"

[[classification.commodities.keywords]]
category = "FISH"
terms = ["samaki"]
"#,
    )
    .expect("parse commodities");

    let commodities = config.classification.commodities.expect("commodities");
    assert_eq!(commodities.conflict_policy, ConflictPolicy::PreferShc);
    assert_eq!(commodities.keywords.len(), 1);
    assert_eq!(commodities.shc_codes.get("PEM"), Some(&Category::Meat));
}

#[test]
fn labels_parse_back_to_categories() {
    for category in Category::CORE.into_iter().chain(Category::FINE_GRAINED) {
        assert_eq!(category.report_label().parse::<Category>(), Ok(category));
        assert_eq!(category.as_str().parse::<Category>(), Ok(category));
    }
    assert!("nonsense".parse::<Category>().is_err());
    assert_eq!("awb dest".parse::<RawField>(), Ok(RawField::AwbDest));
}
