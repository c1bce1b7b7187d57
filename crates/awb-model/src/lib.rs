//! Shared data model for the air waybill cargo report.

pub mod aggregate;
pub mod category;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod keys;
pub mod record;

pub use aggregate::AggregateRow;
pub use category::{Category, RouteCategory};
pub use config::{
    ChainRule, ClassificationConfig, CommodityConfig, CommodityKeywords, ConflictPolicy,
    DateOrder, DedupeConfig, HeaderAlias, IngestConfig, NormalizeOptions, PipelineConfig,
    ReportConfig, RouteConfig, RouteRule, SignalRule,
};
pub use diagnostics::{
    CategoryConflict, ConflictSource, DiagnosticEntry, DiagnosticKind, DuplicateEntry,
    TransitConflict, UnclassifiedEntry,
};
pub use error::{ModelError, Result};
pub use field::RawField;
pub use keys::{DuplicateField, DuplicateKey, KeyPart};
pub use record::{FlightKey, NormalizedRecord, RawRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_entry_serializes_with_kind_tag() {
        let entry = DiagnosticEntry::Unclassified(UnclassifiedEntry {
            awb: "12345678".to_string(),
            nature_goods: "SPARE PARTS".to_string(),
            shcs: String::new(),
            import_status: "RCF".to_string(),
            awb_dest: "DAR".to_string(),
            weight: 12.5,
        });
        let json = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(json["kind"], "unclassified");
        assert_eq!(json["awb"], "12345678");
        assert_eq!(entry.kind(), DiagnosticKind::Unclassified);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = ReportConfig {
            classification: ClassificationConfig::extended(),
            ..ReportConfig::default()
        };
        let text = toml::to_string(&config).expect("serialize");
        let parsed: ReportConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}
