//! Configuration for the cargo report pipeline.
//!
//! Keyword lists, SHC code sets, rule order and the duplicate key are
//! operational tuning data, so every one of them lives here rather than in
//! code. All sections default to the cargo import report used at the `DAR`
//! station; a TOML file only needs to name what it overrides.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::category::{Category, RouteCategory};
use crate::field::RawField;
use crate::keys::DuplicateField;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn string_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub classification: ClassificationConfig,
    pub dedupe: DedupeConfig,
    pub pipeline: PipelineConfig,
    pub ingest: IngestConfig,
    pub normalize: NormalizeOptions,
    pub routes: RouteConfig,
}

/// Classification rule chain and its keyword/code sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Reporting station; cargo bound elsewhere may be transit.
    pub station: String,
    /// Import-status token marking a transit candidate.
    pub transit_status: String,
    /// AWB prefix identifying postal mail.
    pub mail_awb_prefix: String,
    /// Descriptions that carry no information and never raise an
    /// unclassified diagnostic.
    pub generic_terms: Vec<String>,
    /// Ordered rule chain; the first matching rule wins.
    pub chain: Vec<ChainRule>,
    /// Fine-grained commodity table. `None` keeps the core category set.
    pub commodities: Option<CommodityConfig>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            station: "DAR".to_string(),
            transit_status: "CKD".to_string(),
            mail_awb_prefix: "MAL".to_string(),
            generic_terms: strings(&[
                "general cargo",
                "cargo",
                "general",
                "gen",
                "consol",
                "consolidation",
            ]),
            chain: vec![
                ChainRule::Transit,
                ChainRule::MailPrefix,
                ChainRule::Signals(SignalRule::courier()),
                ChainRule::Signals(SignalRule::perishable_cold()),
                ChainRule::Signals(SignalRule::dangerous_goods()),
            ],
            commodities: None,
        }
    }
}

impl ClassificationConfig {
    /// Default configuration with the fine-grained commodity table enabled.
    pub fn extended() -> Self {
        Self {
            commodities: Some(CommodityConfig::default()),
            ..Self::default()
        }
    }
}

/// One step of the classification chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ChainRule {
    /// Transit status token and a destination outside the station.
    Transit,
    /// AWB number starts with the mail prefix.
    MailPrefix,
    /// SHC code set or description keyword match.
    Signals(SignalRule),
}

impl ChainRule {
    /// Category this rule assigns.
    pub fn category(&self) -> Category {
        match self {
            ChainRule::Transit => Category::Transit,
            ChainRule::MailPrefix => Category::PostalMail,
            ChainRule::Signals(rule) => rule.category,
        }
    }
}

/// Matches when any SHC token is in `shc_codes` or the description contains
/// any of `keywords` (case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRule {
    pub category: Category,
    #[serde(default)]
    pub shc_codes: BTreeSet<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SignalRule {
    pub fn courier() -> Self {
        Self {
            category: Category::Courier,
            shc_codes: string_set(&["COU"]),
            keywords: strings(&["courier"]),
        }
    }

    pub fn perishable_cold() -> Self {
        Self {
            category: Category::PerishableCold,
            shc_codes: string_set(&[
                "COL", "FRO", "CRT", "ICE", "ERT", "PER", "PEF", "PES", "PEM",
            ]),
            keywords: strings(&[
                "perishable",
                "fresh",
                "chilled",
                "frozen",
                "cool",
                "cold",
                "flower",
                "fish",
                "meat",
                "vegetable",
                "fruit",
                "avocado",
            ]),
        }
    }

    pub fn dangerous_goods() -> Self {
        Self {
            category: Category::DangerousGoods,
            shc_codes: string_set(&[
                "DGR", "RRY", "RMD", "RPB", "RFL", "RCG", "RNG", "RIS", "RDS",
            ]),
            keywords: strings(&["dangerous"]),
        }
    }
}

/// How to resolve a disagreement between SHC and description commodities.
///
/// The disagreement is always logged; only the outcome differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Keep the coarse category the chain produced.
    #[default]
    Fallback,
    PreferDescription,
    PreferShc,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Fallback => "fallback",
            ConflictPolicy::PreferDescription => "prefer_description",
            ConflictPolicy::PreferShc => "prefer_shc",
        }
    }
}

/// Description keywords for one commodity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityKeywords {
    pub category: Category,
    pub terms: Vec<String>,
}

/// Fine-grained commodity table applied to general and perishable cargo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommodityConfig {
    /// Ordered description keyword table; the first matching entry wins.
    pub keywords: Vec<CommodityKeywords>,
    /// SHC code to commodity.
    pub shc_codes: BTreeMap<String, Category>,
    /// Preference when several SHC codes name different commodities.
    pub shc_priority: Vec<Category>,
    /// Terms that turn a fish description into crabs/lobster.
    pub shellfish_terms: Vec<String>,
    pub conflict_policy: ConflictPolicy,
}

impl Default for CommodityConfig {
    fn default() -> Self {
        let keywords = vec![
            CommodityKeywords {
                category: Category::Meat,
                terms: strings(&[
                    "meat", "beef", "goat", "mutton", "pork", "chicken", "nyama", "sheep",
                ]),
            },
            CommodityKeywords {
                category: Category::Fish,
                terms: strings(&["fish", "samaki", "tilapia", "sardines", "dagaa"]),
            },
            CommodityKeywords {
                category: Category::CrabsLobster,
                terms: strings(&["lobster", "crab", "kamba"]),
            },
            CommodityKeywords {
                category: Category::Flowers,
                terms: strings(&["flower", "rose", "maua", "carnation", "tulip"]),
            },
            CommodityKeywords {
                category: Category::Vegetables,
                terms: strings(&["vegetable", "veg", "mboga"]),
            },
            CommodityKeywords {
                category: Category::Avocado,
                terms: strings(&["avocado", "parachichi"]),
            },
            CommodityKeywords {
                category: Category::Valuables,
                terms: strings(&["valuable", "jewelry", "gold", "cash", "money"]),
            },
        ];
        let shc_codes = [
            ("PEM", Category::Meat),
            ("PES", Category::Fish),
            ("PEF", Category::Flowers),
            ("FLW", Category::Flowers),
            ("AVI", Category::Avocado),
            ("VAL", Category::Valuables),
        ]
        .into_iter()
        .map(|(code, category)| (code.to_string(), category))
        .collect();
        Self {
            keywords,
            shc_codes,
            shc_priority: vec![
                Category::Meat,
                Category::CrabsLobster,
                Category::Fish,
                Category::Flowers,
                Category::Avocado,
                Category::Valuables,
                Category::Vegetables,
            ],
            shellfish_terms: strings(&["lobster", "crab"]),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupeConfig {
    /// Fields forming the duplicate key, in order.
    pub key_fields: Vec<DuplicateField>,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            key_fields: DuplicateField::DEFAULT_KEY.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fields that must be present in the input; the run is refused when any
    /// of them is absent from the whole dataset.
    pub required_fields: Vec<RawField>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            required_fields: vec![
                RawField::FlightDate,
                RawField::Carrier,
                RawField::FlightNo,
                RawField::Awb,
                RawField::Weight,
            ],
        }
    }
}

/// Extra header spellings for one canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderAlias {
    pub field: RawField,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Import statuses dropped before the core runs.
    pub excluded_statuses: BTreeSet<String>,
    /// Fields that must be non-blank for a record to reach the core.
    pub identity_fields: Vec<RawField>,
    /// Additional header spellings, consulted after the built-in aliases.
    pub header_aliases: Vec<HeaderAlias>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            excluded_statuses: string_set(&["MIS", "ACC", "NOT"]),
            identity_fields: vec![RawField::FlightDate, RawField::Carrier, RawField::FlightNo],
            header_aliases: Vec::new(),
        }
    }
}

impl IngestConfig {
    /// Built-in aliases followed by configured ones, lower-cased.
    pub fn aliases_for(&self, field: RawField) -> Vec<String> {
        let mut aliases: Vec<String> = field
            .default_aliases()
            .iter()
            .map(|alias| alias.to_lowercase())
            .collect();
        for extra in self.header_aliases.iter().filter(|alias| alias.field == field) {
            aliases.extend(extra.names.iter().map(|name| name.trim().to_lowercase()));
        }
        aliases
    }
}

/// Interpretation of ambiguous numeric dates such as `05/01/2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub date_order: DateOrder,
}

/// Maps a carrier (and optionally flight number prefixes) to a route
/// category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub carrier: String,
    /// Empty matches every flight of the carrier.
    #[serde(default)]
    pub flight_prefixes: Vec<String>,
    pub category: RouteCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Ordered rules; the first match wins.
    pub rules: Vec<RouteRule>,
    pub default: RouteCategory,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                RouteRule {
                    carrier: "PW".to_string(),
                    flight_prefixes: Vec::new(),
                    category: RouteCategory::Domestic,
                },
                RouteRule {
                    carrier: "TC".to_string(),
                    flight_prefixes: strings(&["TC1"]),
                    category: RouteCategory::Domestic,
                },
                RouteRule {
                    carrier: "TC".to_string(),
                    flight_prefixes: strings(&["TC2", "TC4", "TC5"]),
                    category: RouteCategory::TcForeign,
                },
            ],
            default: RouteCategory::Foreign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chain_order() {
        let config = ClassificationConfig::default();
        let order: Vec<Category> = config.chain.iter().map(ChainRule::category).collect();
        assert_eq!(
            order,
            vec![
                Category::Transit,
                Category::PostalMail,
                Category::Courier,
                Category::PerishableCold,
                Category::DangerousGoods,
            ]
        );
        assert!(config.commodities.is_none());
        assert!(ClassificationConfig::extended().commodities.is_some());
    }

    #[test]
    fn aliases_include_configured_names() {
        let config = IngestConfig {
            header_aliases: vec![HeaderAlias {
                field: RawField::Weight,
                names: vec![" Gross KG ".to_string()],
            }],
            ..IngestConfig::default()
        };
        let aliases = config.aliases_for(RawField::Weight);
        assert_eq!(aliases.first().map(String::as_str), Some("weight"));
        assert_eq!(aliases.last().map(String::as_str), Some("gross kg"));
    }
}
