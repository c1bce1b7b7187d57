use std::path::PathBuf;

use awb_model::ChainRule;

use crate::loader::LoadedConfig;

/// Condensed view of the effective configuration.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConfigSummary {
    pub schema: String,
    pub schema_version: u32,
    pub source: Option<PathBuf>,
    pub fingerprint: String,
    pub station: String,
    pub chain: Vec<ChainStep>,
    pub generic_terms: usize,
    pub commodities: Option<CommoditySummary>,
    pub dedupe_key: Vec<String>,
    pub excluded_statuses: Vec<String>,
    pub route_rules: usize,
    pub default_route: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ChainStep {
    pub rule: String,
    pub category: String,
    pub shc_codes: usize,
    pub keywords: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CommoditySummary {
    pub keyword_groups: usize,
    pub shc_codes: usize,
    pub conflict_policy: String,
}

impl ConfigSummary {
    pub fn from_loaded(loaded: &LoadedConfig) -> Self {
        let config = &loaded.config;
        let classification = &config.classification;
        let chain = classification
            .chain
            .iter()
            .map(|rule| {
                let (name, shc_codes, keywords) = match rule {
                    ChainRule::Transit => ("transit", 0, 0),
                    ChainRule::MailPrefix => ("mail_prefix", 0, 0),
                    ChainRule::Signals(signals) => {
                        ("signals", signals.shc_codes.len(), signals.keywords.len())
                    }
                };
                ChainStep {
                    rule: name.to_string(),
                    category: rule.category().as_str().to_string(),
                    shc_codes,
                    keywords,
                }
            })
            .collect();
        let commodities = classification
            .commodities
            .as_ref()
            .map(|commodities| CommoditySummary {
                keyword_groups: commodities.keywords.len(),
                shc_codes: commodities.shc_codes.len(),
                conflict_policy: commodities.conflict_policy.as_str().to_string(),
            });
        Self {
            schema: "awb-report.config-summary".to_string(),
            schema_version: 1,
            source: loaded.source.clone(),
            fingerprint: loaded.fingerprint.clone(),
            station: classification.station.clone(),
            chain,
            generic_terms: classification.generic_terms.len(),
            commodities,
            dedupe_key: config
                .dedupe
                .key_fields
                .iter()
                .map(|field| field.as_str().to_string())
                .collect(),
            excluded_statuses: config.ingest.excluded_statuses.iter().cloned().collect(),
            route_rules: config.routes.rules.len(),
            default_route: config.routes.default.as_str().to_string(),
        }
    }
}
