use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use awb_model::{Category, ChainRule, ReportConfig};

use crate::error::{ConfigError, Result};
use crate::hash::sha256_hex;

/// A validated configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ReportConfig,
    /// `None` when the built-in defaults are in use.
    pub source: Option<PathBuf>,
    /// SHA-256 of the canonical JSON encoding; identical settings give the
    /// same fingerprint whatever the file layout.
    pub fingerprint: String,
}

impl LoadedConfig {
    pub fn defaults() -> Result<Self> {
        Self::from_config(ReportConfig::default(), None)
    }

    pub fn from_config(config: ReportConfig, source: Option<PathBuf>) -> Result<Self> {
        validate_config(&config)?;
        let fingerprint = fingerprint(&config)?;
        Ok(Self {
            config,
            source,
            fingerprint,
        })
    }
}

/// Loads the file at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
            let config = parse_config(&contents, path)?;
            LoadedConfig::from_config(config, Some(path.to_path_buf()))
        }
        None => LoadedConfig::defaults(),
    }
}

pub fn parse_config(contents: &str, path: &Path) -> Result<ReportConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Effective configuration as TOML, suitable as a starting file.
pub fn render_config(config: &ReportConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|source| ConfigError::Render { source })
}

pub fn fingerprint(config: &ReportConfig) -> Result<String> {
    let bytes = serde_json::to_vec(config).map_err(|source| ConfigError::Encode { source })?;
    Ok(sha256_hex(&bytes))
}

pub fn validate_config(config: &ReportConfig) -> Result<()> {
    let classification = &config.classification;
    for (name, value) in [
        ("classification.station", &classification.station),
        ("classification.transit_status", &classification.transit_status),
        ("classification.mail_awb_prefix", &classification.mail_awb_prefix),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(format!("{name} must not be blank")));
        }
    }

    if classification.chain.is_empty() {
        return Err(ConfigError::invalid("classification.chain must not be empty"));
    }
    let mut seen: BTreeSet<Category> = BTreeSet::new();
    for rule in &classification.chain {
        let category = rule.category();
        if !seen.insert(category) {
            return Err(ConfigError::invalid(format!(
                "category {category} appears more than once in classification.chain"
            )));
        }
        if let ChainRule::Signals(signals) = rule {
            if signals.shc_codes.is_empty() && signals.keywords.is_empty() {
                return Err(ConfigError::invalid(format!(
                    "signal rule for {category} has neither shc_codes nor keywords"
                )));
            }
            if matches!(
                category,
                Category::GeneralCargo | Category::Transit | Category::PostalMail
            ) || category.is_fine_grained()
            {
                return Err(ConfigError::invalid(format!(
                    "signal rules cannot assign {category}"
                )));
            }
        }
    }

    if let Some(commodities) = &classification.commodities {
        let categories = commodities
            .keywords
            .iter()
            .map(|entry| entry.category)
            .chain(commodities.shc_codes.values().copied())
            .chain(commodities.shc_priority.iter().copied());
        for category in categories {
            if !category.is_fine_grained() {
                return Err(ConfigError::invalid(format!(
                    "{category} is not a commodity category"
                )));
            }
        }
    }

    if config.dedupe.key_fields.is_empty() {
        return Err(ConfigError::invalid("dedupe.key_fields must not be empty"));
    }
    let key_fields = &config.dedupe.key_fields;
    for (index, field) in key_fields.iter().enumerate() {
        if key_fields[..index].contains(field) {
            return Err(ConfigError::invalid(format!(
                "dedupe.key_fields lists {field:?} twice"
            )));
        }
    }

    for rule in &config.routes.rules {
        if rule.carrier.trim().is_empty() {
            return Err(ConfigError::invalid("routes.rules carrier must not be blank"));
        }
    }

    for alias in &config.ingest.header_aliases {
        if alias.names.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::invalid(format!(
                "ingest.header_aliases for {} contains a blank name",
                alias.field
            )));
        }
    }

    Ok(())
}
