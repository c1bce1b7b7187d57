//! Route category lookup.

use awb_model::{RouteCategory, RouteConfig};

#[derive(Debug, Clone)]
struct CompiledRule {
    carrier: String,
    prefixes: Vec<String>,
    category: RouteCategory,
}

/// Ordered carrier/flight-prefix rules; the first match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<CompiledRule>,
    default: RouteCategory,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(&RouteConfig::default())
    }
}

impl RouteTable {
    pub fn new(config: &RouteConfig) -> Self {
        let rules = config
            .rules
            .iter()
            .map(|rule| {
                let carrier = compact_upper(&rule.carrier);
                let prefixes = rule
                    .flight_prefixes
                    .iter()
                    .map(|prefix| with_carrier(&carrier, &compact_upper(prefix)))
                    .collect();
                CompiledRule {
                    carrier,
                    prefixes,
                    category: rule.category,
                }
            })
            .collect();
        Self {
            rules,
            default: config.default,
        }
    }

    /// Route category of a flight. Flight numbers without the carrier
    /// designator (`101` for `TC101`) are matched as if it were present.
    pub fn category(&self, carrier: &str, flight_no: &str) -> RouteCategory {
        let carrier = compact_upper(carrier);
        let flight_no = with_carrier(&carrier, &compact_upper(flight_no));
        self.rules
            .iter()
            .find(|rule| {
                rule.carrier == carrier
                    && (rule.prefixes.is_empty()
                        || rule
                            .prefixes
                            .iter()
                            .any(|prefix| flight_no.starts_with(prefix.as_str())))
            })
            .map_or(self.default, |rule| rule.category)
    }
}

fn compact_upper(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn with_carrier(carrier: &str, flight_no: &str) -> String {
    if carrier.is_empty() || flight_no.starts_with(carrier) {
        flight_no.to_string()
    } else {
        format!("{carrier}{flight_no}")
    }
}
