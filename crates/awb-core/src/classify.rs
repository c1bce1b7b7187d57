//! Classification Engine.
//!
//! Each line-item is run through the configured rule chain top-down; the
//! first matching rule decides the category and short-circuits the rest.
//! Records nothing matches are general cargo. When the commodity table is
//! configured, general and perishable cargo is then refined into a
//! fine-grained commodity.
//!
//! Classification is a pure function of the record and the configuration.

use std::collections::{BTreeMap, BTreeSet};

use awb_model::{
    Category, CategoryConflict, ChainRule, ClassificationConfig, CommodityConfig,
    ConflictPolicy, ConflictSource, DiagnosticEntry, NormalizedRecord, TransitConflict,
    UnclassifiedEntry,
};

/// Outcome of classifying one line-item.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: Category,
    /// Transit conflicts, unclassified descriptions and commodity conflicts
    /// raised on the way, in the order they were detected.
    pub diagnostics: Vec<DiagnosticEntry>,
}

#[derive(Debug, Clone)]
enum Rule {
    Transit,
    MailPrefix,
    Signals {
        category: Category,
        shc_codes: BTreeSet<String>,
        keywords: Vec<String>,
    },
}

impl Rule {
    fn compile(rule: &ChainRule) -> Self {
        match rule {
            ChainRule::Transit => Rule::Transit,
            ChainRule::MailPrefix => Rule::MailPrefix,
            ChainRule::Signals(signals) => Rule::Signals {
                category: signals.category,
                shc_codes: signals
                    .shc_codes
                    .iter()
                    .map(|code| code.trim().to_uppercase())
                    .filter(|code| !code.is_empty())
                    .collect(),
                keywords: upper_terms(&signals.keywords),
            },
        }
    }
}

/// Trims, upper-cases and collapses whitespace; blank terms are dropped.
fn upper_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|term| {
            term.split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_uppercase()
        })
        .filter(|term| !term.is_empty())
        .collect()
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| text.contains(term.as_str()))
}

/// A shellfish description refines a fish code rather than contradicting it.
fn agrees(described: Category, coded: Category) -> bool {
    described == coded || (described == Category::CrabsLobster && coded == Category::Fish)
}

#[derive(Debug, Clone)]
struct CommodityTable {
    keywords: Vec<(Category, Vec<String>)>,
    shc_codes: BTreeMap<String, Category>,
    shc_priority: Vec<Category>,
    shellfish_terms: Vec<String>,
    policy: ConflictPolicy,
}

impl CommodityTable {
    fn compile(config: &CommodityConfig) -> Self {
        Self {
            keywords: config
                .keywords
                .iter()
                .map(|entry| (entry.category, upper_terms(&entry.terms)))
                .collect(),
            shc_codes: config
                .shc_codes
                .iter()
                .map(|(code, category)| (code.trim().to_uppercase(), *category))
                .collect(),
            shc_priority: config.shc_priority.clone(),
            shellfish_terms: upper_terms(&config.shellfish_terms),
            policy: config.conflict_policy,
        }
    }

    /// First keyword group the description mentions. A fish description that
    /// also names a shellfish is crabs/lobster.
    fn from_description(&self, description: &str) -> Option<Category> {
        if description.is_empty() {
            return None;
        }
        let (category, _) = self
            .keywords
            .iter()
            .find(|(_, terms)| contains_any(description, terms))?;
        if *category == Category::Fish && contains_any(description, &self.shellfish_terms) {
            Some(Category::CrabsLobster)
        } else {
            Some(*category)
        }
    }

    fn from_shc(&self, shcs: &BTreeSet<String>) -> Option<Category> {
        let candidates: BTreeSet<Category> = shcs
            .iter()
            .filter_map(|token| self.shc_codes.get(token).copied())
            .collect();
        self.shc_priority
            .iter()
            .copied()
            .find(|category| candidates.contains(category))
            .or_else(|| candidates.first().copied())
    }
}

/// Precedence used when line-items of one waybill disagree: chain order,
/// with the commodities placed just above the first category they
/// subdivide, then the remaining core categories with general cargo last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRanking {
    order: Vec<Category>,
}

fn push_unique(order: &mut Vec<Category>, category: Category) {
    if !order.contains(&category) {
        order.push(category);
    }
}

impl CategoryRanking {
    pub fn from_chain(chain: &[ChainRule]) -> Self {
        let mut order: Vec<Category> = Vec::new();
        for category in chain.iter().map(ChainRule::category) {
            if category.is_subdividable() {
                for commodity in Category::FINE_GRAINED {
                    push_unique(&mut order, commodity);
                }
            }
            push_unique(&mut order, category);
        }
        let tail = Category::FINE_GRAINED
            .into_iter()
            .chain(Category::CORE.into_iter().filter(|c| *c != Category::GeneralCargo))
            .chain([Category::GeneralCargo]);
        for category in tail {
            push_unique(&mut order, category);
        }
        Self { order }
    }

    /// Position of the category; lower wins.
    pub fn rank(&self, category: Category) -> usize {
        self.order
            .iter()
            .position(|candidate| *candidate == category)
            .unwrap_or(usize::MAX)
    }

    /// Highest-ranked candidate, or `None` when there are none.
    pub fn resolve(&self, candidates: &[Category]) -> Option<Category> {
        candidates
            .iter()
            .copied()
            .min_by_key(|category| self.rank(*category))
    }

    pub fn order(&self) -> &[Category] {
        &self.order
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    station: String,
    transit_status: String,
    mail_prefix: String,
    generic_terms: BTreeSet<String>,
    rules: Vec<Rule>,
    commodities: Option<CommodityTable>,
    ranking: CategoryRanking,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassificationConfig::default())
    }
}

impl Classifier {
    pub fn new(config: &ClassificationConfig) -> Self {
        Self {
            station: config.station.trim().to_uppercase(),
            transit_status: config.transit_status.trim().to_uppercase(),
            mail_prefix: config.mail_awb_prefix.trim().to_uppercase(),
            generic_terms: upper_terms(&config.generic_terms).into_iter().collect(),
            rules: config.chain.iter().map(Rule::compile).collect(),
            commodities: config.commodities.as_ref().map(CommodityTable::compile),
            ranking: CategoryRanking::from_chain(&config.chain),
        }
    }

    pub fn ranking(&self) -> &CategoryRanking {
        &self.ranking
    }

    /// Classifies one line-item.
    ///
    /// Returns `None` for zero-weight records, which are never classified
    /// and never produce diagnostics.
    pub fn classify(&self, record: &NormalizedRecord) -> Option<Classification> {
        if record.weight == 0.0 {
            return None;
        }

        let mut diagnostics = Vec::new();
        let matched = self
            .rules
            .iter()
            .find_map(|rule| self.evaluate(rule, record, &mut diagnostics));
        let coarse = matched.unwrap_or(Category::GeneralCargo);

        let conflicts_before = diagnostics.len();
        let category = self.refine(record, coarse, &mut diagnostics);
        let commodity_conflict = diagnostics.len() > conflicts_before;

        if matched.is_none()
            && category == Category::GeneralCargo
            && !commodity_conflict
            && self.is_informative(&record.nature_goods)
        {
            diagnostics.push(DiagnosticEntry::Unclassified(UnclassifiedEntry {
                awb: record.awb.clone(),
                nature_goods: record.nature_goods.clone(),
                shcs: record.shc_raw.clone(),
                import_status: record.import_status.clone(),
                awb_dest: record.awb_dest.clone(),
                weight: record.weight,
            }));
        }

        Some(Classification {
            category,
            diagnostics,
        })
    }

    fn evaluate(
        &self,
        rule: &Rule,
        record: &NormalizedRecord,
        diagnostics: &mut Vec<DiagnosticEntry>,
    ) -> Option<Category> {
        match rule {
            Rule::Transit => {
                let has_transit_status = record.status_tokens.contains(&self.transit_status);
                let destination_outside_station =
                    !record.awb_dest.is_empty() && record.awb_dest != self.station;
                match (has_transit_status, destination_outside_station) {
                    (true, true) => Some(Category::Transit),
                    (false, false) => None,
                    _ => {
                        diagnostics.push(DiagnosticEntry::TransitConflict(TransitConflict {
                            awb: record.awb.clone(),
                            has_transit_status,
                            destination_outside_station,
                            import_status: record.import_status.clone(),
                            awb_dest: record.awb_dest.clone(),
                            flight_date: record.flight_date,
                            flight_no: record.flight_no.clone(),
                            weight: record.weight,
                            nature_goods: record.nature_goods.clone(),
                            shcs: record.shc_raw.clone(),
                        }));
                        None
                    }
                }
            }
            Rule::MailPrefix => (!self.mail_prefix.is_empty()
                && record.awb.starts_with(self.mail_prefix.as_str()))
            .then_some(Category::PostalMail),
            Rule::Signals {
                category,
                shc_codes,
                keywords,
            } => {
                let shc_hit = record.shcs.iter().any(|token| shc_codes.contains(token));
                (shc_hit || contains_any(&record.nature_goods, keywords)).then_some(*category)
            }
        }
    }

    fn refine(
        &self,
        record: &NormalizedRecord,
        coarse: Category,
        diagnostics: &mut Vec<DiagnosticEntry>,
    ) -> Category {
        let Some(table) = &self.commodities else {
            return coarse;
        };
        if !coarse.is_subdividable() {
            return coarse;
        }
        match (
            table.from_description(&record.nature_goods),
            table.from_shc(&record.shcs),
        ) {
            (Some(described), Some(coded)) if !agrees(described, coded) => {
                let resolved = match table.policy {
                    ConflictPolicy::Fallback => coarse,
                    ConflictPolicy::PreferDescription => described,
                    ConflictPolicy::PreferShc => coded,
                };
                diagnostics.push(DiagnosticEntry::CategoryConflict(CategoryConflict {
                    source: ConflictSource::ShcVsDescription,
                    awb: record.awb.clone(),
                    flight: record.flight_key(),
                    candidates: vec![described, coded],
                    resolved,
                    nature_goods: record.nature_goods.clone(),
                    shcs: record.shc_raw.clone(),
                }));
                resolved
            }
            (Some(category), _) | (None, Some(category)) => category,
            (None, None) => coarse,
        }
    }

    /// False for blank descriptions and for generic placeholders. A
    /// description split on punctuation (`CONSOL - GENERAL CARGO.`) is
    /// generic when every part is a generic term.
    fn is_informative(&self, description: &str) -> bool {
        !description
            .split(|c: char| !c.is_alphanumeric() && !c.is_whitespace())
            .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|part| !part.is_empty())
            .all(|part| self.generic_terms.contains(&part))
    }
}
