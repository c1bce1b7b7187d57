//! Cargo and route categories.
//!
//! A [`Category`] is the single bucket a waybill line-item is reported under.
//! The six core categories are always present in a report; the fine-grained
//! commodity categories only appear when the extended classification table is
//! configured.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Cargo category, exclusive per record.
///
/// Declaration order is the report column order for the core set followed by
/// the commodity set, and is the ordering used by `BTreeMap<Category, _>`
/// accumulators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// General cargo, the default when nothing more specific matched.
    GeneralCargo,
    /// Perishable or cold-chain cargo.
    PerishableCold,
    /// Dangerous goods.
    DangerousGoods,
    /// Cargo transshipping through the station.
    Transit,
    /// Postal mail. Weighed but never AWB-counted.
    PostalMail,
    /// Courier consignments.
    Courier,
    Meat,
    Fish,
    CrabsLobster,
    Flowers,
    Vegetables,
    Avocado,
    Valuables,
}

impl Category {
    /// Categories present in every report.
    pub const CORE: [Category; 6] = [
        Category::GeneralCargo,
        Category::PerishableCold,
        Category::DangerousGoods,
        Category::Transit,
        Category::PostalMail,
        Category::Courier,
    ];

    /// Commodity categories used by the extended classification table.
    pub const FINE_GRAINED: [Category; 7] = [
        Category::Meat,
        Category::Fish,
        Category::CrabsLobster,
        Category::Flowers,
        Category::Vegetables,
        Category::Avocado,
        Category::Valuables,
    ];

    /// Canonical identifier used in configuration files and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::GeneralCargo => "GENERAL_CARGO",
            Category::PerishableCold => "PERISHABLE_COLD",
            Category::DangerousGoods => "DANGEROUS_GOODS",
            Category::Transit => "TRANSIT",
            Category::PostalMail => "POSTAL_MAIL",
            Category::Courier => "COURIER",
            Category::Meat => "MEAT",
            Category::Fish => "FISH",
            Category::CrabsLobster => "CRABS_LOBSTER",
            Category::Flowers => "FLOWERS",
            Category::Vegetables => "VEGETABLES",
            Category::Avocado => "AVOCADO",
            Category::Valuables => "VALUABLES",
        }
    }

    /// Weight column header in the flight report.
    pub fn report_label(&self) -> &'static str {
        match self {
            Category::GeneralCargo => "GENCARGO",
            Category::PerishableCold => "PER/COL",
            Category::DangerousGoods => "DG",
            Category::Transit => "TRANSIT",
            Category::PostalMail => "P.O MAIL",
            Category::Courier => "COURIER",
            Category::Meat => "MEAT",
            Category::Fish => "FISH",
            Category::CrabsLobster => "CRABS/LOBSTER",
            Category::Flowers => "FLOWERS",
            Category::Vegetables => "VEGETABLES",
            Category::Avocado => "AVOCADO",
            Category::Valuables => "VALUABLES",
        }
    }

    /// AWB-count column header, or `None` for mail which is never counted.
    pub fn awb_count_label(&self) -> Option<&'static str> {
        match self {
            Category::GeneralCargo => Some("GEN(awb)"),
            Category::PerishableCold => Some("COL(awb)"),
            Category::DangerousGoods => Some("DG(awb)"),
            Category::Transit => Some("TNST(awb)"),
            Category::PostalMail => None,
            Category::Courier => Some("COU(awb)"),
            Category::Meat => Some("MEAT(awb)"),
            Category::Fish => Some("FISH(awb)"),
            Category::CrabsLobster => Some("CRAB(awb)"),
            Category::Flowers => Some("FLW(awb)"),
            Category::Vegetables => Some("VEG(awb)"),
            Category::Avocado => Some("AVO(awb)"),
            Category::Valuables => Some("VAL(awb)"),
        }
    }

    /// Mail contributes weight but is excluded from every AWB count.
    pub fn is_mail(&self) -> bool {
        matches!(self, Category::PostalMail)
    }

    pub fn is_fine_grained(&self) -> bool {
        Self::FINE_GRAINED.contains(self)
    }

    /// Whether the extended commodity table may subdivide this category.
    pub fn is_subdividable(&self) -> bool {
        matches!(self, Category::GeneralCargo | Category::PerishableCold)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    /// Accepts the canonical identifier or the report label, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::CORE
            .iter()
            .chain(Self::FINE_GRAINED.iter())
            .copied()
            .find(|category| {
                category.as_str() == normalized || category.report_label() == normalized
            })
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// Route category of a flight, derived from carrier and flight number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RouteCategory {
    #[serde(rename = "DOMESTIC")]
    Domestic,
    #[serde(rename = "FOREIGN")]
    Foreign,
    #[serde(rename = "PW-FOREIGN")]
    PwForeign,
    #[serde(rename = "TC-FOREIGN")]
    TcForeign,
}

impl RouteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteCategory::Domestic => "DOMESTIC",
            RouteCategory::Foreign => "FOREIGN",
            RouteCategory::PwForeign => "PW-FOREIGN",
            RouteCategory::TcForeign => "TC-FOREIGN",
        }
    }
}

impl fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RouteCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "DOMESTIC" => Ok(RouteCategory::Domestic),
            "FOREIGN" => Ok(RouteCategory::Foreign),
            "PW-FOREIGN" => Ok(RouteCategory::PwForeign),
            "TC-FOREIGN" => Ok(RouteCategory::TcForeign),
            _ => Err(ModelError::UnknownRouteCategory(s.to_string())),
        }
    }
}
