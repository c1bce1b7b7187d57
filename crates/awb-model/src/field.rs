//! Canonical record fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Canonical name of one waybill line-item field.
///
/// Source exports use many header spellings; the ingestion layer maps them
/// onto these names before records reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawField {
    FlightDate,
    Carrier,
    FlightNo,
    Origin,
    Dest,
    Awb,
    Pieces,
    Weight,
    Uld,
    ImportStatus,
    AwbDest,
    NatureGoods,
    Shcs,
}

impl RawField {
    pub const ALL: [RawField; 13] = [
        RawField::FlightDate,
        RawField::Carrier,
        RawField::FlightNo,
        RawField::Origin,
        RawField::Dest,
        RawField::Awb,
        RawField::Pieces,
        RawField::Weight,
        RawField::Uld,
        RawField::ImportStatus,
        RawField::AwbDest,
        RawField::NatureGoods,
        RawField::Shcs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RawField::FlightDate => "flight_date",
            RawField::Carrier => "carrier",
            RawField::FlightNo => "flight_no",
            RawField::Origin => "origin",
            RawField::Dest => "dest",
            RawField::Awb => "awb",
            RawField::Pieces => "pieces",
            RawField::Weight => "weight",
            RawField::Uld => "uld",
            RawField::ImportStatus => "import_status",
            RawField::AwbDest => "awb_dest",
            RawField::NatureGoods => "nature_goods",
            RawField::Shcs => "shcs",
        }
    }

    /// Header spellings recognised in source exports.
    pub fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            RawField::FlightDate => &["flight date", "flight_date", "date"],
            RawField::Carrier => &["carrier", "airline"],
            RawField::FlightNo => &["flight no", "flight no.", "flight_no", "flight"],
            RawField::Origin => &["origin", "org"],
            RawField::Dest => &["dest", "destination"],
            RawField::Awb => &["awb", "awb_number", "awb number", "awb no"],
            RawField::Pieces => &["pieces", "pcs"],
            RawField::Weight => &["weight", "rcv weight", "kg"],
            RawField::Uld => &["uld number", "uld", "uld_number", "uld_no"],
            RawField::ImportStatus => &["import status", "import_status", "status"],
            RawField::AwbDest => &[
                "awb dest",
                "awb destination",
                "awb_dest",
                "final destination",
            ],
            RawField::NatureGoods => &["nature goods", "nature_goods", "description"],
            RawField::Shcs => &["shcs", "shc", "special handling codes"],
        }
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RawField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}
