//! Composite duplicate-detection key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::NormalizedRecord;

/// A field that participates in the duplicate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateField {
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

impl DuplicateField {
    /// Strict duplicate definition used by the cargo import report.
    pub const DEFAULT_KEY: [DuplicateField; 8] = [
        DuplicateField::FlightDate,
        DuplicateField::FlightNo,
        DuplicateField::Awb,
        DuplicateField::Pieces,
        DuplicateField::Weight,
        DuplicateField::Uld,
        DuplicateField::NatureGoods,
        DuplicateField::Shcs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateField::FlightDate => "flight_date",
            DuplicateField::Carrier => "carrier",
            DuplicateField::FlightNo => "flight_no",
            DuplicateField::Origin => "origin",
            DuplicateField::Dest => "dest",
            DuplicateField::Awb => "awb",
            DuplicateField::Pieces => "pieces",
            DuplicateField::Weight => "weight",
            DuplicateField::Uld => "uld",
            DuplicateField::ImportStatus => "import_status",
            DuplicateField::AwbDest => "awb_dest",
            DuplicateField::NatureGoods => "nature_goods",
            DuplicateField::Shcs => "shcs",
        }
    }

    fn part(self, record: &NormalizedRecord) -> KeyPart {
        match self {
            DuplicateField::FlightDate => KeyPart::Date(record.flight_date),
            DuplicateField::Carrier => KeyPart::Text(record.carrier.clone()),
            DuplicateField::FlightNo => KeyPart::Text(record.flight_no.clone()),
            DuplicateField::Origin => KeyPart::Text(record.origin.clone()),
            DuplicateField::Dest => KeyPart::Text(record.dest.clone()),
            DuplicateField::Awb => KeyPart::Text(record.awb.clone()),
            DuplicateField::Pieces => KeyPart::Integer(record.pieces),
            DuplicateField::Weight => KeyPart::Weight(weight_bits(record.weight)),
            DuplicateField::Uld => KeyPart::Text(record.uld.clone()),
            DuplicateField::ImportStatus => KeyPart::Text(record.import_status.clone()),
            DuplicateField::AwbDest => KeyPart::Text(record.awb_dest.clone()),
            DuplicateField::NatureGoods => KeyPart::Text(record.nature_goods.clone()),
            DuplicateField::Shcs => KeyPart::Text(record.shc_raw.clone()),
        }
    }
}

/// Bit pattern of a normalized weight; `-0.0` and `0.0` compare equal.
fn weight_bits(weight: f64) -> u64 {
    if weight == 0.0 { 0 } else { weight.to_bits() }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Text(String),
    Date(Option<NaiveDate>),
    Integer(i64),
    Weight(u64),
}

/// Ordered tuple of key parts; two records are duplicates iff their keys are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    parts: Vec<KeyPart>,
}

impl DuplicateKey {
    pub fn from_record(record: &NormalizedRecord, fields: &[DuplicateField]) -> Self {
        Self {
            parts: fields.iter().map(|field| field.part(record)).collect(),
        }
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }
}
