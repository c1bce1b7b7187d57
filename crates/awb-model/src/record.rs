//! Waybill line-item records and their identity keys.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::field::RawField;

/// One line-item of a waybill on a flight, as handed over by ingestion.
///
/// Every field is optional; numeric fields are kept as text because source
/// exports routinely contain unparseable values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub flight_date: Option<String>,
    pub carrier: Option<String>,
    pub flight_no: Option<String>,
    pub origin: Option<String>,
    pub dest: Option<String>,
    pub awb: Option<String>,
    pub pieces: Option<String>,
    pub weight: Option<String>,
    pub uld: Option<String>,
    pub import_status: Option<String>,
    pub awb_dest: Option<String>,
    pub nature_goods: Option<String>,
    pub shcs: Option<String>,
}

impl RawRecord {
    pub fn get(&self, field: RawField) -> Option<&str> {
        let value = match field {
            RawField::FlightDate => &self.flight_date,
            RawField::Carrier => &self.carrier,
            RawField::FlightNo => &self.flight_no,
            RawField::Origin => &self.origin,
            RawField::Dest => &self.dest,
            RawField::Awb => &self.awb,
            RawField::Pieces => &self.pieces,
            RawField::Weight => &self.weight,
            RawField::Uld => &self.uld,
            RawField::ImportStatus => &self.import_status,
            RawField::AwbDest => &self.awb_dest,
            RawField::NatureGoods => &self.nature_goods,
            RawField::Shcs => &self.shcs,
        };
        value.as_deref()
    }

    pub fn set(&mut self, field: RawField, value: impl Into<String>) {
        let slot = match field {
            RawField::FlightDate => &mut self.flight_date,
            RawField::Carrier => &mut self.carrier,
            RawField::FlightNo => &mut self.flight_no,
            RawField::Origin => &mut self.origin,
            RawField::Dest => &mut self.dest,
            RawField::Awb => &mut self.awb,
            RawField::Pieces => &mut self.pieces,
            RawField::Weight => &mut self.weight,
            RawField::Uld => &mut self.uld,
            RawField::ImportStatus => &mut self.import_status,
            RawField::AwbDest => &mut self.awb_dest,
            RawField::NatureGoods => &mut self.nature_goods,
            RawField::Shcs => &mut self.shcs,
        };
        *slot = Some(value.into());
    }

    /// True when the field holds a non-blank value.
    pub fn has_value(&self, field: RawField) -> bool {
        self.get(field).is_some_and(|value| !value.trim().is_empty())
    }
}

/// A record after field normalization.
///
/// Text is trimmed and upper-cased, blanks are empty strings, weight is a
/// non-negative number and the flight date carries no time of day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub flight_date: Option<NaiveDate>,
    pub carrier: String,
    pub flight_no: String,
    pub origin: String,
    pub dest: String,
    pub awb: String,
    pub pieces: i64,
    pub weight: f64,
    pub uld: String,
    pub import_status: String,
    /// Import status exploded on the SHC separator set.
    pub status_tokens: BTreeSet<String>,
    pub awb_dest: String,
    pub nature_goods: String,
    /// SHC string as received, trimmed and upper-cased.
    pub shc_raw: String,
    /// Discrete SHC tokens.
    pub shcs: BTreeSet<String>,
}

impl NormalizedRecord {
    /// Grouping identity, or `None` when the date, carrier or flight number
    /// is missing.
    pub fn flight_key(&self) -> Option<FlightKey> {
        let date = self.flight_date?;
        if self.carrier.is_empty() || self.flight_no.is_empty() {
            return None;
        }
        Some(FlightKey {
            date,
            carrier: self.carrier.clone(),
            flight_no: self.flight_no.clone(),
            origin: self.origin.clone(),
            dest: self.dest.clone(),
        })
    }

    pub fn has_awb(&self) -> bool {
        !self.awb.is_empty()
    }

    /// SHC tokens joined by a single space, in sorted order.
    pub fn shc_list(&self) -> String {
        self.shcs.iter().cloned().collect::<Vec<_>>().join(" ")
    }
}

/// Identity of one report row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlightKey {
    pub date: NaiveDate,
    pub carrier: String,
    pub flight_no: String,
    pub origin: String,
    pub dest: String,
}

impl FlightKey {
    /// `ORIGIN-DEST` sector string.
    pub fn route(&self) -> String {
        format!("{}-{}", self.origin, self.dest)
    }
}
