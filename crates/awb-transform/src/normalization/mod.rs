//! Field normalization for raw waybill records.
//!
//! - **text**: trimming, upper-casing and token splitting
//! - **numeric**: weight and piece-count parsing
//! - **datetime**: flight date parsing, including spreadsheet serials
//!
//! Normalization never fails: unusable values fall back to blanks or zero and
//! are counted in [`NormalizeStats`].

pub mod datetime;
pub mod numeric;
pub mod text;

use awb_model::{NormalizeOptions, NormalizedRecord, RawField, RawRecord};
use serde::Serialize;
use tracing::debug;

pub use datetime::{parse_excel_serial, parse_flight_date};
pub use numeric::{normalize_pieces, normalize_weight, parse_f64};
pub use text::{TOKEN_SEPARATORS, normalize_description, normalize_text, split_tokens};

/// Counts of values that could not be used as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub records: usize,
    pub unparseable_dates: usize,
    pub unusable_weights: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn normalize(&self, raw: &RawRecord) -> NormalizedRecord {
        self.normalize_counted(raw, &mut NormalizeStats::default())
    }

    pub fn normalize_all(&self, raws: &[RawRecord]) -> (Vec<NormalizedRecord>, NormalizeStats) {
        let mut stats = NormalizeStats::default();
        let records = raws
            .iter()
            .map(|raw| self.normalize_counted(raw, &mut stats))
            .collect();
        debug!(
            records = stats.records,
            unparseable_dates = stats.unparseable_dates,
            unusable_weights = stats.unusable_weights,
            "normalized records"
        );
        (records, stats)
    }

    fn normalize_counted(&self, raw: &RawRecord, stats: &mut NormalizeStats) -> NormalizedRecord {
        stats.records += 1;

        let flight_date = raw
            .get(RawField::FlightDate)
            .and_then(|value| parse_flight_date(value, self.options.date_order));
        if flight_date.is_none() && raw.has_value(RawField::FlightDate) {
            stats.unparseable_dates += 1;
        }

        let (weight, weight_ok) = normalize_weight(raw.get(RawField::Weight));
        if !weight_ok {
            stats.unusable_weights += 1;
        }

        let import_status = normalize_text(raw.get(RawField::ImportStatus));
        let shc_raw = normalize_text(raw.get(RawField::Shcs));

        NormalizedRecord {
            flight_date,
            carrier: normalize_text(raw.get(RawField::Carrier)),
            flight_no: normalize_text(raw.get(RawField::FlightNo)),
            origin: normalize_text(raw.get(RawField::Origin)),
            dest: normalize_text(raw.get(RawField::Dest)),
            awb: normalize_text(raw.get(RawField::Awb)),
            pieces: normalize_pieces(raw.get(RawField::Pieces)),
            weight,
            uld: normalize_text(raw.get(RawField::Uld)),
            status_tokens: split_tokens(&import_status),
            import_status,
            awb_dest: normalize_text(raw.get(RawField::AwbDest)),
            nature_goods: normalize_description(raw.get(RawField::NatureGoods)),
            shcs: split_tokens(&shc_raw),
            shc_raw,
        }
    }
}
