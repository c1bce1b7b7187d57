//! Record builders shared by unit tests.

use awb_model::NormalizedRecord;
use chrono::NaiveDate;

/// A line-item on `TC100` 2024-01-05 `NBO-DAR`.
pub fn record(awb: &str, weight: f64) -> NormalizedRecord {
    NormalizedRecord {
        flight_date: NaiveDate::from_ymd_opt(2024, 1, 5),
        carrier: "TC".to_string(),
        flight_no: "TC100".to_string(),
        origin: "NBO".to_string(),
        dest: "DAR".to_string(),
        awb: awb.trim().to_uppercase(),
        pieces: 1,
        weight,
        ..NormalizedRecord::default()
    }
}

fn tokens(value: &str) -> std::collections::BTreeSet<String> {
    value
        .split([' ', ',', ';', '|', '/'])
        .filter(|token| !token.is_empty())
        .map(str::to_uppercase)
        .collect()
}

pub trait RecordExt: Sized {
    fn status(self, value: &str) -> Self;
    fn awb_dest(self, value: &str) -> Self;
    fn shc(self, value: &str) -> Self;
    fn nature(self, value: &str) -> Self;
    fn flight(self, flight_no: &str) -> Self;
    fn uld(self, value: &str) -> Self;
}

impl RecordExt for NormalizedRecord {
    fn status(mut self, value: &str) -> Self {
        self.import_status = value.to_uppercase();
        self.status_tokens = tokens(value);
        self
    }

    fn awb_dest(mut self, value: &str) -> Self {
        self.awb_dest = value.to_uppercase();
        self
    }

    fn shc(mut self, value: &str) -> Self {
        self.shc_raw = value.to_uppercase();
        self.shcs = tokens(value);
        self
    }

    fn nature(mut self, value: &str) -> Self {
        self.nature_goods = value.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        self
    }

    fn flight(mut self, flight_no: &str) -> Self {
        self.flight_no = flight_no.to_uppercase();
        self
    }

    fn uld(mut self, value: &str) -> Self {
        self.uld = value.to_uppercase();
        self
    }
}
