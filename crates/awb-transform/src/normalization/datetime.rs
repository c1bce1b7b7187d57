//! Flight date parsing.
//!
//! Exports arrive with ISO dates, slash or dash separated day/month dates,
//! month-name dates and, from spreadsheets, serial day numbers. Only the
//! calendar date is kept.

use awb_model::DateOrder;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Years below this are two-digit years read through a four-digit format.
const MIN_YEAR: i32 = 1900;

/// Largest serial accepted (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const UNAMBIGUOUS_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const UNAMBIGUOUS_DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%d %b %Y",
    "%d%b%Y",
    "%d%b%y",
    "%d-%B-%Y",
];

const DAY_FIRST_FORMATS: [&str; 5] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%d-%m-%y"];

const MONTH_FIRST_FORMATS: [&str; 5] =
    ["%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y", "%m/%d/%y", "%m-%d-%y"];

/// Parses a flight date, discarding any time of day.
///
/// Returns `None` for blank or unrecognised values.
pub fn parse_flight_date(value: &str, order: DateOrder) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in UNAMBIGUOUS_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    // A trailing time on a numeric date ("05/01/2024 13:40") carries no
    // information for the report.
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    let ordered = match order {
        DateOrder::DayFirst => DAY_FIRST_FORMATS,
        DateOrder::MonthFirst => MONTH_FIRST_FORMATS,
    };
    for candidate in [trimmed, date_part] {
        for fmt in UNAMBIGUOUS_DATE_FORMATS.iter().chain(ordered.iter()) {
            match NaiveDate::parse_from_str(candidate, fmt) {
                Ok(date) if date.year() >= MIN_YEAR => return Some(date),
                _ => {}
            }
        }
    }

    parse_excel_serial(trimmed)
}

/// Spreadsheet serial day number (1900 date system) to a date.
pub fn parse_excel_serial(value: &str) -> Option<NaiveDate> {
    let serial: f64 = value.trim().parse().ok()?;
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    // Day zero is 1899-12-30 once the phantom 1900-02-29 is accounted for.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = serial.trunc() as i64;
    epoch.checked_add_signed(Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn iso_and_datetime_values() {
        assert_eq!(parse_flight_date("2024-01-05", DateOrder::DayFirst), date(2024, 1, 5));
        assert_eq!(
            parse_flight_date("2024-01-05 23:10:00", DateOrder::DayFirst),
            date(2024, 1, 5)
        );
        assert_eq!(
            parse_flight_date("2024-01-05T06:00:00", DateOrder::MonthFirst),
            date(2024, 1, 5)
        );
    }

    #[test]
    fn ambiguous_dates_follow_order() {
        assert_eq!(parse_flight_date("05/01/2024", DateOrder::DayFirst), date(2024, 1, 5));
        assert_eq!(parse_flight_date("05/01/2024", DateOrder::MonthFirst), date(2024, 5, 1));
        assert_eq!(
            parse_flight_date("05/01/2024 13:40", DateOrder::DayFirst),
            date(2024, 1, 5)
        );
    }

    #[test]
    fn month_names_and_serials() {
        assert_eq!(parse_flight_date("05-Jan-2024", DateOrder::DayFirst), date(2024, 1, 5));
        assert_eq!(parse_flight_date("05JAN2024", DateOrder::DayFirst), date(2024, 1, 5));
        assert_eq!(parse_flight_date("05/01/24", DateOrder::DayFirst), date(2024, 1, 5));
        assert_eq!(parse_flight_date("45296", DateOrder::DayFirst), date(2024, 1, 5));
        assert_eq!(parse_flight_date("45296.75", DateOrder::DayFirst), date(2024, 1, 5));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_flight_date("", DateOrder::DayFirst), None);
        assert_eq!(parse_flight_date("tomorrow", DateOrder::DayFirst), None);
        assert_eq!(parse_flight_date("0", DateOrder::DayFirst), None);
        assert_eq!(parse_flight_date("31/02/2024", DateOrder::DayFirst), None);
    }
}
