//! Date normalization
//!
//! Spreadsheets store dates either as a day count from the 1899-12-30 epoch
//! or as text. Both are normalized to `NaiveDate` before any join so that
//! the two encodings of the same day always match.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Largest serial accepted (9999-12-31)
const MAX_SERIAL: f64 = 2_958_465.0;

/// Text formats tried, in order, for date cells stored as text
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y", "%d.%m.%Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// The spreadsheet date epoch (serial 0)
pub fn spreadsheet_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Convert a spreadsheet serial day count to a date
///
/// Fractional parts (time of day) are dropped.
pub fn serial_to_date(serial: f64) -> Result<NaiveDate, String> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL {
        return Err(format!("{} is not a valid spreadsheet date serial", serial));
    }
    spreadsheet_epoch()
        .checked_add_signed(Duration::days(serial.trunc() as i64))
        .ok_or_else(|| format!("{} is out of the supported date range", serial))
}

/// Convert a date to its spreadsheet serial day count
pub fn date_to_serial(date: NaiveDate) -> i64 {
    date.signed_duration_since(spreadsheet_epoch()).num_days()
}

/// Parse a date written as text
///
/// Numeric text is read as a serial; otherwise the usual date and
/// date-time layouts are tried.
pub fn parse_date_text(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty date".to_string());
    }

    if let Ok(serial) = s.parse::<f64>() {
        return serial_to_date(serial);
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }

    Err(format!("Could not parse date: '{}'", s))
}
