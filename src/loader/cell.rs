//! Cell values read from a tabular source
//!
//! A source yields loosely-typed cells; the typed accessors here convert them
//! into the domain types each column requires, returning a plain reason
//! string that the sheet layer wraps with sheet/row/column context.

use chrono::NaiveDate;

use super::dates::{parse_date_text, serial_to_date};
use crate::models::{AccountId, Money};

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    /// A spreadsheet error cell such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Build a cell from raw text, treating blank text as empty
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(s)
        }
    }

    /// Check if the cell holds nothing
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Read the cell as a date (serial number, native date, or date text)
    pub fn as_date(&self) -> Result<NaiveDate, String> {
        match self {
            Self::Date(d) => Ok(*d),
            Self::Number(n) => serial_to_date(*n),
            Self::Text(s) => parse_date_text(s),
            other => Err(format!("expected a date, found {}", other.kind())),
        }
    }

    /// Read the cell as a money amount
    pub fn as_money(&self) -> Result<Money, String> {
        match self {
            Self::Number(n) => {
                Money::from_f64(*n).ok_or_else(|| format!("{} is not a finite amount", n))
            }
            Self::Text(s) => Money::parse(s).map_err(|e| e.to_string()),
            other => Err(format!("expected an amount, found {}", other.kind())),
        }
    }

    /// Read the cell as non-empty text; numbers are rendered without a trailing ".0"
    pub fn as_text(&self) -> Result<String, String> {
        match self {
            Self::Text(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Ok(format!("{}", *n as i64)),
            Self::Number(n) => Ok(n.to_string()),
            Self::Date(d) => Ok(d.to_string()),
            Self::Bool(b) => Ok(b.to_string()),
            other => Err(format!("expected text, found {}", other.kind())),
        }
    }

    /// Read the cell as an account key
    pub fn as_account_id(&self) -> Result<AccountId, String> {
        match self {
            Self::Number(n) if n.is_finite() => Ok(AccountId::from_number(*n)),
            Self::Text(s) if !s.trim().is_empty() => Ok(AccountId::new(s)),
            other => Err(format!("expected an account id, found {}", other.kind())),
        }
    }

    /// Read the cell as a whole number
    pub fn as_integer(&self) -> Result<i64, String> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", s.trim()))?,
            other => return Err(format!("expected a whole number, found {}", other.kind())),
        };
        if !n.is_finite() || n.fract() != 0.0 {
            return Err(format!("{} is not a whole number", n));
        }
        Ok(n as i64)
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "an empty cell",
            Self::Number(_) => "a number",
            Self::Text(_) => "text",
            Self::Bool(_) => "a boolean",
            Self::Date(_) => "a date",
            Self::Error(_) => "an error cell",
        }
    }
}

impl From<&calamine::Data> for CellValue {
    fn from(data: &calamine::Data) -> Self {
        use calamine::Data;
        match data {
            Data::Empty => Self::Empty,
            Data::Int(i) => Self::Number(*i as f64),
            Data::Float(f) => Self::Number(*f),
            Data::String(s) => Self::text(s.as_str()),
            Data::Bool(b) => Self::Bool(*b),
            // as_datetime applies the workbook's 1900/1904 date system
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(datetime) if dt.is_datetime() => Self::Date(datetime.date()),
                _ => Self::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Self::text(s.as_str()),
            Data::Error(e) => Self::Error(format!("{:?}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_empty() {
        assert_eq!(CellValue::text("   "), CellValue::Empty);
        assert!(CellValue::Text(" ".into()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_date_from_serial_and_text() {
        let expected = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
        assert_eq!(CellValue::Number(43470.0).as_date().unwrap(), expected);
        assert_eq!(CellValue::text("2019-01-05").as_date().unwrap(), expected);
        assert_eq!(CellValue::Date(expected).as_date().unwrap(), expected);
        assert!(CellValue::Bool(true).as_date().is_err());
    }

    #[test]
    fn test_money_from_number_and_text() {
        assert_eq!(CellValue::Number(100.5).as_money().unwrap().cents(), 10050);
        assert_eq!(CellValue::text("1,250.00").as_money().unwrap().cents(), 125000);
        assert!(CellValue::Empty.as_money().is_err());
        assert!(CellValue::text("abc").as_money().is_err());
    }

    #[test]
    fn test_text_renders_integers_cleanly() {
        assert_eq!(CellValue::Number(3.0).as_text().unwrap(), "3");
        assert_eq!(CellValue::text(" Viajes ").as_text().unwrap(), "Viajes");
        assert!(CellValue::Empty.as_text().is_err());
    }

    #[test]
    fn test_integer() {
        assert_eq!(CellValue::Number(2019.0).as_integer().unwrap(), 2019);
        assert_eq!(CellValue::text("8").as_integer().unwrap(), 8);
        assert!(CellValue::Number(2.5).as_integer().is_err());
        assert!(CellValue::text("Enero").as_integer().is_err());
    }

    #[test]
    fn test_account_id() {
        assert_eq!(
            CellValue::Number(51001.0).as_account_id().unwrap(),
            CellValue::text("51001").as_account_id().unwrap()
        );
        assert!(CellValue::Empty.as_account_id().is_err());
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(CellValue::from(&calamine::Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(
            CellValue::from(&calamine::Data::String("x".into())),
            CellValue::Text("x".into())
        );
        assert_eq!(CellValue::from(&calamine::Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_from_calamine_datetime() {
        use calamine::{Data, ExcelDateTime, ExcelDateTimeType};

        let expected = CellValue::Date(NaiveDate::from_ymd_opt(2019, 1, 5).unwrap());
        let cell = |serial: f64, kind: ExcelDateTimeType, is_1904: bool| {
            CellValue::from(&Data::DateTime(ExcelDateTime::new(serial, kind, is_1904)))
        };

        assert_eq!(cell(43470.0, ExcelDateTimeType::DateTime, false), expected);
        // Time of day is dropped
        assert_eq!(cell(43470.75, ExcelDateTimeType::DateTime, false), expected);
        // Same day in a workbook using the 1904 date system
        assert_eq!(cell(43470.0 - 1462.0, ExcelDateTimeType::DateTime, true), expected);
        // Durations are not dates
        assert_eq!(cell(1.5, ExcelDateTimeType::TimeDelta, false), CellValue::Number(1.5));

        assert_eq!(
            cell(43470.0, ExcelDateTimeType::DateTime, false).as_date().unwrap(),
            NaiveDate::from_ymd_opt(2019, 1, 5).unwrap()
        );
    }
}
