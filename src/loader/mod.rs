//! Loading and consolidating the source workbook
//!
//! This module reads the three source sheets (expenses, budget per account,
//! calendar per date), normalizes their dates and keys, and joins them into
//! the consolidated table for the reporting year.

pub mod cell;
pub mod dates;
pub mod merge;
pub mod sheet;
pub mod source;

pub use cell::CellValue;
pub use dates::{date_to_serial, parse_date_text, serial_to_date};
pub use merge::{consolidate, load, ConsolidatedTable, LoadStats};
pub use sheet::{Column, Sheet, SheetRow};
pub use source::{open_source, CsvDirSource, MemorySource, TabularSource, WorkbookSource};
