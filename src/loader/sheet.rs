//! Named sheets of cells with a header row
//!
//! Column lookup is by header text, trimmed and case-insensitive. Row
//! numbers in errors are 1-based with the header on row 1, matching what a
//! person sees in the spreadsheet.

use chrono::NaiveDate;

use super::cell::CellValue;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{AccountId, Money};

/// A resolved column of a sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

/// A sheet: a header row followed by data rows
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a sheet from explicit headers and data rows
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Create a sheet whose first row is the header
    pub fn from_rows(name: impl Into<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let headers = if rows.is_empty() {
            Vec::new()
        } else {
            rows.remove(0)
                .iter()
                .map(|c| c.as_text().unwrap_or_default())
                .collect()
        };
        Self::new(name, headers, rows)
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header texts
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows, including blank ones
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a column by header name
    pub fn column(&self, header: &str) -> DashboardResult<Column> {
        let wanted = normalize_header(header);
        self.headers
            .iter()
            .position(|h| normalize_header(h) == wanted)
            .map(|index| Column {
                index,
                name: self.headers[index].clone(),
            })
            .ok_or_else(|| DashboardError::MissingColumn {
                sheet: self.name.clone(),
                column: header.to_string(),
            })
    }

    /// Iterate over non-blank data rows
    pub fn rows(&self) -> impl Iterator<Item = SheetRow<'_>> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(CellValue::is_empty))
            .map(move |(idx, cells)| SheetRow {
                sheet: &self.name,
                number: idx + 2,
                cells,
            })
    }
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase()
}

/// One data row of a sheet with typed, context-carrying accessors
#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    sheet: &'a str,
    number: usize,
    cells: &'a [CellValue],
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl<'a> SheetRow<'a> {
    /// Row number as shown in the spreadsheet (header = 1)
    pub fn number(&self) -> usize {
        self.number
    }

    /// The raw cell in a column (empty when the row is short)
    pub fn cell(&self, column: &Column) -> &'a CellValue {
        self.cells.get(column.index).unwrap_or(&EMPTY_CELL)
    }

    /// Check if a column's cell is empty
    pub fn is_blank(&self, column: &Column) -> bool {
        self.cell(column).is_empty()
    }

    pub fn date(&self, column: &Column) -> DashboardResult<NaiveDate> {
        self.cell(column).as_date().map_err(|r| self.invalid(column, r))
    }

    pub fn money(&self, column: &Column) -> DashboardResult<Money> {
        self.cell(column).as_money().map_err(|r| self.invalid(column, r))
    }

    /// Read an amount that must not be negative
    pub fn non_negative_money(&self, column: &Column) -> DashboardResult<Money> {
        let amount = self.money(column)?;
        if amount.is_negative() {
            return Err(self.invalid(column, format!("amount {} is negative", amount)));
        }
        Ok(amount)
    }

    pub fn text(&self, column: &Column) -> DashboardResult<String> {
        self.cell(column).as_text().map_err(|r| self.invalid(column, r))
    }

    pub fn account_id(&self, column: &Column) -> DashboardResult<AccountId> {
        self.cell(column)
            .as_account_id()
            .map_err(|r| self.invalid(column, r))
    }

    pub fn integer(&self, column: &Column) -> DashboardResult<i64> {
        self.cell(column)
            .as_integer()
            .map_err(|r| self.invalid(column, r))
    }

    /// Build an `InvalidCell` error for this row
    pub fn invalid(&self, column: &Column, reason: impl Into<String>) -> DashboardError {
        DashboardError::InvalidCell {
            sheet: self.sheet.to_string(),
            row: self.number,
            column: column.name.clone(),
            reason: reason.into(),
        }
    }
}
