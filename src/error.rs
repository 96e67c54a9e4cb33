//! Custom error types for the budget dashboard
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Workbook or CSV source could not be opened or read
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// A required sheet is absent from the source
    #[error("Sheet not found: {0}")]
    MissingSheet(String),

    /// A required column is absent from a sheet's header row
    #[error("Column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    /// A cell could not be converted to the type its column requires
    #[error("Invalid value in sheet '{sheet}', row {row}, column '{column}': {reason}")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        reason: String,
    },

    /// A percentage was requested against a budget of zero
    #[error("Budget for {scope} is zero; percentage used is undefined")]
    ZeroBudget { scope: String },

    /// A percentage was requested where no budget is configured
    #[error("No budget data for {scope}")]
    NoBudget { scope: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl DashboardError {
    /// Create a "zero budget" error for the given scope
    pub fn zero_budget(scope: impl Into<String>) -> Self {
        Self::ZeroBudget {
            scope: scope.into(),
        }
    }

    /// Create a "no budget" error for the given scope
    pub fn no_budget(scope: impl Into<String>) -> Self {
        Self::NoBudget {
            scope: scope.into(),
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        Self::Workbook(err.to_string())
    }
}

impl From<calamine::Error> for DashboardError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_missing_column_display() {
        let err = DashboardError::MissingColumn {
            sheet: "Gastos".into(),
            column: "Fecha".into(),
        };
        assert_eq!(err.to_string(), "Column 'Fecha' not found in sheet 'Gastos'");
    }

    #[test]
    fn test_budget_conditions_are_distinct() {
        let zero = DashboardError::zero_budget("total");
        let none = DashboardError::no_budget("Travel");
        assert!(matches!(zero, DashboardError::ZeroBudget { .. }));
        assert!(matches!(none, DashboardError::NoBudget { .. }));
        assert_eq!(none.to_string(), "No budget data for Travel");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashboardError = io_err.into();
        assert!(matches!(err, DashboardError::Io(_)));
    }
}
