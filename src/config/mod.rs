//! Configuration module for the budget dashboard
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - Settings persistence
//! - Source schema and threshold preferences

pub mod paths;
pub mod settings;

pub use paths::DashboardPaths;
pub use settings::{
    BudgetColumns, CalendarColumns, CategoryBudgetPolicy, ExpenseColumns, Settings, SourceSchema,
    Thresholds, TotalBudget, DEFAULT_TOTAL_BUDGET,
};
