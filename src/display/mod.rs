//! Display formatting for terminal output
//!
//! Provides utilities for formatting report values for terminal display,
//! including bars, separators, and the category matrix table.

pub mod report;
pub mod table;

pub use table::category_matrix;
