//! Core data models for the budget dashboard
//!
//! This module contains the data structures that represent the expense
//! domain: money amounts, account keys, loaded records, calendar period
//! labels, and budget utilization ratios.

pub mod ids;
pub mod money;
pub mod period;
pub mod record;
pub mod utilization;

pub use ids::AccountId;
pub use money::Money;
pub use period::{PeriodDimension, PeriodLabels, REPORTING_YEAR};
pub use record::{BudgetEntry, CalendarEntry, ConsolidatedRecord, ExpenseRecord};
pub use utilization::Utilization;
