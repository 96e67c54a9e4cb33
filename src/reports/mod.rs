//! Reports module for the budget dashboard
//!
//! Provides the metrics and aggregation engine: the summary gauge figures,
//! spending by category, by month, quarter and semester, budget efficiency,
//! and the report context that bundles them.

pub mod category;
pub mod context;
pub mod efficiency;
pub mod period;
pub mod summary;

pub use category::{CategoryReport, CategoryRow, CategoryTotals, SpendingLevel};
pub use context::{resolve_total_budget, Coverage, ReportContext};
pub use efficiency::{EfficiencyReport, EfficiencyRow, EfficiencyZone};
pub use period::{PeriodReport, PeriodRow};
pub use summary::{GaugeBand, GaugeScale, MetricsSummary};
