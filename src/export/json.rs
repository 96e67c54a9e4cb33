//! JSON Export functionality
//!
//! Exports the complete report context to JSON format with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{DashboardError, DashboardResult};
use crate::loader::LoadStats;
use crate::models::PeriodDimension;
use crate::reports::{
    CategoryReport, Coverage, EfficiencyReport, GaugeScale, MetricsSummary, PeriodReport,
    ReportContext,
};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full dashboard export structure
#[derive(Debug, Clone, Serialize)]
pub struct DashboardExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    /// Months present in the data
    pub coverage: &'a Coverage,

    /// Counters from loading the source
    pub load_stats: &'a LoadStats,

    pub summary: &'a MetricsSummary,
    pub gauge: &'a GaugeScale,
    pub categories: &'a CategoryReport,
    pub months: &'a PeriodReport,
    pub quarters: &'a PeriodReport,
    pub semesters: &'a PeriodReport,
    pub efficiency: &'a EfficiencyReport,
}

impl<'a> DashboardExport<'a> {
    /// Create an export view of a report context
    pub fn from_context(ctx: &'a ReportContext) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            coverage: ctx.coverage(),
            load_stats: ctx.table().stats(),
            summary: ctx.summary(),
            gauge: ctx.gauge(),
            categories: ctx.categories(),
            months: ctx.periods(PeriodDimension::Month),
            quarters: ctx.periods(PeriodDimension::Quarter),
            semesters: ctx.periods(PeriodDimension::Semester),
            efficiency: ctx.efficiency(),
        }
    }

    /// Check that the grouped totals agree with the summary
    pub fn validate(&self) -> Result<(), String> {
        let total = self.summary.total_spent;

        if self.categories.totals.spent != total {
            return Err(format!(
                "Category totals {} do not match total spent {}",
                self.categories.totals.spent, total
            ));
        }

        for periods in [self.months, self.quarters, self.semesters] {
            let covered = periods.assigned_total + periods.unassigned;
            if covered != total {
                return Err(format!(
                    "{} totals {} do not match total spent {}",
                    periods.dimension.title(),
                    covered,
                    total
                ));
            }
        }

        Ok(())
    }
}

/// Export the report context to JSON
pub fn export_json<W: Write>(ctx: &ReportContext, writer: &mut W, pretty: bool) -> DashboardResult<()> {
    let export = DashboardExport::from_context(ctx);
    export.validate().map_err(DashboardError::Export)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| DashboardError::Export(e.to_string()))?;

    Ok(())
}
