//! YAML Export functionality
//!
//! Exports the complete report context to YAML format for human reading.

use std::io::Write;

use crate::error::{DashboardError, DashboardResult};
use crate::export::json::DashboardExport;
use crate::reports::ReportContext;

/// Export the report context to YAML format
pub fn export_yaml<W: Write>(ctx: &ReportContext, writer: &mut W) -> DashboardResult<()> {
    let export = DashboardExport::from_context(ctx);
    export.validate().map_err(DashboardError::Export)?;

    // Add a header comment
    writeln!(writer, "# Budget Dashboard Export")
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.generated_at)
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(writer, "# Coverage: {}", export.coverage.label())
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| DashboardError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| DashboardError::Export(e.to_string()))?;

    Ok(())
}
