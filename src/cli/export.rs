//! CLI command for exporting the whole dashboard

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use super::report::create_output;
use crate::error::{DashboardError, DashboardResult};
use crate::export::{export_csv, export_json, export_yaml};
use crate::reports::ReportContext;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON document with metadata
    Json,
    /// YAML document, human-readable
    Yaml,
    /// One flat CSV table with a section column
    Csv,
}

/// Write the report context to `output` in the chosen format
pub fn handle_export(
    ctx: &ReportContext,
    output: &Path,
    format: ExportFormat,
    pretty: bool,
) -> DashboardResult<()> {
    let mut writer = create_output(output)?;

    match format {
        ExportFormat::Json => export_json(ctx, &mut writer, pretty)?,
        ExportFormat::Yaml => export_yaml(ctx, &mut writer)?,
        ExportFormat::Csv => export_csv(ctx, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| DashboardError::Export(e.to_string()))?;

    println!("Dashboard exported to: {}", output.display());
    Ok(())
}
