//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report engine.

pub mod export;
pub mod report;

pub use export::{handle_export, ExportFormat};
pub use report::{handle_report_command, PeriodArg, ReportCommands};

use std::path::PathBuf;

use tracing::info;

use crate::config::{DashboardPaths, Settings};
use crate::error::DashboardResult;
use crate::loader::open_source;
use crate::reports::ReportContext;

/// Resolve the source, load it, and build the report context
pub fn load_context(
    paths: &DashboardPaths,
    settings: &Settings,
    source_override: Option<PathBuf>,
) -> DashboardResult<ReportContext> {
    let path = settings.resolve_source(paths, source_override);
    info!(source = %path.display(), "reading source");

    let mut source = open_source(&path)?;
    ReportContext::load(source.as_mut(), settings)
}
