//! CLI commands for dashboard reports
//!
//! Each command prints one dashboard section, optionally exporting it to CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{DashboardError, DashboardResult};
use crate::models::PeriodDimension;
use crate::reports::ReportContext;

/// Calendar dimension selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Month,
    Quarter,
    Semester,
}

impl From<PeriodArg> for PeriodDimension {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Month => PeriodDimension::Month,
            PeriodArg::Quarter => PeriodDimension::Quarter,
            PeriodArg::Semester => PeriodDimension::Semester,
        }
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show the gauge metrics: total spent, budget, balance, percent used
    Summary,

    /// Show spending by category with budgets and a totals row
    #[command(alias = "cat")]
    Categories {
        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show spending by month, quarter, or semester
    Periods {
        /// Calendar dimension to group by
        #[arg(long, value_enum, default_value = "month")]
        by: PeriodArg,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show percent used and available per category
    Efficiency {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show every section in dashboard order
    Show,
}

/// Handle report commands
pub fn handle_report_command(ctx: &ReportContext, cmd: ReportCommands) -> DashboardResult<()> {
    match cmd {
        ReportCommands::Summary => {
            print!("{}", ctx.summary().format_terminal(ctx.gauge()));
            Ok(())
        }
        ReportCommands::Categories { top, output } => handle_categories(ctx, top, output),
        ReportCommands::Periods { by, output } => handle_periods(ctx, by.into(), output),
        ReportCommands::Efficiency { output } => handle_efficiency(ctx, output),
        ReportCommands::Show => {
            print!("{}", ctx.format_terminal());
            Ok(())
        }
    }
}

fn handle_categories(
    ctx: &ReportContext,
    top: Option<usize>,
    output: Option<PathBuf>,
) -> DashboardResult<()> {
    let report = ctx.categories();

    if let Some(path) = output {
        report.export_csv(create_output(&path)?)?;
        println!("Report exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(top));
    }

    Ok(())
}

fn handle_periods(
    ctx: &ReportContext,
    dimension: PeriodDimension,
    output: Option<PathBuf>,
) -> DashboardResult<()> {
    let report = ctx.periods(dimension);

    if let Some(path) = output {
        report.export_csv(create_output(&path)?)?;
        println!("Report exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}

fn handle_efficiency(ctx: &ReportContext, output: Option<PathBuf>) -> DashboardResult<()> {
    let report = ctx.efficiency();

    if let Some(path) = output {
        report.export_csv(create_output(&path)?)?;
        println!("Report exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}

/// Create a buffered output file
pub(crate) fn create_output(path: &Path) -> DashboardResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        DashboardError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
