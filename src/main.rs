use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use budget_dashboard::cli::{handle_export, handle_report_command, load_context, ExportFormat, ReportCommands};
use budget_dashboard::config::{DashboardPaths, Settings, TotalBudget};

#[derive(Parser)]
#[command(
    name = "dashboard",
    author = "Kaylee Beyene",
    version,
    about = "Expense dashboard metrics for an annual budget workbook",
    long_about = "Reads a workbook of expenses, account budgets and calendar labels, \
                  consolidates the reporting year, and prints the figures behind the \
                  expense dashboard: the budget gauge, spending by category and period, \
                  and budget efficiency."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Workbook file or directory of CSV sheets to read
    #[arg(long, global = true, env = "BUDGET_DASHBOARD_SOURCE")]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Export every dashboard section to a file
    Export {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: u8) {
    let log_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "budget_dashboard={},dashboard={}",
                    log_level, log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = DashboardPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let ctx = load_context(&paths, &settings, cli.source)?;
            handle_report_command(&ctx, cmd)?;
        }
        Some(Commands::Export {
            output,
            format,
            pretty,
        }) => {
            let ctx = load_context(&paths, &settings, cli.source)?;
            handle_export(&ctx, &output, format, pretty)?;
        }
        Some(Commands::Init) => {
            println!("Initializing budget dashboard at: {}", paths.base_dir().display());
            if let Some(source) = cli.source {
                settings.source_path = Some(source);
            }
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
            println!(
                "Source: {}",
                settings.resolve_source(&paths, None).display()
            );
            println!();
            println!("Run 'dashboard show' to see the full dashboard.");
        }
        Some(Commands::Config) => {
            println!("Budget Dashboard Configuration");
            println!("==============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!(
                "Source:         {}",
                settings.resolve_source(&paths, cli.source).display()
            );
            println!();
            println!("Settings:");
            match settings.total_budget {
                TotalBudget::Fixed { amount } => {
                    println!("  Total budget:     {} (fixed)", amount.format_grouped())
                }
                TotalBudget::FromBudgetSheet => {
                    println!("  Total budget:     sum of the budget sheet")
                }
            }
            println!("  Category budget:  {:?}", settings.category_budget);
            println!(
                "  Sheets:           {}, {}, {}",
                settings.schema.expenses.sheet,
                settings.schema.budget.sheet,
                settings.schema.calendar.sheet
            );
            let t = &settings.thresholds;
            println!(
                "  Thresholds:       high > {}%, medium > {}%, alert {}%, alert zone {}%",
                t.high_percent, t.medium_percent, t.alert_percent, t.alert_zone_percent
            );
        }
        None => {
            println!("Budget Dashboard - expense metrics for an annual budget");
            println!();
            println!("Run 'dashboard --help' for usage information.");
            println!("Run 'dashboard show' to print the full dashboard.");
        }
    }

    Ok(())
}
