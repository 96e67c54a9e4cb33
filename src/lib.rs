//! Budget Dashboard - expense metrics for a department's annual budget
//!
//! This library turns a workbook of expense records into the figures behind
//! an expense dashboard: the budget gauge, spending by category, spending by
//! month, quarter and semester, and budget efficiency per category.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, accounts, records, periods)
//! - `loader`: Reading and consolidating the source sheets
//! - `reports`: Metrics and aggregation engine
//! - `display`: Terminal formatting helpers
//! - `export`: JSON, YAML and CSV export
//! - `cli`: Command handlers for the `dashboard` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_dashboard::config::{DashboardPaths, Settings};
//! use budget_dashboard::loader::open_source;
//! use budget_dashboard::reports::ReportContext;
//!
//! let paths = DashboardPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut source = open_source(&settings.resolve_source(&paths, None))?;
//! let ctx = ReportContext::load(source.as_mut(), &settings)?;
//! println!("{}", ctx.summary().total_spent);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod reports;

pub use error::{DashboardError, DashboardResult};
