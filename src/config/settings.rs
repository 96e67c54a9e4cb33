//! User settings for the budget dashboard
//!
//! Holds the workbook location, the sheet and column names of the three
//! sources, the total budget the gauge measures against, and the spending
//! thresholds used to classify categories.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::DashboardPaths;
use crate::error::DashboardError;
use crate::models::Money;

/// Total budget used when the settings do not name one
pub const DEFAULT_TOTAL_BUDGET: Money = Money::from_units(621_000);

/// Where the overall budget figure comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TotalBudget {
    /// A fixed figure for the reporting scope
    Fixed { amount: Money },
    /// The sum of the account budgets in the budget sheet, one per account
    FromBudgetSheet,
}

impl Default for TotalBudget {
    fn default() -> Self {
        Self::Fixed {
            amount: DEFAULT_TOTAL_BUDGET,
        }
    }
}

/// How a category's budget is derived from the accounts booked under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryBudgetPolicy {
    /// First non-empty account budget seen in the category
    #[default]
    First,
    /// Sum of the budgets of the distinct accounts in the category
    SumOfAccounts,
}

/// Column names of the expenses sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseColumns {
    pub sheet: String,
    pub account: String,
    pub date: String,
    pub category: String,
    pub amount: String,
}

impl Default for ExpenseColumns {
    fn default() -> Self {
        Self {
            sheet: "Gastos".into(),
            account: "Cuenta".into(),
            date: "Fecha".into(),
            category: "Categoría".into(),
            amount: "Gastos".into(),
        }
    }
}

/// Column names of the budget sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetColumns {
    pub sheet: String,
    pub account: String,
    pub annual_budget: String,
}

impl Default for BudgetColumns {
    fn default() -> Self {
        Self {
            sheet: "Presupuesto".into(),
            account: "cuenta".into(),
            annual_budget: "Presupuesto Anual".into(),
        }
    }
}

/// Column names of the calendar sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarColumns {
    pub sheet: String,
    pub date: String,
    pub month_name: String,
    pub month_number: String,
    pub quarter: String,
    pub semester: String,
    pub year: String,
}

impl Default for CalendarColumns {
    fn default() -> Self {
        Self {
            sheet: "Tabla Calendario".into(),
            date: "Fecha".into(),
            month_name: "Mes".into(),
            month_number: "Mes Num".into(),
            quarter: "Trimestre".into(),
            semester: "Semestre".into(),
            year: "Año".into(),
        }
    }
}

/// Sheet and column layout of the source workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SourceSchema {
    pub expenses: ExpenseColumns,
    pub budget: BudgetColumns,
    pub calendar: CalendarColumns,
}

/// Percentage thresholds for classifying spending
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Category rows above this are "high" spending
    pub high_percent: f64,
    /// Category rows above this are "medium" spending
    pub medium_percent: f64,
    /// Gauge alert marker
    pub alert_percent: f64,
    /// Start of the efficiency alert zone
    pub alert_zone_percent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high_percent: 90.0,
            medium_percent: 70.0,
            alert_percent: 90.0,
            alert_zone_percent: 75.0,
        }
    }
}

/// User settings for the budget dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Workbook or CSV directory to read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,

    /// Sheet and column names
    #[serde(default)]
    pub schema: SourceSchema,

    /// Overall budget the summary measures against
    #[serde(default)]
    pub total_budget: TotalBudget,

    /// Category budget derivation
    #[serde(default)]
    pub category_budget: CategoryBudgetPolicy,

    /// Spending thresholds
    #[serde(default)]
    pub thresholds: Thresholds,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            source_path: None,
            schema: SourceSchema::default(),
            total_budget: TotalBudget::default(),
            category_budget: CategoryBudgetPolicy::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &DashboardPaths) -> Result<Self, DashboardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                DashboardError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DashboardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DashboardPaths) -> Result<(), DashboardError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            DashboardError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolve the source to read: explicit override, then settings, then default
    pub fn resolve_source(&self, paths: &DashboardPaths, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.source_path.clone())
            .unwrap_or_else(|| paths.default_source())
    }

    /// Check thresholds and schema names for consistency
    pub fn validate(&self) -> Result<(), DashboardError> {
        let t = &self.thresholds;
        let all = [
            t.high_percent,
            t.medium_percent,
            t.alert_percent,
            t.alert_zone_percent,
        ];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(DashboardError::Config(
                "Thresholds must be finite, non-negative percentages".into(),
            ));
        }
        if t.medium_percent > t.high_percent {
            return Err(DashboardError::Config(format!(
                "Medium threshold {} exceeds high threshold {}",
                t.medium_percent, t.high_percent
            )));
        }

        let sheets = [
            &self.schema.expenses.sheet,
            &self.schema.budget.sheet,
            &self.schema.calendar.sheet,
        ];
        if sheets.iter().any(|s| s.trim().is_empty()) {
            return Err(DashboardError::Config("Sheet names cannot be empty".into()));
        }

        if let TotalBudget::Fixed { amount } = self.total_budget {
            if amount.is_negative() {
                return Err(DashboardError::Config(format!(
                    "Total budget cannot be negative: {}",
                    amount
                )));
            }
        }

        Ok(())
    }
}
