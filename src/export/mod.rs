//! Export module for the budget dashboard
//!
//! Provides export of the complete report context in multiple formats:
//! - CSV: one flat table with a section column (spreadsheet-compatible)
//! - JSON: machine-readable, with schema version and generation metadata
//! - YAML: human-readable, same structure as JSON

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_csv;
pub use json::{export_json, DashboardExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::config::Settings;
    use crate::loader::consolidate;
    use crate::models::{AccountId, BudgetEntry, CalendarEntry, ExpenseRecord, Money, PeriodLabels};
    use crate::reports::ReportContext;

    /// Travel 100 + 50 in January, Office 10 on a date without calendar labels
    pub fn sample_context() -> ReportContext {
        let expense = |account: &str, d: NaiveDate, category: &str, amount: i64| ExpenseRecord {
            account_id: AccountId::new(account),
            date: d,
            category: category.into(),
            amount: Money::from_units(amount),
        };
        let jan5 = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
        let jan10 = NaiveDate::from_ymd_opt(2019, 1, 10).unwrap();
        let aug20 = NaiveDate::from_ymd_opt(2019, 8, 20).unwrap();

        let expenses = vec![
            expense("A", jan5, "Travel", 100),
            expense("B", jan10, "Travel", 50),
            expense("C", aug20, "Office", 10),
        ];
        let budgets = vec![
            BudgetEntry {
                account_id: AccountId::new("A"),
                annual_budget: Money::from_units(1000),
            },
            BudgetEntry {
                account_id: AccountId::new("B"),
                annual_budget: Money::from_units(500),
            },
        ];
        let calendar = [jan5, jan10]
            .into_iter()
            .map(|date| CalendarEntry {
                date,
                labels: PeriodLabels::new("Enero", 1, "T1", "Sem 1", 2019).unwrap(),
            })
            .collect();

        ReportContext::build(consolidate(expenses, budgets, calendar), &Settings::default())
    }
}
