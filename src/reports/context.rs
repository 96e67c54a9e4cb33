//! Report context
//!
//! Everything the dashboard shows, computed once from the consolidated table
//! and handed by reference to every presentation call.

use serde::Serialize;
use tracing::debug;

use super::category::CategoryReport;
use super::efficiency::EfficiencyReport;
use super::period::PeriodReport;
use super::summary::{GaugeScale, MetricsSummary};
use crate::config::{Settings, TotalBudget};
use crate::error::DashboardResult;
use crate::loader::{load, ConsolidatedTable, TabularSource};
use crate::models::{Money, PeriodDimension, REPORTING_YEAR};

/// First and last months present in the data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub year: i32,
    pub first_month: Option<String>,
    pub last_month: Option<String>,
}

impl Coverage {
    fn from_months(months: &PeriodReport) -> Self {
        Self {
            year: REPORTING_YEAR,
            first_month: months.rows.first().map(|r| r.label.clone()),
            last_month: months.rows.last().map(|r| r.label.clone()),
        }
    }

    /// Subtitle such as "Enero - Agosto 2019"
    pub fn label(&self) -> String {
        match (&self.first_month, &self.last_month) {
            (Some(first), Some(last)) if first == last => format!("{} {}", first, self.year),
            (Some(first), Some(last)) => format!("{} - {} {}", first, last, self.year),
            _ => self.year.to_string(),
        }
    }
}

/// Immutable bundle of every dashboard figure
#[derive(Debug, Clone)]
pub struct ReportContext {
    table: ConsolidatedTable,
    summary: MetricsSummary,
    gauge: GaugeScale,
    categories: CategoryReport,
    months: PeriodReport,
    quarters: PeriodReport,
    semesters: PeriodReport,
    efficiency: EfficiencyReport,
    coverage: Coverage,
}

impl ReportContext {
    /// Load the source and build the context in one step
    pub fn load(source: &mut dyn TabularSource, settings: &Settings) -> DashboardResult<Self> {
        let table = load(source, &settings.schema)?;
        Ok(Self::build(table, settings))
    }

    /// Compute every report from a consolidated table
    pub fn build(table: ConsolidatedTable, settings: &Settings) -> Self {
        let total_budget = resolve_total_budget(&table, settings.total_budget);
        let records = table.records();

        let summary = MetricsSummary::compute(records, total_budget);
        let gauge = summary.gauge(settings.thresholds.alert_percent);
        let categories =
            CategoryReport::generate(records, settings.category_budget, &settings.thresholds);
        let months = PeriodReport::generate(records, PeriodDimension::Month);
        let quarters = PeriodReport::generate(records, PeriodDimension::Quarter);
        let semesters = PeriodReport::generate(records, PeriodDimension::Semester);
        let efficiency = EfficiencyReport::from_categories(&categories, &settings.thresholds);
        let coverage = Coverage::from_months(&months);

        debug!(
            categories = categories.rows.len(),
            months = months.rows.len(),
            total_spent = %summary.total_spent,
            "built report context"
        );

        Self {
            table,
            summary,
            gauge,
            categories,
            months,
            quarters,
            semesters,
            efficiency,
            coverage,
        }
    }

    pub fn table(&self) -> &ConsolidatedTable {
        &self.table
    }

    pub fn summary(&self) -> &MetricsSummary {
        &self.summary
    }

    pub fn gauge(&self) -> &GaugeScale {
        &self.gauge
    }

    pub fn categories(&self) -> &CategoryReport {
        &self.categories
    }

    /// The period report for a dimension
    pub fn periods(&self, dimension: PeriodDimension) -> &PeriodReport {
        match dimension {
            PeriodDimension::Month => &self.months,
            PeriodDimension::Quarter => &self.quarters,
            PeriodDimension::Semester => &self.semesters,
        }
    }

    pub fn efficiency(&self) -> &EfficiencyReport {
        &self.efficiency
    }

    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    /// Check if total spending passed the gauge's alert marker
    pub fn is_over_alert(&self) -> bool {
        self.gauge.is_over_alert(self.summary.total_spent)
    }

    /// Every section in dashboard order
    pub fn format_terminal(&self) -> String {
        let mut sections = vec![
            format!("Expense Dashboard {}\n", self.coverage.label()),
            self.summary.format_terminal(&self.gauge),
            self.categories.format_terminal(None),
        ];
        sections.extend(
            PeriodDimension::ALL
                .iter()
                .map(|d| self.periods(*d).format_terminal()),
        );
        sections.push(self.efficiency.format_terminal());
        sections.join("\n")
    }
}

/// The total budget the summary measures against
pub fn resolve_total_budget(table: &ConsolidatedTable, mode: TotalBudget) -> Money {
    match mode {
        TotalBudget::Fixed { amount } => amount,
        TotalBudget::FromBudgetSheet => table.budget_sheet_total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{consolidate, CellValue, MemorySource, Sheet};
    use crate::models::{AccountId, BudgetEntry, CalendarEntry, ExpenseRecord, PeriodLabels};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, m, d).unwrap()
    }

    fn expense(account: &str, d: NaiveDate, category: &str, amount: i64) -> ExpenseRecord {
        ExpenseRecord {
            account_id: AccountId::new(account),
            date: d,
            category: category.into(),
            amount: Money::from_units(amount),
        }
    }

    fn table() -> ConsolidatedTable {
        let expenses = vec![
            expense("A", date(1, 5), "Travel", 100),
            expense("B", date(1, 10), "Travel", 50),
            expense("C", date(3, 2), "Office", 40),
            // No calendar row for this date
            expense("A", date(8, 20), "Travel", 10),
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
        let calendar = vec![
            CalendarEntry {
                date: date(1, 5),
                labels: PeriodLabels::new("Enero", 1, "T1", "Sem 1", 2019).unwrap(),
            },
            CalendarEntry {
                date: date(1, 10),
                labels: PeriodLabels::new("Enero", 1, "T1", "Sem 1", 2019).unwrap(),
            },
            CalendarEntry {
                date: date(3, 2),
                labels: PeriodLabels::new("Marzo", 3, "T1", "Sem 1", 2019).unwrap(),
            },
        ];
        consolidate(expenses, budgets, calendar)
    }

    #[test]
    fn test_build_context() {
        let ctx = ReportContext::build(table(), &Settings::default());

        assert_eq!(ctx.summary().total_spent, Money::from_units(200));
        assert_eq!(ctx.summary().total_budget, Money::from_units(621_000));
        assert_eq!(
            ctx.categories().find("Travel").unwrap().spent,
            Money::from_units(160)
        );

        // The unmatched date counts in the total but in no period
        let months = ctx.periods(PeriodDimension::Month);
        assert_eq!(months.assigned_total, Money::from_units(190));
        assert_eq!(months.unassigned, Money::from_units(10));
        assert_eq!(ctx.periods(PeriodDimension::Quarter).rows.len(), 1);

        assert_eq!(ctx.coverage().label(), "Enero - Marzo 2019");
        assert!(!ctx.is_over_alert());
    }

    #[test]
    fn test_total_budget_from_budget_sheet() {
        let settings = Settings {
            total_budget: TotalBudget::FromBudgetSheet,
            ..Settings::default()
        };
        let ctx = ReportContext::build(table(), &settings);
        assert_eq!(ctx.summary().total_budget, Money::from_units(1500));
        assert_eq!(ctx.summary().balance, Money::from_units(1300));
    }

    #[test]
    fn test_budget_sheet_total_ignores_repeated_accounts() {
        let budgets = vec![
            BudgetEntry {
                account_id: AccountId::new("A"),
                annual_budget: Money::from_units(1000),
            },
            BudgetEntry {
                account_id: AccountId::new("A"),
                annual_budget: Money::from_units(9999),
            },
        ];
        let table = consolidate(vec![expense("A", date(1, 5), "Travel", 100)], budgets, vec![]);
        let settings = Settings {
            total_budget: TotalBudget::FromBudgetSheet,
            ..Settings::default()
        };
        let ctx = ReportContext::build(table, &settings);
        assert_eq!(ctx.summary().total_budget, Money::from_units(1000));
        assert_eq!(ctx.categories().find("Travel").unwrap().budget, Some(Money::from_units(1000)));
    }

    #[test]
    fn test_build_is_idempotent() {
        let settings = Settings::default();
        let first = ReportContext::build(table(), &settings);
        let second = ReportContext::build(table(), &settings);
        assert_eq!(first.summary(), second.summary());
        assert_eq!(first.categories(), second.categories());
        assert_eq!(first.efficiency(), second.efficiency());
        for dim in PeriodDimension::ALL {
            assert_eq!(first.periods(dim), second.periods(dim));
        }
        assert_eq!(first.format_terminal(), second.format_terminal());
    }

    #[test]
    fn test_context_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReportContext>();
    }

    #[test]
    fn test_load_reports_missing_sheet() {
        let mut source = MemorySource::new().with_sheet(Sheet::from_rows(
            "Gastos",
            vec![vec![CellValue::text("Cuenta")]],
        ));
        assert!(ReportContext::load(&mut source, &Settings::default()).is_err());
    }

    #[test]
    fn test_empty_coverage_label() {
        let ctx = ReportContext::build(consolidate(vec![], vec![], vec![]), &Settings::default());
        assert_eq!(ctx.coverage().label(), "2019");
        assert!(ctx.summary().total_spent.is_zero());
    }
}
