//! Consolidation of expenses, calendar labels, and account budgets
//!
//! Expenses are left-joined to the calendar on exact date and to the budget
//! sheet on account key, then restricted to the reporting year. Unmatched
//! joins leave the enrichment empty instead of dropping the expense.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::sheet::Sheet;
use super::source::TabularSource;
use crate::config::{BudgetColumns, CalendarColumns, ExpenseColumns, SourceSchema};
use crate::error::DashboardResult;
use crate::models::{
    AccountId, BudgetEntry, CalendarEntry, ConsolidatedRecord, ExpenseRecord, Money, PeriodLabels,
    REPORTING_YEAR,
};

/// Counters describing one load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Expense rows read
    pub expense_rows: usize,
    /// Budget rows kept
    pub budget_rows: usize,
    /// Calendar rows kept
    pub calendar_rows: usize,
    /// Expenses dropped because they fall outside the reporting year
    pub outside_reporting_year: usize,
    /// Kept expenses whose date has no calendar row
    pub unmatched_calendar: usize,
    /// Kept expenses whose account has no budget row
    pub unmatched_budget: usize,
    /// Calendar rows ignored because their date was already present
    pub duplicate_calendar_dates: usize,
    /// Budget rows ignored because their account was already present
    pub duplicate_budget_accounts: usize,
}

/// The joined, filtered view of the reporting year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedTable {
    records: Vec<ConsolidatedRecord>,
    budgets: Vec<BudgetEntry>,
    stats: LoadStats,
}

impl ConsolidatedTable {
    /// Records in source order
    pub fn records(&self) -> &[ConsolidatedRecord] {
        &self.records
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of the account budgets, counting each account once
    pub fn budget_sheet_total(&self) -> Money {
        self.budgets.iter().map(|b| b.annual_budget).sum()
    }
}

/// Read the three sheets named by `schema` and consolidate them
///
/// # Errors
///
/// Any missing sheet, missing column, or malformed cell aborts the load.
pub fn load(source: &mut dyn TabularSource, schema: &SourceSchema) -> DashboardResult<ConsolidatedTable> {
    debug!(source = %source.describe(), "loading sources");

    let expense_sheet = source.read_sheet(&schema.expenses.sheet)?;
    let budget_sheet = source.read_sheet(&schema.budget.sheet)?;
    let calendar_sheet = source.read_sheet(&schema.calendar.sheet)?;

    let expenses = read_expenses(&expense_sheet, &schema.expenses)?;
    let budgets = read_budget(&budget_sheet, &schema.budget)?;
    let calendar = read_calendar(&calendar_sheet, &schema.calendar)?;

    let table = consolidate(expenses, budgets, calendar);
    let stats = table.stats();
    info!(
        records = table.len(),
        expense_rows = stats.expense_rows,
        outside_reporting_year = stats.outside_reporting_year,
        unmatched_calendar = stats.unmatched_calendar,
        unmatched_budget = stats.unmatched_budget,
        "consolidated {} expenses for {}",
        table.len(),
        REPORTING_YEAR
    );
    Ok(table)
}

/// Parse the expenses sheet
pub fn read_expenses(sheet: &Sheet, cols: &ExpenseColumns) -> DashboardResult<Vec<ExpenseRecord>> {
    let account = sheet.column(&cols.account)?;
    let date = sheet.column(&cols.date)?;
    let category = sheet.column(&cols.category)?;
    let amount = sheet.column(&cols.amount)?;

    let mut out = Vec::with_capacity(sheet.len());
    for row in sheet.rows() {
        out.push(ExpenseRecord {
            account_id: row.account_id(&account)?,
            date: row.date(&date)?,
            category: row.text(&category)?,
            amount: row.non_negative_money(&amount)?,
        });
    }
    debug!(rows = out.len(), sheet = sheet.name(), "parsed expenses");
    Ok(out)
}

/// Parse the budget sheet
///
/// Rows without an account or without a budget figure carry no information
/// for the join and are skipped.
pub fn read_budget(sheet: &Sheet, cols: &BudgetColumns) -> DashboardResult<Vec<BudgetEntry>> {
    let account = sheet.column(&cols.account)?;
    let annual = sheet.column(&cols.annual_budget)?;

    let mut out = Vec::with_capacity(sheet.len());
    for row in sheet.rows() {
        if row.is_blank(&account) || row.is_blank(&annual) {
            warn!(
                sheet = sheet.name(),
                row = row.number(),
                "skipping budget row without account or amount"
            );
            continue;
        }
        out.push(BudgetEntry {
            account_id: row.account_id(&account)?,
            annual_budget: row.non_negative_money(&annual)?,
        });
    }
    debug!(rows = out.len(), sheet = sheet.name(), "parsed budget");
    Ok(out)
}

/// Parse the calendar sheet
pub fn read_calendar(sheet: &Sheet, cols: &CalendarColumns) -> DashboardResult<Vec<CalendarEntry>> {
    let date = sheet.column(&cols.date)?;
    let month_name = sheet.column(&cols.month_name)?;
    let month_number = sheet.column(&cols.month_number)?;
    let quarter = sheet.column(&cols.quarter)?;
    let semester = sheet.column(&cols.semester)?;
    let year = sheet.column(&cols.year)?;

    let mut out = Vec::with_capacity(sheet.len());
    for row in sheet.rows() {
        let number = row.integer(&month_number)?;
        let number = u32::try_from(number)
            .map_err(|_| row.invalid(&month_number, format!("{} is not a month", number)))?;
        let year_value = row.integer(&year)?;
        let year_value = i32::try_from(year_value)
            .map_err(|_| row.invalid(&year, format!("{} is not a year", year_value)))?;

        let labels = PeriodLabels::new(
            row.text(&month_name)?,
            number,
            row.text(&quarter)?,
            row.text(&semester)?,
            year_value,
        )
        .map_err(|reason| row.invalid(&month_number, reason))?;

        out.push(CalendarEntry {
            date: row.date(&date)?,
            labels,
        });
    }
    debug!(rows = out.len(), sheet = sheet.name(), "parsed calendar");
    Ok(out)
}

/// Join and filter already-parsed records
pub fn consolidate(
    expenses: Vec<ExpenseRecord>,
    budgets: Vec<BudgetEntry>,
    calendar: Vec<CalendarEntry>,
) -> ConsolidatedTable {
    let mut stats = LoadStats {
        expense_rows: expenses.len(),
        budget_rows: budgets.len(),
        calendar_rows: calendar.len(),
        ..Default::default()
    };

    let mut periods: HashMap<NaiveDate, PeriodLabels> = HashMap::with_capacity(calendar.len());
    for entry in calendar {
        if periods.contains_key(&entry.date) {
            stats.duplicate_calendar_dates += 1;
            warn!(date = %entry.date, "duplicate calendar date, keeping first row");
            continue;
        }
        periods.insert(entry.date, entry.labels);
    }

    let mut account_budgets: HashMap<AccountId, Money> = HashMap::with_capacity(budgets.len());
    let mut kept_budgets = Vec::with_capacity(budgets.len());
    for entry in budgets {
        if account_budgets.contains_key(&entry.account_id) {
            stats.duplicate_budget_accounts += 1;
            warn!(account = %entry.account_id, "duplicate budget account, keeping first row");
            continue;
        }
        account_budgets.insert(entry.account_id.clone(), entry.annual_budget);
        kept_budgets.push(entry);
    }

    let mut records = Vec::with_capacity(expenses.len());
    for expense in expenses {
        let period = periods.get(&expense.date).cloned();
        let budget = account_budgets.get(&expense.account_id).copied();
        let record = ConsolidatedRecord::join(expense, period, budget);

        if record.resolved_year() != REPORTING_YEAR {
            stats.outside_reporting_year += 1;
            continue;
        }
        if record.period.is_none() {
            stats.unmatched_calendar += 1;
            debug!(date = %record.date, "expense date has no calendar row");
        }
        if record.annual_budget.is_none() {
            stats.unmatched_budget += 1;
            debug!(account = %record.account_id, "expense account has no budget row");
        }
        records.push(record);
    }

    ConsolidatedTable {
        records,
        budgets: kept_budgets,
        stats,
    }
}
