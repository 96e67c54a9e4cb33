//! Expense, budget, and calendar records
//!
//! These are the typed rows produced by the loader. All of them are created
//! once when the workbook is read and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AccountId, Money, PeriodLabels};

/// One spending line from the expenses sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Account the expense was booked against
    pub account_id: AccountId,
    /// Date the expense was booked
    pub date: NaiveDate,
    /// Spending category label
    pub category: String,
    /// Amount spent (never negative)
    pub amount: Money,
}

/// Annual budget for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub account_id: AccountId,
    pub annual_budget: Money,
}

/// Period labels for one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub labels: PeriodLabels,
}

/// An expense enriched with its period labels and its account's budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedRecord {
    pub account_id: AccountId,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Money,
    /// Calendar labels, `None` when the date has no calendar row
    pub period: Option<PeriodLabels>,
    /// Account budget, `None` when the account has no budget row
    pub annual_budget: Option<Money>,
}

impl ConsolidatedRecord {
    /// Join an expense with its (optional) calendar and budget enrichment
    pub fn join(
        expense: ExpenseRecord,
        period: Option<PeriodLabels>,
        annual_budget: Option<Money>,
    ) -> Self {
        Self {
            account_id: expense.account_id,
            date: expense.date,
            category: expense.category,
            amount: expense.amount,
            period,
            annual_budget,
        }
    }

    /// The year this record belongs to for reporting purposes
    ///
    /// Uses the calendar's year label when the date matched, otherwise the
    /// expense date's own year.
    pub fn resolved_year(&self) -> i32 {
        use chrono::Datelike;
        self.period
            .as_ref()
            .map(|p| p.year)
            .unwrap_or_else(|| self.date.year())
    }

    /// Check if the record has calendar labels
    pub fn has_period(&self) -> bool {
        self.period.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(date: NaiveDate) -> ExpenseRecord {
        ExpenseRecord {
            account_id: AccountId::new("A"),
            date,
            category: "Travel".into(),
            amount: Money::from_units(100),
        }
    }

    #[test]
    fn test_resolved_year_prefers_calendar() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
        let labels = PeriodLabels::new("Enero", 1, "T1", "Sem 1", 2020).unwrap();
        let record = ConsolidatedRecord::join(expense(date), Some(labels), None);
        assert_eq!(record.resolved_year(), 2020);
    }

    #[test]
    fn test_resolved_year_falls_back_to_date() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
        let record = ConsolidatedRecord::join(expense(date), None, Some(Money::from_units(10)));
        assert_eq!(record.resolved_year(), 2019);
        assert!(!record.has_period());
        assert_eq!(record.annual_budget, Some(Money::from_units(10)));
    }
}
