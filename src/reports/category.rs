//! Category Report
//!
//! Spending grouped by category and joined with each category's annual
//! budget. This is the matrix table and the bar chart of the dashboard.

use std::collections::{BTreeSet, HashMap};
use std::io::Write;

use serde::Serialize;
use tracing::warn;

use crate::config::{CategoryBudgetPolicy, Thresholds};
use crate::display::report::double_separator;
use crate::display::table::category_matrix;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{AccountId, ConsolidatedRecord, Money, Utilization};

/// How heavily a category has drawn on its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingLevel {
    High,
    Medium,
    Low,
    Unbudgeted,
}

impl SpendingLevel {
    /// Classify the displayed (one decimal) percentage against the thresholds
    pub fn classify(utilization: &Utilization, thresholds: &Thresholds) -> Self {
        match utilization.rounded() {
            Some(p) if p > thresholds.high_percent => Self::High,
            Some(p) if p > thresholds.medium_percent => Self::Medium,
            Some(_) => Self::Low,
            None => Self::Unbudgeted,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unbudgeted => "-",
        }
    }
}

/// One category of the matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    /// Category label
    pub category: String,
    /// Sum of amounts booked under the category
    pub spent: Money,
    /// Annual budget, `None` when no account in the category has one
    pub budget: Option<Money>,
    /// budget - spent, when a budget exists
    pub balance: Option<Money>,
    /// spent / budget * 100
    pub utilization: Utilization,
    /// Spending level
    pub level: SpendingLevel,
    /// Number of records in the category
    pub record_count: usize,
    /// Accounts in the category carry differing budgets
    pub budget_conflict: bool,
}

impl CategoryRow {
    /// Remaining share of the budget (100 - percent used)
    pub fn available(&self) -> Option<f64> {
        self.utilization.available()
    }
}

/// Totals row of the category matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    /// Sum of the budgets of the categories that have one
    pub budget: Money,
    /// Sum of spending across all categories
    pub spent: Money,
    /// Sum of the balances of the categories that have a budget
    pub balance: Money,
    /// spent / budget * 100 over the totals
    pub utilization: Utilization,
}

/// Category Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    /// Rows in descending order of spending
    pub rows: Vec<CategoryRow>,
    /// Totals row
    pub totals: CategoryTotals,
}

struct CategoryAccumulator {
    category: String,
    spent: Money,
    record_count: usize,
    first_budget: Option<Money>,
    account_budgets: Vec<(AccountId, Money)>,
    distinct_budgets: BTreeSet<Money>,
}

impl CategoryAccumulator {
    fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            spent: Money::zero(),
            record_count: 0,
            first_budget: None,
            account_budgets: Vec::new(),
            distinct_budgets: BTreeSet::new(),
        }
    }

    fn add(&mut self, record: &ConsolidatedRecord) {
        self.spent += record.amount;
        self.record_count += 1;

        if let Some(budget) = record.annual_budget {
            if self.first_budget.is_none() {
                self.first_budget = Some(budget);
            }
            if !self.account_budgets.iter().any(|(id, _)| id == &record.account_id) {
                self.account_budgets.push((record.account_id.clone(), budget));
                self.distinct_budgets.insert(budget);
            }
        }
    }

    fn budget(&self, policy: CategoryBudgetPolicy) -> Option<Money> {
        match policy {
            CategoryBudgetPolicy::First => self.first_budget,
            CategoryBudgetPolicy::SumOfAccounts => {
                if self.account_budgets.is_empty() {
                    None
                } else {
                    Some(self.account_budgets.iter().map(|(_, b)| *b).sum())
                }
            }
        }
    }

    fn into_row(self, policy: CategoryBudgetPolicy, thresholds: &Thresholds) -> CategoryRow {
        let budget = self.budget(policy);
        let budget_conflict = self.distinct_budgets.len() > 1;
        if budget_conflict {
            warn!(
                category = %self.category,
                accounts = self.account_budgets.len(),
                "accounts in category carry differing budgets"
            );
        }
        let utilization = Utilization::of(self.spent, budget);
        CategoryRow {
            level: SpendingLevel::classify(&utilization, thresholds),
            balance: budget.map(|b| b - self.spent),
            category: self.category,
            spent: self.spent,
            budget,
            utilization,
            record_count: self.record_count,
            budget_conflict,
        }
    }
}

impl CategoryReport {
    /// Generate the category report from consolidated records
    pub fn generate(
        records: &[ConsolidatedRecord],
        policy: CategoryBudgetPolicy,
        thresholds: &Thresholds,
    ) -> Self {
        let mut groups: Vec<CategoryAccumulator> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for record in records {
            let slot = *index.entry(record.category.as_str()).or_insert_with(|| {
                groups.push(CategoryAccumulator::new(&record.category));
                groups.len() - 1
            });
            groups[slot].add(record);
        }

        let mut rows: Vec<CategoryRow> = groups
            .into_iter()
            .map(|g| g.into_row(policy, thresholds))
            .collect();

        // Equal amounts fall back to label order
        rows.sort_by(|a, b| {
            b.spent
                .cmp(&a.spent)
                .then_with(|| a.category.cmp(&b.category))
        });

        let totals = Self::totals(&rows);
        Self { rows, totals }
    }

    fn totals(rows: &[CategoryRow]) -> CategoryTotals {
        let spent: Money = rows.iter().map(|r| r.spent).sum();
        let budgets: Vec<Money> = rows.iter().filter_map(|r| r.budget).collect();
        let budget: Money = budgets.iter().sum();
        let balance: Money = rows.iter().filter_map(|r| r.balance).sum();
        let utilization = if budgets.is_empty() {
            Utilization::NoBudget
        } else {
            Utilization::of(spent, Some(budget))
        };
        CategoryTotals {
            budget,
            spent,
            balance,
            utilization,
        }
    }

    /// Sum of spending over all categories
    pub fn total_spent(&self) -> Money {
        self.totals.spent
    }

    /// Find a row by category label
    pub fn find(&self, category: &str) -> Option<&CategoryRow> {
        self.rows.iter().find(|r| r.category == category)
    }

    /// The `limit` highest-spending categories
    pub fn top(&self, limit: usize) -> &[CategoryRow] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// Rows whose accounts carry differing budgets
    pub fn conflicts(&self) -> impl Iterator<Item = &CategoryRow> {
        self.rows.iter().filter(|r| r.budget_conflict)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, limit: Option<usize>) -> String {
        let rows = match limit {
            Some(n) => self.top(n),
            None => &self.rows[..],
        };

        let mut output = String::new();
        output.push_str("Spending by Category\n");
        output.push_str(&double_separator(60));
        output.push('\n');

        if rows.is_empty() {
            output.push_str("No expenses in the reporting year.\n");
            return output;
        }

        output.push_str(&category_matrix(rows, &self.totals));
        output.push('\n');

        let conflicts: Vec<&str> = rows
            .iter()
            .filter(|r| r.budget_conflict)
            .map(|r| r.category.as_str())
            .collect();
        if !conflicts.is_empty() {
            output.push_str(&format!(
                "\nCategories with differing account budgets: {}\n",
                conflicts.join(", ")
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> DashboardResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record([
            "Category",
            "Spent",
            "Budget",
            "Balance",
            "Percent Used",
            "Available",
            "Level",
            "Records",
            "Budget Conflict",
        ])
        .map_err(|e| DashboardError::Export(e.to_string()))?;

        for row in &self.rows {
            wtr.write_record([
                row.category.clone(),
                format!("{:.2}", row.spent.as_f64()),
                optional_money(row.budget),
                optional_money(row.balance),
                optional_percent(row.utilization.percent()),
                optional_percent(row.available()),
                row.level.label().to_string(),
                row.record_count.to_string(),
                row.budget_conflict.to_string(),
            ])
            .map_err(|e| DashboardError::Export(e.to_string()))?;
        }

        wtr.write_record([
            "TOTAL".to_string(),
            format!("{:.2}", self.totals.spent.as_f64()),
            format!("{:.2}", self.totals.budget.as_f64()),
            format!("{:.2}", self.totals.balance.as_f64()),
            optional_percent(self.totals.utilization.percent()),
            optional_percent(self.totals.utilization.available()),
            String::new(),
            self.rows.iter().map(|r| r.record_count).sum::<usize>().to_string(),
            String::new(),
        ])
        .map_err(|e| DashboardError::Export(e.to_string()))?;

        wtr.flush()
            .map_err(|e| DashboardError::Export(e.to_string()))?;
        Ok(())
    }
}

fn optional_money(amount: Option<Money>) -> String {
    amount
        .map(|m| format!("{:.2}", m.as_f64()))
        .unwrap_or_default()
}

fn optional_percent(pct: Option<f64>) -> String {
    pct.map(|p| format!("{:.2}", p)).unwrap_or_default()
}
