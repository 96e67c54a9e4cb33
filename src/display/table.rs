//! Tabular rendering of the category matrix

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::{format_optional_money, format_utilization};
use crate::reports::{CategoryRow, CategoryTotals};

#[derive(Tabled)]
struct MatrixLine {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "% Used")]
    used: String,
    #[tabled(rename = "Level")]
    level: String,
}

impl From<&CategoryRow> for MatrixLine {
    fn from(row: &CategoryRow) -> Self {
        let mut category = row.category.clone();
        if row.budget_conflict {
            category.push_str(" *");
        }
        Self {
            category,
            budget: format_optional_money(row.budget),
            spent: row.spent.format_grouped(),
            balance: format_optional_money(row.balance),
            used: format_utilization(&row.utilization),
            level: row.level.label().to_string(),
        }
    }
}

/// Render category rows followed by the totals row
pub fn category_matrix(rows: &[CategoryRow], totals: &CategoryTotals) -> String {
    let mut lines: Vec<MatrixLine> = rows.iter().map(MatrixLine::from).collect();
    lines.push(MatrixLine {
        category: "TOTAL".to_string(),
        budget: totals.budget.format_grouped(),
        spent: totals.spent.format_grouped(),
        balance: totals.balance.format_grouped(),
        used: format_utilization(&totals.utilization),
        level: String::new(),
    });

    Table::new(lines)
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..5)).with(Alignment::right()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryBudgetPolicy, Thresholds};
    use crate::models::{AccountId, ConsolidatedRecord, ExpenseRecord, Money};
    use crate::reports::CategoryReport;
    use chrono::NaiveDate;

    #[test]
    fn test_matrix_has_header_rows_and_totals() {
        let records: Vec<ConsolidatedRecord> = [("Travel", 150, Some(1000)), ("Office", 40, None)]
            .into_iter()
            .map(|(category, amount, budget)| {
                ConsolidatedRecord::join(
                    ExpenseRecord {
                        account_id: AccountId::new(category),
                        date: NaiveDate::from_ymd_opt(2019, 1, 5).unwrap(),
                        category: category.into(),
                        amount: Money::from_units(amount),
                    },
                    None,
                    budget.map(Money::from_units),
                )
            })
            .collect();
        let report =
            CategoryReport::generate(&records, CategoryBudgetPolicy::First, &Thresholds::default());

        let output = category_matrix(&report.rows, &report.totals);
        let lines: Vec<&str> = output.lines().collect();
        // header, rule, two categories, totals
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Category") && lines[0].contains("% Used"));
        assert!(lines[2].contains("Travel") && lines[2].contains("15.0%"));
        assert!(lines[3].contains("Office"));
        assert!(lines[4].contains("TOTAL") && lines[4].contains("190"));
    }
}
