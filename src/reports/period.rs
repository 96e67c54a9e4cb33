//! Period Report
//!
//! Spending grouped by a calendar dimension (month, quarter, or semester).
//! Feeds the line, donut, and column charts of the dashboard.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::display::report::{double_separator, format_bar, separator};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{ConsolidatedRecord, Money, PeriodDimension};

/// Spending of one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRow {
    /// Period label as written in the calendar
    pub label: String,
    /// Smallest month number in the period, used for ordering
    pub first_month: u32,
    /// Sum of amounts in the period
    pub spent: Money,
    /// Percentage of the assigned total
    pub share: f64,
    /// Number of records in the period
    pub record_count: usize,
}

/// Period Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub dimension: PeriodDimension,
    /// Rows in calendar order
    pub rows: Vec<PeriodRow>,
    /// Sum of all rows
    pub assigned_total: Money,
    /// Spending whose date has no calendar labels
    pub unassigned: Money,
    /// Number of records without calendar labels
    pub unassigned_count: usize,
}

impl PeriodReport {
    /// Generate the report for one dimension
    pub fn generate(records: &[ConsolidatedRecord], dimension: PeriodDimension) -> Self {
        let mut rows: Vec<PeriodRow> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut unassigned = Money::zero();
        let mut unassigned_count = 0;

        for record in records {
            let Some(labels) = record.period.as_ref() else {
                unassigned += record.amount;
                unassigned_count += 1;
                continue;
            };

            let label = labels.label(dimension);
            let slot = *index.entry(label).or_insert_with(|| {
                rows.push(PeriodRow {
                    label: label.to_string(),
                    first_month: labels.month_number,
                    spent: Money::zero(),
                    share: 0.0,
                    record_count: 0,
                });
                rows.len() - 1
            });

            let row = &mut rows[slot];
            row.spent += record.amount;
            row.record_count += 1;
            row.first_month = row.first_month.min(labels.month_number);
        }

        rows.sort_by(|a, b| {
            a.first_month
                .cmp(&b.first_month)
                .then_with(|| a.label.cmp(&b.label))
        });

        let assigned_total: Money = rows.iter().map(|r| r.spent).sum();
        if assigned_total.is_positive() {
            for row in &mut rows {
                row.share = row.spent.cents() as f64 * 100.0 / assigned_total.cents() as f64;
            }
        }

        Self {
            dimension,
            rows,
            assigned_total,
            unassigned,
            unassigned_count,
        }
    }

    /// The last period in calendar order
    pub fn latest(&self) -> Option<&PeriodRow> {
        self.rows.last()
    }

    /// Find a row by label
    pub fn find(&self, label: &str) -> Option<&PeriodRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// The period with the highest spending
    pub fn peak(&self) -> Option<&PeriodRow> {
        self.rows.iter().max_by_key(|r| r.spent)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending by {}\n", self.dimension.title()));
        output.push_str(&double_separator(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses with calendar labels.\n");
        } else {
            let max = self
                .peak()
                .map(|r| r.spent.as_f64())
                .unwrap_or_default();

            output.push_str(&format!(
                "{:<14} {:>14} {:>8}  {}\n",
                self.dimension.title(),
                "Spent",
                "Share",
                "Trend"
            ));
            output.push_str(&separator(72));
            output.push('\n');

            for row in &self.rows {
                output.push_str(&format!(
                    "{:<14} {:>14} {:>7.1}%  {}\n",
                    row.label,
                    row.spent.format_grouped(),
                    row.share,
                    format_bar(row.spent.as_f64(), max, 30)
                ));
            }

            output.push_str(&separator(72));
            output.push('\n');
            output.push_str(&format!(
                "{:<14} {:>14}\n",
                "Total",
                self.assigned_total.format_grouped()
            ));
        }

        if self.unassigned_count > 0 {
            output.push_str(&format!(
                "{:<14} {:>14}  ({} records without calendar labels)\n",
                "Unassigned",
                self.unassigned.format_grouped(),
                self.unassigned_count
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> DashboardResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record([self.dimension.title(), "Spent", "Share", "Records"])
            .map_err(|e| DashboardError::Export(e.to_string()))?;

        for row in &self.rows {
            wtr.write_record([
                row.label.clone(),
                format!("{:.2}", row.spent.as_f64()),
                format!("{:.2}", row.share),
                row.record_count.to_string(),
            ])
            .map_err(|e| DashboardError::Export(e.to_string()))?;
        }

        wtr.flush()
            .map_err(|e| DashboardError::Export(e.to_string()))?;
        Ok(())
    }
}
