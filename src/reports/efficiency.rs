//! Efficiency Report
//!
//! Percentage of each category's budget consumed and the share still
//! available. Feeds the radar chart of the dashboard.

use std::io::Write;

use serde::Serialize;

use super::category::CategoryReport;
use crate::config::Thresholds;
use crate::display::report::{double_separator, format_percentage, separator};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Money, Utilization};

/// Budget consumption zone of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyZone {
    /// More than 100% used
    OverBudget,
    /// At or past the alert threshold
    Alert,
    Healthy,
    /// No numeric percentage
    Unbudgeted,
}

impl EfficiencyZone {
    pub fn classify(utilization: &Utilization, thresholds: &Thresholds) -> Self {
        match utilization.rounded() {
            Some(p) if p > 100.0 => Self::OverBudget,
            Some(p) if p >= thresholds.alert_zone_percent => Self::Alert,
            Some(_) => Self::Healthy,
            None => Self::Unbudgeted,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OverBudget => "over budget",
            Self::Alert => "alert",
            Self::Healthy => "healthy",
            Self::Unbudgeted => "unbudgeted",
        }
    }
}

/// Efficiency of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyRow {
    pub category: String,
    pub spent: Money,
    pub budget: Option<Money>,
    /// Percent used
    pub utilization: Utilization,
    /// 100 - percent used, negative when over budget
    pub available: Option<f64>,
    pub zone: EfficiencyZone,
}

/// Efficiency Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyReport {
    /// Budgeted rows by descending percent used, then the rest
    pub rows: Vec<EfficiencyRow>,
}

impl EfficiencyReport {
    /// Derive efficiency rows from the category report
    pub fn from_categories(categories: &CategoryReport, thresholds: &Thresholds) -> Self {
        let (mut measured, unmeasured): (Vec<EfficiencyRow>, Vec<EfficiencyRow>) = categories
            .rows
            .iter()
            .map(|row| EfficiencyRow {
                category: row.category.clone(),
                spent: row.spent,
                budget: row.budget,
                utilization: row.utilization,
                available: row.available(),
                zone: EfficiencyZone::classify(&row.utilization, thresholds),
            })
            .partition(|row| row.utilization.percent().is_some());

        measured.sort_by(|a, b| {
            let pa = a.utilization.percent().unwrap_or_default();
            let pb = b.utilization.percent().unwrap_or_default();
            pb.total_cmp(&pa)
        });
        measured.extend(unmeasured);

        Self { rows: measured }
    }

    /// Rows in a given zone
    pub fn in_zone(&self, zone: EfficiencyZone) -> impl Iterator<Item = &EfficiencyRow> {
        self.rows.iter().filter(move |r| r.zone == zone)
    }

    /// Find a row by category label
    pub fn find(&self, category: &str) -> Option<&EfficiencyRow> {
        self.rows.iter().find(|r| r.category == category)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Budget Efficiency by Category\n");
        output.push_str(&double_separator(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses in the reporting year.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<28} {:>12} {:>12} {:>14}\n",
            "Category", "Used", "Available", "Zone"
        ));
        output.push_str(&separator(72));
        output.push('\n');

        for row in &self.rows {
            let used = match row.utilization {
                Utilization::Percent(p) => format_percentage(p),
                other => other.to_string(),
            };
            let available = row
                .available
                .map(format_percentage)
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "{:<28} {:>12} {:>12} {:>14}\n",
                row.category,
                used,
                available,
                row.zone.label()
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> DashboardResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(["Category", "Percent Used", "Available", "Zone"])
            .map_err(|e| DashboardError::Export(e.to_string()))?;

        for row in &self.rows {
            wtr.write_record([
                row.category.clone(),
                row.utilization
                    .percent()
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_default(),
                row.available
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_default(),
                row.zone.label().to_string(),
            ])
            .map_err(|e| DashboardError::Export(e.to_string()))?;
        }

        wtr.flush()
            .map_err(|e| DashboardError::Export(e.to_string()))?;
        Ok(())
    }
}
