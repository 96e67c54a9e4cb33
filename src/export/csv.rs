//! CSV Export functionality
//!
//! Flattens every dashboard section into one spreadsheet-compatible table.
//! The `Section` column tells the sections apart.

use std::io::Write;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Money, PeriodDimension, Utilization};
use crate::reports::ReportContext;

const HEADER: [&str; 9] = [
    "Section",
    "Label",
    "Spent",
    "Budget",
    "Balance",
    "Percent Used",
    "Available",
    "Share",
    "Status",
];

/// One line of the flat export
#[derive(Default)]
struct FlatRow {
    section: String,
    label: String,
    spent: Option<Money>,
    budget: Option<Money>,
    balance: Option<Money>,
    utilization: Option<Utilization>,
    share: Option<f64>,
    status: String,
}

impl FlatRow {
    fn record(&self) -> [String; 9] {
        let money = |m: Option<Money>| m.map(|m| format!("{:.2}", m.as_f64())).unwrap_or_default();
        let pct = |p: Option<f64>| p.map(|p| format!("{:.2}", p)).unwrap_or_default();
        [
            self.section.clone(),
            self.label.clone(),
            money(self.spent),
            money(self.budget),
            money(self.balance),
            pct(self.utilization.and_then(|u| u.percent())),
            pct(self.utilization.and_then(|u| u.available())),
            pct(self.share),
            self.status.clone(),
        ]
    }
}

fn status_of(utilization: &Utilization) -> String {
    match utilization {
        Utilization::Percent(_) => String::new(),
        Utilization::ZeroBudget => "zero_budget".to_string(),
        Utilization::NoBudget => "no_budget".to_string(),
    }
}

fn flatten(ctx: &ReportContext) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    let summary = ctx.summary();
    rows.push(FlatRow {
        section: "summary".to_string(),
        label: ctx.coverage().label(),
        spent: Some(summary.total_spent),
        budget: Some(summary.total_budget),
        balance: Some(summary.balance),
        utilization: Some(summary.utilization),
        status: status_of(&summary.utilization),
        ..Default::default()
    });

    let categories = ctx.categories();
    for row in &categories.rows {
        rows.push(FlatRow {
            section: "category".to_string(),
            label: row.category.clone(),
            spent: Some(row.spent),
            budget: row.budget,
            balance: row.balance,
            utilization: Some(row.utilization),
            share: None,
            status: row.level.label().to_string(),
        });
    }
    rows.push(FlatRow {
        section: "category_total".to_string(),
        label: "TOTAL".to_string(),
        spent: Some(categories.totals.spent),
        budget: Some(categories.totals.budget),
        balance: Some(categories.totals.balance),
        utilization: Some(categories.totals.utilization),
        status: status_of(&categories.totals.utilization),
        ..Default::default()
    });

    for dimension in PeriodDimension::ALL {
        let section = dimension.to_string();
        let report = ctx.periods(dimension);
        for row in &report.rows {
            rows.push(FlatRow {
                section: section.clone(),
                label: row.label.clone(),
                spent: Some(row.spent),
                share: Some(row.share),
                ..Default::default()
            });
        }
        if report.unassigned_count > 0 {
            rows.push(FlatRow {
                section,
                label: "unassigned".to_string(),
                spent: Some(report.unassigned),
                ..Default::default()
            });
        }
    }

    for row in &ctx.efficiency().rows {
        rows.push(FlatRow {
            section: "efficiency".to_string(),
            label: row.category.clone(),
            spent: Some(row.spent),
            budget: row.budget,
            utilization: Some(row.utilization),
            status: row.zone.label().to_string(),
            ..Default::default()
        });
    }

    rows
}

/// Export every dashboard section to one CSV table
pub fn export_csv<W: Write>(ctx: &ReportContext, writer: &mut W) -> DashboardResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(HEADER)
        .map_err(|e| DashboardError::Export(e.to_string()))?;

    for row in flatten(ctx) {
        wtr.write_record(row.record())
            .map_err(|e| DashboardError::Export(e.to_string()))?;
    }

    wtr.flush()
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    Ok(())
}
