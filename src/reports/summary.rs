//! Summary Metrics
//!
//! The scalar figures behind the dashboard gauge: total spent, total budget,
//! balance, and percentage used.

use serde::Serialize;

use crate::display::report::{double_separator, format_bar};
use crate::error::DashboardResult;
use crate::models::{ConsolidatedRecord, Money, Utilization};

/// Scalar summary of the reporting year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    /// Sum of every consolidated amount
    pub total_spent: Money,
    /// Budget the spending is measured against
    pub total_budget: Money,
    /// total_budget - total_spent, negative when over budget
    pub balance: Money,
    /// total_spent / total_budget * 100
    pub utilization: Utilization,
    /// Number of records summed
    pub record_count: usize,
}

impl MetricsSummary {
    /// Compute the summary over the consolidated records
    pub fn compute(records: &[ConsolidatedRecord], total_budget: Money) -> Self {
        let total_spent: Money = records.iter().map(|r| r.amount).sum();
        Self {
            total_spent,
            total_budget,
            balance: total_budget - total_spent,
            utilization: Utilization::of(total_spent, Some(total_budget)),
            record_count: records.len(),
        }
    }

    /// Percentage of the total budget used
    ///
    /// # Errors
    ///
    /// `ZeroBudget` when the total budget is zero.
    pub fn percent_used(&self) -> DashboardResult<f64> {
        self.utilization.require("the total budget")
    }

    /// Check if spending exceeds the total budget
    pub fn is_over_budget(&self) -> bool {
        self.balance.is_negative()
    }

    /// Build the gauge scale for this summary
    pub fn gauge(&self, alert_percent: f64) -> GaugeScale {
        GaugeScale::new(self.total_budget, alert_percent)
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, gauge: &GaugeScale) -> String {
        let mut output = String::new();

        output.push_str("Budget Summary\n");
        output.push_str(&double_separator(60));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>20}\n", "Total Spent:", self.total_spent.format_grouped()));
        output.push_str(&format!("{:<20} {:>20}\n", "Total Budget:", self.total_budget.format_grouped()));
        output.push_str(&format!("{:<20} {:>20}\n", "Balance:", self.balance.format_grouped()));
        output.push_str(&format!("{:<20} {:>20}\n", "Percent Used:", self.utilization.to_string()));

        if let Some(pct) = self.utilization.percent() {
            output.push('\n');
            output.push_str(&format!("[{}]\n", format_bar(pct, 100.0, 40)));
            output.push_str(&format!(
                "Bands: {} | Alert at {}\n",
                gauge
                    .bands
                    .iter()
                    .map(|b| format!("{} <= {}", b.label, b.upper.format_thousands()))
                    .collect::<Vec<_>>()
                    .join(", "),
                gauge.alert.format_thousands()
            ));
            let band = gauge.band_for(self.total_spent).map_or("past budget", |b| b.label.as_str());
            output.push_str(&format!("Current band: {}\n", band));
            if gauge.is_over_alert(self.total_spent) {
                output.push_str("Spending has passed the alert marker\n");
            }
        }

        output
    }
}

/// One colored band of the gauge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GaugeBand {
    pub label: String,
    pub lower: Money,
    pub upper: Money,
}

/// Gauge axis: bands at 50, 75 and 100 percent of the budget plus an alert marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeScale {
    pub max: Money,
    pub bands: Vec<GaugeBand>,
    pub alert_percent: f64,
    pub alert: Money,
}

impl GaugeScale {
    pub fn new(total_budget: Money, alert_percent: f64) -> Self {
        let edges = [("low", 50.0), ("medium", 75.0), ("high", 100.0)];
        let mut lower = Money::zero();
        let mut bands = Vec::with_capacity(edges.len());
        for (label, pct) in edges {
            let upper = share_of(total_budget, pct);
            bands.push(GaugeBand {
                label: label.to_string(),
                lower,
                upper,
            });
            lower = upper;
        }

        Self {
            max: total_budget,
            bands,
            alert_percent,
            alert: share_of(total_budget, alert_percent),
        }
    }

    /// Check if an amount lies past the alert marker
    pub fn is_over_alert(&self, spent: Money) -> bool {
        spent > self.alert
    }

    /// The band an amount falls in, `None` past the end of the scale
    pub fn band_for(&self, spent: Money) -> Option<&GaugeBand> {
        self.bands.iter().find(|b| spent <= b.upper)
    }
}

fn share_of(amount: Money, percent: f64) -> Money {
    Money::from_cents((amount.cents() as f64 * percent / 100.0).round() as i64)
}
