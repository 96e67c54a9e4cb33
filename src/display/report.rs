//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the dashboard reports.

use crate::models::{Money, Utilization};

/// Format an optional amount, showing a dash when absent
pub fn format_optional_money(amount: Option<Money>) -> String {
    amount
        .map(|m| m.format_grouped())
        .unwrap_or_else(|| "-".to_string())
}

/// Format a utilization the way the dashboard labels show it
pub fn format_utilization(utilization: &Utilization) -> String {
    match utilization {
        Utilization::Percent(p) => format!("{:.1}%", p),
        Utilization::ZeroBudget => "n/a (0)".to_string(),
        Utilization::NoBudget => "-".to_string(),
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}
