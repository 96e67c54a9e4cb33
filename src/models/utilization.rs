//! Budget utilization ratios
//!
//! A percentage of budget consumed is only defined when a budget exists and
//! is non-zero. The two undefined cases are kept apart so that consumers can
//! tell "no budget configured" from "budget of zero".

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;
use crate::error::{DashboardError, DashboardResult};

/// Share of a budget already spent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "percent", rename_all = "snake_case")]
pub enum Utilization {
    /// spent / budget * 100
    Percent(f64),
    /// The budget is zero, so the ratio is undefined
    ZeroBudget,
    /// No budget is configured for this scope
    NoBudget,
}

impl Utilization {
    /// Compute utilization of an optional budget
    pub fn of(spent: Money, budget: Option<Money>) -> Self {
        match budget {
            None => Self::NoBudget,
            Some(b) if b.is_zero() => Self::ZeroBudget,
            Some(b) => Self::Percent(spent.cents() as f64 * 100.0 / b.cents() as f64),
        }
    }

    /// The percentage, if defined
    pub fn percent(&self) -> Option<f64> {
        match self {
            Self::Percent(p) => Some(*p),
            _ => None,
        }
    }

    /// The percentage rounded to one decimal, as the dashboard shows it
    pub fn rounded(&self) -> Option<f64> {
        self.percent().map(|p| (p * 10.0).round() / 10.0)
    }

    /// Remaining share of the budget (100 - displayed percent); negative when over budget
    pub fn available(&self) -> Option<f64> {
        self.rounded().map(|p| 100.0 - p)
    }

    /// The percentage, or the named condition that makes it undefined
    pub fn require(&self, scope: &str) -> DashboardResult<f64> {
        match self {
            Self::Percent(p) => Ok(*p),
            Self::ZeroBudget => Err(DashboardError::zero_budget(scope)),
            Self::NoBudget => Err(DashboardError::no_budget(scope)),
        }
    }
}

impl fmt::Display for Utilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{:.1}%", p),
            Self::ZeroBudget => write!(f, "n/a (zero budget)"),
            Self::NoBudget => write!(f, "n/a (no budget)"),
        }
    }
}
