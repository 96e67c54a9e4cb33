//! Strongly-typed identifier wrappers
//!
//! Account identifiers come from spreadsheet cells that may hold either a
//! number or text. Both normalize to the same textual key so that a budget
//! row typed as `51001` joins an expense row typed as `"51001"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a ledger account, used as the budget join key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account ID from text, trimming surrounding whitespace
    ///
    /// Text holding an integral number ("51001.0") normalizes like the number.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && n.fract() == 0.0 && !trimmed.is_empty() => {
                Self::from_number(n)
            }
            _ => Self(trimmed.to_string()),
        }
    }

    /// Create an account ID from a numeric cell
    pub fn from_number(n: f64) -> Self {
        if n.fract() == 0.0 && n.abs() < 1e15 {
            Self(format!("{}", n as i64))
        } else {
            Self(n.to_string())
        }
    }

    /// Get the normalized key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the key is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
