//! Calendar period labels and reporting dimensions
//!
//! Labels are taken verbatim from the calendar sheet ("Enero", "T1",
//! "Sem 1"). Ordering never relies on the label text: months sort by their
//! month number, quarters and semesters by the earliest month they cover.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed year the whole analysis is scoped to
pub const REPORTING_YEAR: i32 = 2019;

/// Period labels attached to a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodLabels {
    /// Month name as written in the calendar ("Enero")
    pub month_name: String,
    /// Month number, 1 through 12
    pub month_number: u32,
    /// Quarter label ("T1")
    pub quarter: String,
    /// Semester label ("Sem 1")
    pub semester: String,
    /// Calendar year
    pub year: i32,
}

impl PeriodLabels {
    /// Create a set of labels, validating the month number
    pub fn new(
        month_name: impl Into<String>,
        month_number: u32,
        quarter: impl Into<String>,
        semester: impl Into<String>,
        year: i32,
    ) -> Result<Self, String> {
        if !(1..=12).contains(&month_number) {
            return Err(format!(
                "month number {} is outside 1-12",
                month_number
            ));
        }
        Ok(Self {
            month_name: month_name.into(),
            month_number,
            quarter: quarter.into(),
            semester: semester.into(),
            year,
        })
    }

    /// Get the label for a reporting dimension
    pub fn label(&self, dimension: PeriodDimension) -> &str {
        match dimension {
            PeriodDimension::Month => &self.month_name,
            PeriodDimension::Quarter => &self.quarter,
            PeriodDimension::Semester => &self.semester,
        }
    }
}

/// Calendar dimension a period aggregate is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodDimension {
    Month,
    Quarter,
    Semester,
}

impl PeriodDimension {
    /// All dimensions in dashboard order
    pub const ALL: [PeriodDimension; 3] = [Self::Month, Self::Quarter, Self::Semester];

    /// Human-readable name for headers
    pub fn title(&self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Quarter => "Quarter",
            Self::Semester => "Semester",
        }
    }
}

impl fmt::Display for PeriodDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Semester => write!(f, "semester"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_number_validation() {
        assert!(PeriodLabels::new("Enero", 1, "T1", "Sem 1", 2019).is_ok());
        assert!(PeriodLabels::new("Nada", 0, "T1", "Sem 1", 2019).is_err());
        assert!(PeriodLabels::new("Nada", 13, "T5", "Sem 3", 2019).is_err());
    }

    #[test]
    fn test_label_by_dimension() {
        let labels = PeriodLabels::new("Abril", 4, "T2", "Sem 1", 2019).unwrap();
        assert_eq!(labels.label(PeriodDimension::Month), "Abril");
        assert_eq!(labels.label(PeriodDimension::Quarter), "T2");
        assert_eq!(labels.label(PeriodDimension::Semester), "Sem 1");
    }

    #[test]
    fn test_dimension_serde() {
        let json = serde_json::to_string(&PeriodDimension::Quarter).unwrap();
        assert_eq!(json, "\"quarter\"");
    }
}
