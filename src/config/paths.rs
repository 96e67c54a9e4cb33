//! Path management for the budget dashboard
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_DASHBOARD_DIR` environment variable (if set)
//! 2. The platform config directory joined with `budget-dashboard`
//!    (`$XDG_CONFIG_HOME` or `~/.config` on Unix, `%APPDATA%` on Windows)

use std::path::PathBuf;

use crate::error::DashboardError;

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "BUDGET_DASHBOARD_DIR";

/// File name of the default workbook inside the base directory
pub const DEFAULT_WORKBOOK: &str = "Base de Datos.xlsx";

/// Manages all paths used by the dashboard
#[derive(Debug, Clone)]
pub struct DashboardPaths {
    base_dir: PathBuf,
}

impl DashboardPaths {
    /// Create a new DashboardPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, DashboardError> {
        let base_dir = if let Ok(custom) = std::env::var(DIR_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create DashboardPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Workbook used when neither the CLI nor the settings name one
    pub fn default_source(&self) -> PathBuf {
        self.base_dir.join(DEFAULT_WORKBOOK)
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), DashboardError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DashboardError::Io(format!("Failed to create base directory: {}", e)))?;
        Ok(())
    }

    /// Check if settings have been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, DashboardError> {
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| DashboardError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("budget-dashboard"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.default_source(),
            temp_dir.path().join("Base de Datos.xlsx")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().join("nested").join("dir"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(!paths.is_initialized());
    }
}
