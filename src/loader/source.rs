//! Tabular data sources
//!
//! The loader only needs named sheets of cells. A workbook (XLSX, XLS, ODS)
//! provides them through calamine; a directory of `<sheet>.csv` files
//! provides them through the csv crate; `MemorySource` holds them in memory.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Reader, Sheets};
use tracing::debug;

use super::cell::CellValue;
use super::sheet::Sheet;
use crate::error::{DashboardError, DashboardResult};

/// A provider of named sheets
pub trait TabularSource {
    /// Short description for logs and messages
    fn describe(&self) -> String;

    /// Read one sheet by name
    ///
    /// # Errors
    ///
    /// `MissingSheet` when no sheet has that name; I/O or workbook errors
    /// when the sheet exists but cannot be read.
    fn read_sheet(&mut self, name: &str) -> DashboardResult<Sheet>;
}

/// Open the source at `path`: a directory is read as CSV files, anything
/// else as a workbook
pub fn open_source(path: &Path) -> DashboardResult<Box<dyn TabularSource>> {
    if path.is_dir() {
        Ok(Box::new(CsvDirSource::new(path)))
    } else {
        Ok(Box::new(WorkbookSource::open(path)?))
    }
}

/// A spreadsheet workbook read with calamine
pub struct WorkbookSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    /// Open a workbook file
    pub fn open(path: &Path) -> DashboardResult<Self> {
        if !path.exists() {
            return Err(DashboardError::Io(format!(
                "Workbook not found: {}",
                path.display()
            )));
        }
        let workbook = open_workbook_auto(path).map_err(|e| {
            DashboardError::Workbook(format!("Failed to open {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "opened workbook");
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
        })
    }
}

impl TabularSource for WorkbookSource {
    fn describe(&self) -> String {
        format!("workbook {}", self.path.display())
    }

    fn read_sheet(&mut self, name: &str) -> DashboardResult<Sheet> {
        if !self.workbook.sheet_names().iter().any(|s| s == name) {
            return Err(DashboardError::MissingSheet(name.to_string()));
        }
        let range = self.workbook.worksheet_range(name)?;
        let rows: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(CellValue::from).collect())
            .collect();
        debug!(sheet = name, rows = rows.len(), "read worksheet");
        Ok(Sheet::from_rows(name, rows))
    }
}

/// A directory holding one `<sheet name>.csv` file per sheet
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the CSV file backing a sheet
    pub fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", name))
    }
}

impl TabularSource for CsvDirSource {
    fn describe(&self) -> String {
        format!("CSV directory {}", self.dir.display())
    }

    fn read_sheet(&mut self, name: &str) -> DashboardResult<Sheet> {
        let path = self.sheet_path(name);
        if !path.is_file() {
            debug!(path = %path.display(), "CSV sheet file missing");
            return Err(DashboardError::MissingSheet(name.to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(CellValue::text).collect());
        }
        debug!(sheet = name, rows = rows.len(), "read CSV sheet");
        Ok(Sheet::from_rows(name, rows))
    }
}

/// Sheets held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: HashMap<String, Sheet>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet, replacing any sheet of the same name
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.insert(sheet.name().to_string(), sheet);
        self
    }
}

impl TabularSource for MemorySource {
    fn describe(&self) -> String {
        format!("in-memory source ({} sheets)", self.sheets.len())
    }

    fn read_sheet(&mut self, name: &str) -> DashboardResult<Sheet> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| DashboardError::MissingSheet(name.to_string()))
    }
}
