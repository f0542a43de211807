use serde::Serialize;
use std::fmt;

/// Per-sheet result of an inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    sheet_name: String,
    dimensions: String,
    max_row: usize,
    max_column: usize,
    non_empty_cells: usize,
}

impl SheetSummary {
    pub(crate) fn new(
        sheet_name: impl Into<String>,
        dimensions: impl Into<String>,
        max_row: usize,
        max_column: usize,
        non_empty_cells: usize,
    ) -> Self {
        debug_assert!(non_empty_cells <= max_row * max_column);
        Self {
            sheet_name: sheet_name.into(),
            dimensions: dimensions.into(),
            max_row,
            max_column,
            non_empty_cells,
        }
    }

    /// Sheet name as stored in the workbook
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Used range in A1 notation, e.g. "A1:D20"
    pub fn dimensions(&self) -> &str {
        &self.dimensions
    }

    /// 1-based index of the last used row
    pub fn max_row(&self) -> usize {
        self.max_row
    }

    /// 1-based index of the last used column
    pub fn max_column(&self) -> usize {
        self.max_column
    }

    /// Number of cells in the used range holding a value
    pub fn non_empty_cells(&self) -> usize {
        self.non_empty_cells
    }
}

/// Result of inspecting one workbook file.
///
/// Only [`crate::inspect_workbook`] builds these, so `total_sheets` always
/// matches the number of sheet summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookSummary {
    file_name: String,
    total_sheets: usize,
    file_size: u64,
    sheets: Vec<SheetSummary>,
}

impl WorkbookSummary {
    pub(crate) fn new(file_name: impl Into<String>, file_size: u64, sheets: Vec<SheetSummary>) -> Self {
        Self {
            file_name: file_name.into(),
            total_sheets: sheets.len(),
            file_size,
            sheets,
        }
    }

    /// Base name of the inspected file
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Number of sheets in the workbook
    pub fn total_sheets(&self) -> usize {
        self.total_sheets
    }

    /// File size on disk in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Sheet summaries in workbook order
    pub fn sheets(&self) -> &[SheetSummary] {
        &self.sheets
    }

    /// Get a sheet summary by name
    pub fn sheet(&self, name: &str) -> Option<&SheetSummary> {
        self.sheets.iter().find(|s| s.sheet_name == name)
    }

    /// Sum of non-empty cells across all sheets
    pub fn total_non_empty_cells(&self) -> usize {
        self.sheets.iter().map(|s| s.non_empty_cells).sum()
    }
}

impl fmt::Display for WorkbookSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workbook analysis")?;
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "File name: {}", self.file_name)?;
        writeln!(f, "Sheets: {}", self.total_sheets)?;
        write!(f, "File size: {} bytes", self.file_size)?;

        for sheet in &self.sheets {
            write!(f, "\n\n{sheet}")?;
        }

        Ok(())
    }
}

impl fmt::Display for SheetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sheet: {}", self.sheet_name)?;
        writeln!(f, "Range: {}", self.dimensions)?;
        writeln!(f, "Rows: {}", self.max_row)?;
        writeln!(f, "Columns: {}", self.max_column)?;
        write!(f, "Non-empty cells: {}", self.non_empty_cells)
    }
}
