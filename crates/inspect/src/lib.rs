//! Workbook inspection for xldm
//!
//! Opens a spreadsheet (xlsx, xlsm, xlsb, xls or ods) and reports, for every
//! sheet in stored order, its used range, last used row and column, and the
//! number of cells holding a value.
//!
//! # Examples
//!
//! ```no_run
//! use xldm_inspect::inspect_workbook;
//!
//! let summary = inspect_workbook("employees.xlsx").unwrap();
//! for sheet in summary.sheets() {
//!     println!("{}: {} ({} cells)", sheet.sheet_name(), sheet.dimensions(), sheet.non_empty_cells());
//! }
//! ```
//!
//! The summary also renders as a plain-text report:
//!
//! ```no_run
//! let summary = xldm_inspect::inspect_workbook("employees.xlsx").unwrap();
//! println!("{summary}");
//! ```

mod a1_notation;
mod error;
mod inspector;
mod summary;

/// Re-export A1 notation helpers.
pub use a1_notation::{column_index_to_letters, to_a1_notation};
/// Re-export inspection errors.
pub use error::{InspectError, Result};
/// Re-export the inspector entry point.
pub use inspector::{inspect_workbook, is_present, SUPPORTED_EXTENSIONS};
/// Re-export summary types.
pub use summary::{SheetSummary, WorkbookSummary};
