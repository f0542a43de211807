use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while inspecting a workbook
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot open {} as a spreadsheet: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InspectError>;
