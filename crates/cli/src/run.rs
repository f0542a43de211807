//! Orchestrated processing of workbook files.

use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, warn};
use xldm_config::{ConfigError, ConfigSource, DatabaseConfig, REQUIRED_KEYS};
use xldm_inspect::inspect_workbook;

/// Per-run tallies
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub missing: usize,
    pub failed: usize,
    /// Skipped files and why, in input order
    pub problems: Vec<(PathBuf, String)>,
}

impl RunSummary {
    /// Whether every given file was processed
    pub fn is_clean(&self) -> bool {
        self.missing == 0 && self.failed == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} file(s), {} missing, {} failed",
            self.processed, self.missing, self.failed
        )
    }
}

/// Check configuration, "initialize" the database and inspect each file.
///
/// Missing or unreadable files are logged and skipped. Only configuration
/// problems stop the run.
pub fn run(source: &ConfigSource, files: &[PathBuf]) -> Result<RunSummary, ConfigError> {
    if let Err(e) = source.require(REQUIRED_KEYS) {
        error!(error = %e, "configuration check failed");
        return Err(e);
    }
    let db = DatabaseConfig::from_source(source)?;

    // No connection yet; the import pipeline will open one here
    info!("database ready: {}@{}", db.name, db.host);

    let mut summary = RunSummary::default();
    if files.is_empty() {
        warn!("no workbook files given");
        return Ok(summary);
    }

    for path in files {
        if !path.exists() {
            error!(path = %path.display(), "file not found");
            summary.missing += 1;
            summary.problems.push((path.clone(), "file not found".to_string()));
            continue;
        }

        info!(path = %path.display(), "processing file");
        match inspect_workbook(path) {
            Ok(workbook) => {
                info!(
                    file = workbook.file_name(),
                    sheets = workbook.total_sheets(),
                    cells = workbook.total_non_empty_cells(),
                    bytes = workbook.file_size(),
                    "inspected workbook"
                );
                summary.processed += 1;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to inspect workbook");
                summary.failed += 1;
                summary.problems.push((path.clone(), e.to_string()));
            }
        }
    }

    info!(
        processed = summary.processed,
        missing = summary.missing,
        failed = summary.failed,
        "run complete"
    );
    Ok(summary)
}
