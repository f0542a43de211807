use crate::a1_notation::range_to_a1;
use crate::error::{InspectError, Result};
use crate::summary::{SheetSummary, WorkbookSummary};
use calamine::{open_workbook_auto, Data, Dimensions, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// File extensions the inspector can open
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Inspect a workbook and summarize every sheet.
///
/// The file is opened read-only and formulas are reported by their cached
/// results. The reader (and its file handle) is dropped before returning on
/// every path. A failure reading any sheet fails the whole call.
///
/// # Errors
///
/// Returns [`InspectError::NotFound`] if `path` does not exist,
/// [`InspectError::Format`] if it cannot be parsed as a spreadsheet and
/// [`InspectError::Sheet`] if a sheet cannot be read.
pub fn inspect_workbook<P: AsRef<Path>>(path: P) -> Result<WorkbookSummary> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InspectError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|source| InspectError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in sheet_names {
        let sheet_error = |source| InspectError::Sheet {
            sheet: sheet_name.clone(),
            source,
        };
        let declared = declared_dimensions(&mut workbook, &sheet_name).map_err(sheet_error)?;
        let range = workbook.worksheet_range(&sheet_name).map_err(sheet_error)?;

        let sheet = summarize_range(&sheet_name, declared, &range);
        debug!(
            sheet = sheet.sheet_name(),
            dimensions = sheet.dimensions(),
            non_empty = sheet.non_empty_cells(),
            "inspected sheet"
        );
        sheets.push(sheet);
    }
    drop(workbook);

    let file_size = std::fs::metadata(path)?.len();
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    Ok(WorkbookSummary::new(file_name, file_size, sheets))
}

/// Whether a cell holds a value.
///
/// Only `Data::Empty` is absent: empty strings, whitespace and error values
/// are stored values and count as present.
pub fn is_present(data: &Data) -> bool {
    !matches!(data, Data::Empty)
}

/// The `<dimension>` a sheet declares in its own metadata.
///
/// Only xlsx and xlsb store one; other formats yield `None`.
fn declared_dimensions(
    workbook: &mut Sheets<BufReader<File>>,
    sheet_name: &str,
) -> std::result::Result<Option<Dimensions>, calamine::Error> {
    let dimensions = match workbook {
        Sheets::Xlsx(xlsx) => xlsx
            .worksheet_cells_reader(sheet_name)
            .map_err(calamine::Error::Xlsx)?
            .dimensions(),
        Sheets::Xlsb(xlsb) => xlsb
            .worksheet_cells_reader(sheet_name)
            .map_err(calamine::Error::Xlsb)?
            .dimensions(),
        _ => return Ok(None),
    };
    Ok(Some(dimensions))
}

/// Build a sheet summary from the declared dimension and the value range.
///
/// The reported range is the declared one, widened to cover any value
/// outside it (a missing or stale tag). With neither, the sheet reports the
/// minimal default range `A1:A1`.
fn summarize_range(
    sheet_name: &str,
    declared: Option<Dimensions>,
    range: &Range<Data>,
) -> SheetSummary {
    let declared = declared.map(|d| (d.start, d.end));
    let values = range.start().zip(range.end());

    let (start, end) = match (declared, values) {
        (Some((ds, de)), Some((vs, ve))) => (
            (ds.0.min(vs.0), ds.1.min(vs.1)),
            (de.0.max(ve.0), de.1.max(ve.1)),
        ),
        (Some(bounds), None) | (None, Some(bounds)) => bounds,
        (None, None) => ((0, 0), (0, 0)),
    };
    let start = (start.0 as usize, start.1 as usize);
    let end = (end.0 as usize, end.1 as usize);

    let non_empty_cells = range
        .rows()
        .map(|row| row.iter().filter(|cell| is_present(cell)).count())
        .sum();

    SheetSummary::new(
        sheet_name,
        range_to_a1(start, end),
        end.0 + 1,
        end.1 + 1,
        non_empty_cells,
    )
}
