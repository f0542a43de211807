use rust_xlsxwriter::{Format, Formula, Workbook};
use std::path::Path;
use tempfile::tempdir;
use xldm_inspect::{inspect_workbook, InspectError};

fn write_grid(path: &Path, sheet_name: &str, rows: u32, cols: u16) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).unwrap();

    for row in 0..rows {
        for col in 0..cols {
            if row == 0 {
                worksheet
                    .write_string(row, col, &format!("Header {col}"))
                    .unwrap();
            } else {
                worksheet
                    .write_number(row, col, f64::from(row * 10) + f64::from(col))
                    .unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

// ===== Dimensions and counts =====

#[test]
fn test_full_grid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.xlsx");
    write_grid(&path, "Data", 20, 4);

    let summary = inspect_workbook(&path).unwrap();

    assert_eq!(summary.file_name(), "grid.xlsx");
    assert_eq!(summary.total_sheets(), 1);

    let sheet = &summary.sheets()[0];
    assert_eq!(sheet.sheet_name(), "Data");
    assert_eq!(sheet.dimensions(), "A1:D20");
    assert_eq!(sheet.max_row(), 20);
    assert_eq!(sheet.max_column(), 4);
    assert_eq!(sheet.non_empty_cells(), 80);
}

#[test]
fn test_empty_sheet_uses_default_range() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    workbook.save(&path).unwrap();

    let summary = inspect_workbook(&path).unwrap();
    let sheet = &summary.sheets()[0];

    assert_eq!(sheet.non_empty_cells(), 0);
    assert_eq!(sheet.max_row(), 1);
    assert_eq!(sheet.max_column(), 1);
    assert_eq!(sheet.dimensions(), "A1:A1");
}

#[test]
fn test_sparse_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sparse.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "top left").unwrap();
    worksheet.write_number(9, 5, 42.0).unwrap();
    worksheet.write_boolean(4, 2, false).unwrap();
    workbook.save(&path).unwrap();

    let summary = inspect_workbook(&path).unwrap();
    let sheet = &summary.sheets()[0];

    assert_eq!(sheet.dimensions(), "A1:F10");
    assert_eq!(sheet.max_row(), 10);
    assert_eq!(sheet.max_column(), 6);
    assert_eq!(sheet.non_empty_cells(), 3);
}

#[test]
fn test_formatted_blank_cells_extend_declared_range() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("formatted.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Data").unwrap();
    for row in 0..20u32 {
        for col in 0..4u16 {
            worksheet.write_number(row, col, f64::from(row)).unwrap();
        }
    }
    let bold = Format::new().set_bold();
    worksheet.write_blank(29, 5, &bold).unwrap();
    workbook.save(&path).unwrap();

    let summary = inspect_workbook(&path).unwrap();
    let sheet = &summary.sheets()[0];

    assert_eq!(sheet.dimensions(), "A1:F30");
    assert_eq!(sheet.max_row(), 30);
    assert_eq!(sheet.max_column(), 6);
    assert_eq!(sheet.non_empty_cells(), 80);
}

#[test]
fn test_formula_cells_count_by_cached_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("formulas.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_number(0, 0, 1.0).unwrap();
    worksheet.write_number(0, 1, 2.0).unwrap();
    worksheet
        .write_formula(0, 2, Formula::new("=A1+B1").set_result("3"))
        .unwrap();
    workbook.save(&path).unwrap();

    let summary = inspect_workbook(&path).unwrap();
    let sheet = &summary.sheets()[0];

    assert_eq!(sheet.dimensions(), "A1:C1");
    assert_eq!(sheet.non_empty_cells(), 3);
}

// ===== Workbook level =====

#[test]
fn test_sheet_order_and_file_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("multi.xlsx");

    let mut workbook = Workbook::new();
    for (name, cells) in [("Zeta", 3u32), ("Alpha", 1), ("Middle", 0)] {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).unwrap();
        for row in 0..cells {
            worksheet.write_number(row, 0, f64::from(row)).unwrap();
        }
    }
    workbook.save(&path).unwrap();

    let summary = inspect_workbook(&path).unwrap();

    let names: Vec<&str> = summary.sheets().iter().map(|s| s.sheet_name()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Middle"]);
    assert_eq!(summary.total_sheets(), summary.sheets().len());
    assert_eq!(summary.file_size(), std::fs::metadata(&path).unwrap().len());

    for sheet in summary.sheets() {
        assert!(sheet.non_empty_cells() <= sheet.max_row() * sheet.max_column());
    }
    assert_eq!(summary.sheet("Zeta").unwrap().non_empty_cells(), 3);
    assert_eq!(summary.sheet("Middle").unwrap().non_empty_cells(), 0);
}

#[test]
fn test_inspection_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("twice.xlsx");
    write_grid(&path, "Data", 5, 3);

    let first = inspect_workbook(&path).unwrap();
    let second = inspect_workbook(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_json_field_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("json.xlsx");
    write_grid(&path, "Data", 2, 2);

    let summary = inspect_workbook(&path).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["file_name"], "json.xlsx");
    assert_eq!(json["total_sheets"], 1);
    assert_eq!(json["sheets"][0]["sheet_name"], "Data");
    assert_eq!(json["sheets"][0]["dimensions"], "A1:B2");
    assert_eq!(json["sheets"][0]["non_empty_cells"], 4);
}

// ===== Failures =====

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.xlsx");

    let result = inspect_workbook(&path);
    assert!(matches!(result, Err(InspectError::NotFound { .. })));
}

#[test]
fn test_not_a_spreadsheet() {
    let dir = tempdir().unwrap();

    let disguised = dir.path().join("notes.xlsx");
    std::fs::write(&disguised, "just some text").unwrap();
    let result = inspect_workbook(&disguised);
    assert!(matches!(result, Err(InspectError::Format { .. })));

    let plain = dir.path().join("notes.txt");
    std::fs::write(&plain, "just some text").unwrap();
    let result = inspect_workbook(&plain);
    assert!(matches!(result, Err(InspectError::Format { .. })));
}

#[test]
fn test_error_messages_name_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.xlsx");

    let message = inspect_workbook(&path).unwrap_err().to_string();
    assert!(message.starts_with("File not found"));
    assert!(message.contains("nope.xlsx"));
}
