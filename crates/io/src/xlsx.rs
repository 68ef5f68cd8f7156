// Excel worksheet import (xlsx, xlsm, xls, xlsb, ods) as rows of cells

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{Duration, NaiveDate};
use log::debug;
use nplboard_extract::Cell;

/// Read one worksheet as rows of cells. `sheet` selects by name; the first
/// worksheet is used when it is `None`.
///
/// Rows and columns keep their absolute positions, so fixed column offsets
/// apply even when the used range does not start at A1.
pub fn read_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<Cell>>, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| format!("Sheet '{}' not found (have: {})", wanted, sheet_names.join(", ")))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| "Excel file contains no sheets".to_string())?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", name, e))?;

    let rows = range_rows(&range);
    debug!("sheet '{}': {} rows", name, rows.len());
    Ok(rows)
}

fn range_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = (0..start_row).map(|_| Vec::new()).collect();

    for data_row in range.rows() {
        let mut row: Vec<Cell> = (0..start_col).map(|_| Cell::Empty).collect();
        row.extend(data_row.iter().map(to_cell));
        rows.push(row);
    }
    rows
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
        // Date cells become dd/mm/yyyy text so a day column reads the same
        // as in the PDF path.
        Data::DateTime(dt) => match serial_to_date(dt.as_f64()) {
            Some(date) => Cell::Text(date.format("%d/%m/%Y").to_string()),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d") {
            Ok(date) => Cell::Text(date.format("%d/%m/%Y").to_string()),
            Err(_) => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Excel 1900-system serial to a calendar date. Serial 1 is 1900-01-01;
/// the epoch is shifted to 1899-12-30 to absorb the 1900 leap-year bug.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}
