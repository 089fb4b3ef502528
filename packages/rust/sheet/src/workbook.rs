//! Workbook reading via calamine.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use ordersort_shared::{Cell, OrderSortError, Result, Table};

pub(crate) fn read(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        OrderSortError::spreadsheet(format!("failed to open {}: {e}", path.display()))
    })?;

    let sheet_names = workbook.sheet_names();
    let name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| {
                OrderSortError::spreadsheet(format!(
                    "sheet '{wanted}' not found (available: {})",
                    sheet_names.join(", ")
                ))
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| OrderSortError::spreadsheet("no sheets found in workbook"))?,
    };

    let range = workbook.worksheet_range(&name).map_err(|e| {
        OrderSortError::spreadsheet(format!("failed to read sheet '{name}': {e}"))
    })?;

    debug!(sheet = %name, "worksheet selected");
    Ok(range_to_table(&range))
}

fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };

    let headers = header.iter().map(header_text).collect();
    let body = rows
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    Table::from_rows(headers, body)
}

fn header_text(data: &Data) -> String {
    match to_cell(data) {
        Cell::Text(s) => s,
        other => other.to_key_text().unwrap_or_default(),
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Text(
            dt.as_datetime()
                .map(|d| d.to_string())
                .unwrap_or_else(|| dt.to_string()),
        ),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        // #N/A, #REF! and friends carry no identifier
        Data::Error(_) => Cell::Empty,
    }
}
