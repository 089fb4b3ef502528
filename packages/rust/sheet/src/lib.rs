//! Tabular source adapter for ordersort.
//!
//! Reads a spreadsheet into a column-oriented [`Table`]. The first row is
//! the header. Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) go
//! through `calamine`; delimited text (`.csv`, `.tsv`) through `csv`.

mod delimited;
mod workbook;

use std::path::Path;

use tracing::{debug, instrument};

use ordersort_shared::{OrderSortError, Result, Table};

/// Spreadsheet formats understood by [`load_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
    Tsv,
}

impl SheetFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" => Ok(Self::Tsv),
            _ => Err(OrderSortError::spreadsheet(format!(
                "unsupported spreadsheet type '{}': expected .xlsx, .xls, .ods, .csv or .tsv",
                path.display()
            ))),
        }
    }
}

/// Load the table from `path`.
///
/// `sheet` selects a worksheet by name for workbook formats and defaults to
/// the first sheet; it is ignored for delimited text.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let format = SheetFormat::from_path(path)?;
    debug!(?format, sheet, "reading spreadsheet");

    let table = match format {
        SheetFormat::Workbook => workbook::read(path, sheet)?,
        SheetFormat::Csv => delimited::read(path, b',')?,
        SheetFormat::Tsv => delimited::read(path, b'\t')?,
    };

    debug!(
        columns = table.columns.len(),
        rows = table.row_count(),
        "spreadsheet loaded"
    );

    Ok(table)
}
