//! CSV / TSV reading via the `csv` crate.

use std::path::Path;

use ordersort_shared::{Cell, OrderSortError, Result, Table};

pub(crate) fn read(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        rows.push(record.iter().map(Cell::from).collect());
    }

    Ok(Table::from_rows(headers, rows))
}

fn csv_error(path: &Path, err: csv::Error) -> OrderSortError {
    let message = format!("failed to parse {}: {err}", path.display());
    match err.into_kind() {
        csv::ErrorKind::Io(source) => OrderSortError::io(path, source),
        _ => OrderSortError::spreadsheet(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ordersort-sheet-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn reads_header_and_ragged_rows() {
        let path = temp_file(
            "orders.csv",
            "Order Id ,Customer\nA1,Ann\nA2\n,Bob\n",
        );

        let table = read(&path, b',').unwrap();
        assert_eq!(table.column_names(), vec!["Order Id ", "Customer"]);
        assert_eq!(
            table.columns[0].cells,
            vec![Cell::Text("A1".into()), Cell::Text("A2".into()), Cell::Empty]
        );
        assert_eq!(table.columns[1].cells[1], Cell::Empty);

        cleanup(&path);
    }

    #[test]
    fn strips_utf8_bom_from_first_header() {
        let path = temp_file("bom.csv", "\u{feff}order id\nX9\n");

        let table = read(&path, b',').unwrap();
        assert_eq!(table.columns[0].name, "order id");

        cleanup(&path);
    }

    #[test]
    fn tab_delimited() {
        let path = temp_file("orders.tsv", "sku\torder id\nk1\t 77 \n");

        let table = read(&path, b'\t').unwrap();
        assert_eq!(table.columns[1].cells, vec![Cell::Text(" 77 ".into())]);

        cleanup(&path);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read(Path::new("/nonexistent/orders.csv"), b',').unwrap_err();
        assert!(matches!(err, OrderSortError::Io { .. }));
    }
}
