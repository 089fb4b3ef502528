//! Identifier column lookup and key-list normalization.

use std::collections::HashSet;

use tracing::{debug, instrument};

use ordersort_shared::{Cell, Column, OrderId, OrderSortError, Result, Table};

/// Canonical form of a column header: trimmed and lowercased.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// First column whose normalized header equals the normalized `wanted`.
pub fn find_column<'a>(table: &'a Table, wanted: &str) -> Result<&'a Column> {
    let wanted = normalize_column_name(wanted);
    table
        .columns
        .iter()
        .find(|c| normalize_column_name(&c.name) == wanted)
        .ok_or_else(|| OrderSortError::schema(wanted, table.column_names()))
}

/// Trim, drop blanks, and deduplicate keeping first occurrence order.
///
/// Case is preserved: `a1` and `A1` are different identifiers.
pub fn dedupe_ids<I, S>(raw: I) -> Vec<OrderId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<OrderId> = HashSet::new();
    raw.into_iter()
        .filter_map(|value| OrderId::new(value.as_ref()))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Normalized identifiers from a column's cells.
pub fn normalize_cells(cells: &[Cell]) -> Vec<OrderId> {
    dedupe_ids(cells.iter().filter_map(Cell::to_key_text))
}

/// Locate the identifier column and return its normalized key list.
///
/// Fails with [`OrderSortError::Schema`] when no header matches. An empty
/// column is not an error.
#[instrument(skip_all, fields(column = %column))]
pub fn extract_order_ids(table: &Table, column: &str) -> Result<Vec<OrderId>> {
    let found = find_column(table, column)?;
    let ids = normalize_cells(&found.cells);

    debug!(
        header = %found.name,
        cells = found.cells.len(),
        ids = ids.len(),
        "identifier column normalized"
    );

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str, values: &[&str]) -> Column {
        Column {
            name: name.into(),
            cells: values.iter().map(|v| Cell::from(*v)).collect(),
        }
    }

    fn strings(ids: &[OrderId]) -> Vec<&str> {
        ids.iter().map(OrderId::as_str).collect()
    }

    #[test]
    fn dedupes_preserving_first_occurrence() {
        let ids = dedupe_ids(["A1", "A2", "A1"]);
        assert_eq!(strings(&ids), vec!["A1", "A2"]);
    }

    #[test]
    fn whitespace_variants_collapse_but_case_does_not() {
        let ids = dedupe_ids([" A1", "A1 ", "a1", "", "   "]);
        assert_eq!(strings(&ids), vec!["A1", "a1"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = ["  x ", "y", "x", "Z", " y", "z"];
        let once = dedupe_ids(raw);
        let twice = dedupe_ids(once.iter().map(OrderId::as_str));
        assert_eq!(once, twice);
    }

    #[test]
    fn numeric_cells_become_text_keys() {
        let cells = vec![
            Cell::Float(1001.0),
            Cell::Int(1001),
            Cell::Empty,
            Cell::Float(f64::NAN),
            Cell::Text("1002".into()),
        ];
        assert_eq!(strings(&normalize_cells(&cells)), vec!["1001", "1002"]);
    }

    #[test]
    fn column_name_normalization() {
        assert_eq!(normalize_column_name("  Order ID "), "order id");
        assert_eq!(normalize_column_name("ORDER id"), "order id");
    }

    #[test]
    fn finds_column_with_stray_whitespace_and_case() {
        let table = Table {
            columns: vec![
                text_column("Customer", &["Ann"]),
                text_column("Order Id ", &["A1"]),
            ],
        };
        let ids = extract_order_ids(&table, "order id").unwrap();
        assert_eq!(strings(&ids), vec!["A1"]);
    }

    #[test]
    fn first_matching_column_wins() {
        let table = Table {
            columns: vec![
                text_column("order id", &["first"]),
                text_column("ORDER ID", &["second"]),
            ],
        };
        let ids = extract_order_ids(&table, "Order ID").unwrap();
        assert_eq!(strings(&ids), vec!["first"]);
    }

    #[test]
    fn missing_column_is_schema_error() {
        let table = Table {
            columns: vec![text_column("Order", &["A1"]), text_column("id", &["1"])],
        };
        let err = extract_order_ids(&table, "order id").unwrap_err();
        match err {
            OrderSortError::Schema { column, available } => {
                assert_eq!(column, "order id");
                assert_eq!(available, vec!["Order", "id"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn empty_column_yields_no_ids() {
        let table = Table {
            columns: vec![text_column("order id", &[])],
        };
        assert!(extract_order_ids(&table, "order id").unwrap().is_empty());
    }

    #[test]
    fn custom_column_name() {
        let table = Table {
            columns: vec![text_column(" Invoice No", &["INV-1", "INV-1", "INV-2"])],
        };
        let ids = extract_order_ids(&table, "invoice no").unwrap();
        assert_eq!(strings(&ids), vec!["INV-1", "INV-2"]);
    }
}
