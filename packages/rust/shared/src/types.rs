//! Core domain types for ordersort runs.

use std::borrow::Borrow;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version for the run report format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// A normalized identifier: trimmed, non-empty, case preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Trim `raw` and wrap it. Returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for OrderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one sort run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tabular input
// ---------------------------------------------------------------------------

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// Coerce the cell to identifier text.
    ///
    /// Empty cells, blank text and NaN have no key. Integral floats drop
    /// their fractional part so `12345.0` reads as `12345`.
    pub fn to_key_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) if f.is_nan() => None,
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{f:.0}")),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }
}

/// One named column of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text as it appears in the source.
    pub name: String,
    /// Cell values below the header, top to bottom.
    pub cells: Vec<Cell>,
}

/// Column-oriented tabular data read from a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    /// Build a table from a header row and data rows.
    ///
    /// Short rows are padded with [`Cell::Empty`]; cells beyond the header
    /// width are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or(Cell::Empty));
            }
        }

        Self { columns }
    }

    /// Header names in source order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Number of data rows (the longest column).
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

/// One entry of the output sequence: the identifier and its source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub order_id: OrderId,
    /// Zero-based page number in the source document.
    pub page: usize,
}

/// The `<output>.report.json` written after a sort run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    pub run_id: RunId,
    /// Tool version that produced the report.
    pub tool_version: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub spreadsheet: PathBuf,
    pub source_pdf: PathBuf,
    pub output_pdf: PathBuf,
    /// Header of the identifier column as configured.
    pub id_column: String,
    pub source_page_count: usize,
    pub output_page_count: usize,
    /// SHA-256 of the written PDF.
    pub output_sha256: String,
    pub placements: Vec<Placement>,
    pub missing: Vec<OrderId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_trims_and_rejects_blank() {
        assert_eq!(OrderId::new("  A-100 \t").unwrap().as_str(), "A-100");
        assert!(OrderId::new("   ").is_none());
        assert!(OrderId::new("").is_none());
    }

    #[test]
    fn order_id_borrows_as_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(OrderId::new("X1").unwrap(), 3usize);
        assert_eq!(map.get("X1"), Some(&3));
    }

    #[test]
    fn cell_key_text_coercion() {
        assert_eq!(Cell::Empty.to_key_text(), None);
        assert_eq!(Cell::Text("  ".into()).to_key_text(), None);
        assert_eq!(Cell::Text(" ab ".into()).to_key_text().as_deref(), Some("ab"));
        assert_eq!(Cell::Int(42).to_key_text().as_deref(), Some("42"));
        assert_eq!(Cell::Float(12345.0).to_key_text().as_deref(), Some("12345"));
        assert_eq!(Cell::Float(1.5).to_key_text().as_deref(), Some("1.5"));
        assert_eq!(Cell::Float(f64::NAN).to_key_text(), None);
        assert_eq!(Cell::Bool(true).to_key_text().as_deref(), Some("True"));
    }

    #[test]
    fn table_from_rows_pads_short_rows() {
        let table = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![Cell::Int(1), Cell::Int(2), Cell::Int(99)],
                vec![Cell::Int(3)],
            ],
        );
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[1].cells, vec![Cell::Int(2), Cell::Empty]);
    }

    #[test]
    fn report_serialization() {
        let report = RunReport {
            schema_version: CURRENT_SCHEMA_VERSION,
            run_id: RunId::new(),
            tool_version: "0.1.0".into(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            spreadsheet: "orders.xlsx".into(),
            source_pdf: "invoices.pdf".into(),
            output_pdf: "sorted_by_order_id.pdf".into(),
            id_column: "order id".into(),
            source_page_count: 3,
            output_page_count: 1,
            output_sha256: "00".repeat(32),
            placements: vec![Placement {
                order_id: OrderId::new("A1").unwrap(),
                page: 2,
            }],
            missing: vec![OrderId::new("B2").unwrap()],
        };

        let json = serde_json::to_string_pretty(&report).expect("serialize");
        assert!(json.contains("\"order_id\": \"A1\""));
        let parsed: RunReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.missing[0].as_str(), "B2");
        assert_eq!(parsed.placements[0].page, 2);
    }
}
