//! PDF adapter for ordersort, built on `lopdf`.
//!
//! - [`PdfDocument`] loads a PDF and exposes per-page text through
//!   [`PageTextSource`].
//! - [`reorder_pages`] writes a new PDF holding a chosen sequence of the
//!   source pages.

mod reorder;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

use std::path::Path;

use lopdf::{Document, ObjectId};
use tracing::{debug, instrument};

use ordersort_shared::{OrderSortError, PageTextSource, Result};

pub use reorder::{ReorderOptions, reorder_pages};

/// Placeholder lopdf emits for glyphs in fonts it cannot decode.
const UNDECODABLE_MARKER: &str = "?Identity-H Unimplemented?";

/// A loaded PDF with its pages in reading order.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    inner: Document,
    /// lopdf page numbers (1-based), indexed by zero-based page index.
    page_numbers: Vec<u32>,
    /// Page object ids, indexed by zero-based page index.
    page_ids: Vec<ObjectId>,
}

impl PdfDocument {
    /// Read and parse the PDF at `path`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| OrderSortError::io(path, e))?;
        let doc = Self::from_bytes(&bytes).map_err(|e| match e {
            OrderSortError::Pdf { message } => {
                OrderSortError::pdf(format!("{}: {message}", path.display()))
            }
            other => other,
        })?;
        debug!(pages = doc.page_count(), "PDF loaded");
        Ok(doc)
    }

    /// Parse a PDF held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(bytes)
            .map_err(|e| OrderSortError::pdf(format!("failed to parse PDF: {e}")))?;
        Ok(Self::from_document(inner))
    }

    fn from_document(inner: Document) -> Self {
        let pages = inner.get_pages();
        let page_numbers = pages.keys().copied().collect();
        let page_ids = pages.values().copied().collect();
        Self {
            inner,
            page_numbers,
            page_ids,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub(crate) fn document(&self) -> &Document {
        &self.inner
    }

    pub(crate) fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids.get(index).copied().ok_or_else(|| {
            OrderSortError::pdf(format!(
                "page {index} out of range (document has {} pages)",
                self.page_ids.len()
            ))
        })
    }
}

impl PageTextSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let number = self.page_numbers.get(index).copied().ok_or_else(|| {
            OrderSortError::pdf(format!(
                "page {index} out of range (document has {} pages)",
                self.page_numbers.len()
            ))
        })?;

        let text = self.inner.extract_text(&[number]).map_err(|e| {
            OrderSortError::pdf(format!("failed to extract text from page {index}: {e}"))
        })?;

        Ok(text.replace(UNDECODABLE_MARKER, ""))
    }
}
