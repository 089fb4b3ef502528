//! Page text access shared by the PDF adapter and the matching core.

use crate::error::Result;

/// A paginated document that can hand out the plain text of each page.
///
/// Pages are addressed by zero-based index in `0..page_count()`.
pub trait PageTextSource {
    fn page_count(&self) -> usize;

    /// Extracted text of one page. Errors from the underlying reader are
    /// returned as-is.
    fn page_text(&self, index: usize) -> Result<String>;
}

/// In-memory pages, one string per page.
impl<S: AsRef<str>> PageTextSource for [S] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.get(index)
            .map(|s| s.as_ref().to_string())
            .ok_or_else(|| {
                crate::OrderSortError::pdf(format!(
                    "page {index} out of range (document has {} pages)",
                    self.len()
                ))
            })
    }
}
