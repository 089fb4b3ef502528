//! First-occurrence identifier → page index.
//!
//! Pages are scanned once, in order. On each page every identifier that is
//! not indexed yet is tested as a plain substring of the page text; the
//! first page containing it wins and the identifier is skipped afterwards.
//!
//! Substring matching is ambiguous when one identifier contains another
//! (`A1` inside `A10`): the shorter one binds to the first page carrying
//! either. That behaviour is kept as-is.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use ordersort_shared::{OrderId, PageTextSource, Result};

/// Identifier → zero-based page number of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    pages: HashMap<OrderId, usize>,
}

impl PageIndex {
    pub fn get(&self, id: &str) -> Option<usize> {
        self.pages.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Record `page` for `id` unless it already has one.
    fn record(&mut self, id: &OrderId, page: usize) {
        self.pages.entry(id.clone()).or_insert(page);
    }
}

/// Callback invoked after each page is scanned.
pub trait ScanProgress {
    fn page_scanned(&self, current: usize, total: usize);
}

impl<F: Fn(usize, usize)> ScanProgress for F {
    fn page_scanned(&self, current: usize, total: usize) {
        self(current, total)
    }
}

/// Build the index by scanning `document` for `ids`.
///
/// Page text errors are returned unchanged. Scanning stops once every
/// identifier has a page.
#[instrument(skip_all, fields(pages = document.page_count(), ids = ids.len()))]
pub fn build_page_index<D>(
    document: &D,
    ids: &[OrderId],
    progress: &dyn ScanProgress,
) -> Result<PageIndex>
where
    D: PageTextSource + ?Sized,
{
    let mut index = PageIndex::default();
    let total = document.page_count();

    for page in 0..total {
        if index.len() == ids.len() {
            debug!(page, "all identifiers indexed, stopping scan");
            break;
        }

        let text = document.page_text(page)?;
        for id in ids {
            if !index.contains(id.as_str()) && text.contains(id.as_str()) {
                trace!(%id, page, "identifier matched");
                index.record(id, page);
            }
        }

        progress.page_scanned(page + 1, total);
    }

    debug!(matched = index.len(), "page index built");
    Ok(index)
}
