//! Page realization: build a new PDF from a sequence of source pages.

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, instrument};

use ordersort_shared::{OrderSortError, Result};

use crate::PdfDocument;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// Output settings for [`reorder_pages`].
#[derive(Debug, Clone)]
pub struct ReorderOptions {
    /// Compress content streams before saving.
    pub compress: bool,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self { compress: true }
    }
}

/// Produce a PDF containing exactly the pages in `sequence` (zero-based
/// source indices), in that order, serialized to bytes.
///
/// Every output page hangs directly off the root page-tree node. Inherited
/// attributes are copied onto each page first so it renders as before. A
/// page listed twice gets its own page dictionary for the second copy.
#[instrument(skip_all, fields(source_pages = source.page_count(), output_pages = sequence.len()))]
pub fn reorder_pages(
    source: &PdfDocument,
    sequence: &[usize],
    options: &ReorderOptions,
) -> Result<Vec<u8>> {
    let mut doc = source.document().clone();
    let root_id = pages_root_id(&doc)?;

    let mut kids = Vec::with_capacity(sequence.len());
    let mut placed: HashSet<ObjectId> = HashSet::new();

    for &index in sequence {
        let page_id = source.page_id(index)?;
        let mut page = flattened_page(&doc, page_id)?;
        page.set("Parent", Object::Reference(root_id));

        let out_id = if placed.insert(page_id) {
            *doc.get_object_mut(page_id).map_err(lopdf_error)? = Object::Dictionary(page);
            page_id
        } else {
            doc.add_object(page)
        };
        kids.push(Object::Reference(out_id));
    }

    let root = doc
        .get_object_mut(root_id)
        .and_then(Object::as_dict_mut)
        .map_err(lopdf_error)?;
    root.set("Count", Object::Integer(kids.len() as i64));
    root.set("Kids", Object::Array(kids));

    let pruned = doc.prune_objects();
    debug!(pruned = pruned.len(), "dropped unreferenced objects");

    if options.compress {
        doc.compress();
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| OrderSortError::pdf(format!("failed to serialize PDF: {e}")))?;

    Ok(buffer)
}

/// Object id of the root `Pages` node (`/Root /Pages`).
fn pages_root_id(doc: &Document) -> Result<ObjectId> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| OrderSortError::pdf(format!("trailer has no /Root reference: {e}")))?;

    doc.get_object(catalog_id)
        .and_then(Object::as_dict)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| OrderSortError::pdf(format!("catalog has no /Pages reference: {e}")))
}

/// Copy of the page dictionary with inherited attributes filled in.
fn flattened_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(lopdf_error)?
        .clone();

    for key in INHERITABLE {
        if page.has(key) {
            continue;
        }
        if let Some(value) = inherited_value(doc, &page, key) {
            page.set(key.to_vec(), value);
        }
    }

    Ok(page)
}

fn inherited_value(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_object(parent?).and_then(Object::as_dict).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

fn lopdf_error(err: lopdf::Error) -> OrderSortError {
    OrderSortError::pdf(err.to_string())
}
