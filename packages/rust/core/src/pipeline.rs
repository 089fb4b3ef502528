//! End-to-end sort pipeline: spreadsheet + PDF → normalize → index → assemble → sorted PDF.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, instrument, warn};

use ordersort_pdf::{PdfDocument, ReorderOptions};
use ordersort_shared::{
    CURRENT_SCHEMA_VERSION, OrderId, OrderSortError, PageTextSource, Placement, Result, RunId,
    RunReport, SortOptions, Table,
};

use crate::assembler::{self, Assembly};
use crate::index::{self, ScanProgress};
use crate::keys;
use crate::report;

/// Configuration for the `sort_pdf` pipeline.
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Spreadsheet holding the identifier column.
    pub spreadsheet: PathBuf,
    /// PDF whose pages are reordered.
    pub pdf: PathBuf,
    /// Where the sorted PDF is written.
    pub output: PathBuf,
    /// Merged config-file + CLI options.
    pub options: SortOptions,
    /// Tool version string.
    pub tool_version: String,
}

/// Output of the matching stages, before anything is written.
#[derive(Debug, Clone)]
pub struct SortPlan {
    /// Normalized identifiers, in order.
    pub ids: Vec<OrderId>,
    /// Placements and missing identifiers.
    pub assembly: Assembly,
    /// Pages in the source document.
    pub source_page_count: usize,
}

/// Result of the `sort_pdf` pipeline.
#[derive(Debug)]
pub struct SortResult {
    pub run_id: RunId,
    /// Written PDF; `None` for a dry run.
    pub output_path: Option<PathBuf>,
    /// Written report; `None` for a dry run or when reports are disabled.
    pub report_path: Option<PathBuf>,
    /// Number of normalized identifiers.
    pub id_count: usize,
    pub placements: Vec<Placement>,
    /// Unmatched identifiers in normalized order.
    pub missing: Vec<OrderId>,
    pub source_page_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each page is scanned for identifiers.
    fn page_scanned(&self, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &SortResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_scanned(&self, _current: usize, _total: usize) {}
    fn done(&self, _result: &SortResult) {}
}

/// Adapts a `ProgressReporter` to the `ScanProgress` interface.
struct PipelineScanProgress<'a> {
    inner: &'a dyn ProgressReporter,
}

impl ScanProgress for PipelineScanProgress<'_> {
    fn page_scanned(&self, current: usize, total: usize) {
        self.inner.page_scanned(current, total);
    }
}

/// Default output location: `file_name` in the directory of the input PDF.
pub fn default_output_path(pdf: &Path, file_name: &str) -> PathBuf {
    match pdf.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Normalize → index → assemble.
///
/// The identifier column is checked before any page text is requested.
pub fn plan_order<D>(
    table: &Table,
    column: &str,
    document: &D,
    progress: &dyn ProgressReporter,
) -> Result<SortPlan>
where
    D: PageTextSource + ?Sized,
{
    let ids = keys::extract_order_ids(table, column)?;
    plan_ids(ids, document, progress)
}

/// Index and assemble an already normalized identifier list.
pub fn plan_ids<D>(
    ids: Vec<OrderId>,
    document: &D,
    progress: &dyn ProgressReporter,
) -> Result<SortPlan>
where
    D: PageTextSource + ?Sized,
{
    progress.phase("Scanning pages");
    let scan = PipelineScanProgress { inner: progress };
    let page_index = index::build_page_index(document, &ids, &scan)?;

    progress.phase("Assembling page order");
    let assembly = assembler::assemble(&ids, &page_index);

    Ok(SortPlan {
        ids,
        assembly,
        source_page_count: document.page_count(),
    })
}

/// Run the full sort pipeline.
///
/// 1. Read the spreadsheet and normalize the identifier column
/// 2. Load the PDF
/// 3. Index pages and assemble the output order
/// 4. Write the sorted PDF (and the JSON report)
#[instrument(skip_all, fields(spreadsheet = %config.spreadsheet.display(), pdf = %config.pdf.display()))]
pub fn sort_pdf(config: &SortConfig, progress: &dyn ProgressReporter) -> Result<SortResult> {
    let start = Instant::now();
    let started_at = Utc::now();
    let run_id = RunId::new();
    let options = &config.options;

    info!(%run_id, column = %options.id_column, dry_run = options.dry_run, "starting sort");

    if !options.dry_run {
        ensure_distinct_outputs(config)?;
    }

    // --- Phase 1: Identifiers ---
    progress.phase("Reading spreadsheet");
    let table = ordersort_sheet::load_table(&config.spreadsheet, options.sheet.as_deref())?;
    let ids = keys::extract_order_ids(&table, &options.id_column)?;
    info!(ids = ids.len(), "identifiers loaded");

    // --- Phase 2: Document ---
    progress.phase("Loading PDF");
    let document = PdfDocument::open(&config.pdf)?;

    // --- Phase 3: Match ---
    let plan = plan_ids(ids, &document, progress)?;
    let SortPlan {
        ids,
        assembly,
        source_page_count,
    } = plan;

    if !assembly.missing.is_empty() {
        warn!(missing = assembly.missing.len(), "some identifiers were not found in the PDF");
    }

    // --- Phase 4: Write ---
    let (output_path, report_path) = if options.dry_run {
        (None, None)
    } else {
        progress.phase("Writing sorted PDF");
        let bytes = ordersort_pdf::reorder_pages(
            &document,
            &assembly.page_sequence(),
            &ReorderOptions {
                compress: options.compress,
            },
        )?;
        report::write_atomic(&config.output, &bytes)?;

        let report_path = if options.write_report {
            let report = RunReport {
                schema_version: CURRENT_SCHEMA_VERSION,
                run_id: run_id.clone(),
                tool_version: config.tool_version.clone(),
                started_at,
                finished_at: Utc::now(),
                spreadsheet: config.spreadsheet.clone(),
                source_pdf: config.pdf.clone(),
                output_pdf: config.output.clone(),
                id_column: options.id_column.clone(),
                source_page_count,
                output_page_count: assembly.placements.len(),
                output_sha256: report::sha256_hex(&bytes),
                placements: assembly.placements.clone(),
                missing: assembly.missing.clone(),
            };
            let path = report::report_path_for(&config.output);
            report::write_json(&path, &report)?;
            Some(path)
        } else {
            None
        };

        (Some(config.output.clone()), report_path)
    };

    let result = SortResult {
        run_id,
        output_path,
        report_path,
        id_count: ids.len(),
        placements: assembly.placements,
        missing: assembly.missing,
        source_page_count,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        run_id = %result.run_id,
        matched = result.placements.len(),
        missing = result.missing.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "sort pipeline complete"
    );

    Ok(result)
}

/// Refuse to let the sorted PDF or its report replace either input file.
fn ensure_distinct_outputs(config: &SortConfig) -> Result<()> {
    let mut outputs = vec![config.output.clone()];
    if config.options.write_report {
        outputs.push(report::report_path_for(&config.output));
    }

    for output in &outputs {
        for input in [&config.pdf, &config.spreadsheet] {
            if same_file(input, output) {
                return Err(OrderSortError::validation(format!(
                    "output path '{}' would overwrite input '{}'",
                    output.display(),
                    input.display()
                )));
            }
        }
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
