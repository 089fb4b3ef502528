//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use ordersort_core::pipeline::{self, ProgressReporter, SortConfig, SortResult};
use ordersort_shared::{AppConfig, SortOptions, init_config, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Sort a merged invoice PDF by a spreadsheet's order IDs.
#[derive(Parser)]
#[command(
    name = "ordersort",
    version,
    about = "Reorder PDF pages to follow the Order ID column of a spreadsheet.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Sort the pages of a PDF by the order IDs in a spreadsheet.
    Sort {
        /// Spreadsheet with the order ID column (.xlsx, .xls, .ods, .csv, .tsv).
        spreadsheet: PathBuf,

        /// Merged PDF to reorder.
        pdf: PathBuf,

        /// Output PDF path (defaults to the configured file name next to the input PDF).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header of the identifier column (case and surrounding spaces ignored).
        #[arg(short, long)]
        column: Option<String>,

        /// Worksheet name (defaults to the first sheet).
        #[arg(long)]
        sheet: Option<String>,

        /// Skip writing the JSON report next to the output.
        #[arg(long)]
        no_report: bool,

        /// Match and report without writing any file.
        #[arg(long)]
        dry_run: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "ordersort=info",
        1 => "ordersort=debug",
        _ => "ordersort=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Sort {
            spreadsheet,
            pdf,
            output,
            column,
            sheet,
            no_report,
            dry_run,
        } => cmd_sort(SortArgs {
            spreadsheet,
            pdf,
            output,
            column,
            sheet,
            no_report,
            dry_run,
        }),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Flags of the `sort` subcommand.
struct SortArgs {
    spreadsheet: PathBuf,
    pdf: PathBuf,
    output: Option<PathBuf>,
    column: Option<String>,
    sheet: Option<String>,
    no_report: bool,
    dry_run: bool,
}

/// Merge CLI flags over the config file values.
fn merge_options(config: &AppConfig, args: &SortArgs) -> SortOptions {
    let mut options = SortOptions::from(config);
    if let Some(column) = &args.column {
        options.id_column = column.clone();
    }
    if let Some(sheet) = &args.sheet {
        options.sheet = Some(sheet.clone());
    }
    if args.no_report {
        options.write_report = false;
    }
    options.dry_run = args.dry_run;
    options
}

fn cmd_sort(args: SortArgs) -> Result<()> {
    let config = load_config()?;
    let options = merge_options(&config, &args);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| pipeline::default_output_path(&args.pdf, &options.output_file));

    info!(
        spreadsheet = %args.spreadsheet.display(),
        pdf = %args.pdf.display(),
        output = %output.display(),
        "sorting PDF"
    );

    let sort_config = SortConfig {
        spreadsheet: args.spreadsheet,
        pdf: args.pdf,
        output,
        options,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let reporter = CliProgress::new();
    let result = pipeline::sort_pdf(&sort_config, &reporter);
    reporter.spinner.finish_and_clear();
    let result = result?;

    print_summary(&result);
    Ok(())
}

fn print_summary(result: &SortResult) {
    println!();
    match &result.output_path {
        Some(_) => println!("  Sorted PDF created!"),
        None => println!("  Dry run, nothing written."),
    }
    println!("  Order IDs: {}", result.id_count);
    println!("  Matched:   {}", result.placements.len());
    println!("  Missing:   {}", result.missing.len());
    println!("  PDF pages: {}", result.source_page_count);
    if let Some(path) = &result.output_path {
        println!("  Output:    {}", path.display());
    }
    if let Some(path) = &result.report_path {
        println!("  Report:    {}", path.display());
    }
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());

    if result.missing.is_empty() {
        println!();
        println!("  All order IDs were matched.");
    } else {
        println!();
        println!("  {} order IDs not found in the PDF:", result.missing.len());
        for id in &result.missing {
            println!("    {id}");
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_scanned(&self, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Scanning pages [{current}/{total}]"));
    }

    fn done(&self, _result: &SortResult) {
        self.spinner.finish_and_clear();
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
