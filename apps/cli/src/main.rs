//! ordersort CLI: reorder a PDF to follow a spreadsheet's order IDs.
//!
//! Reads the `Order ID` column of a spreadsheet, finds the page of each
//! order in a merged PDF, and writes a new PDF with pages in spreadsheet order.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
