//! Shared types, error model, and configuration for ordersort.
//!
//! This crate is the foundation depended on by all other ordersort crates.
//! It provides:
//! - [`OrderSortError`]: the unified error type
//! - Domain types ([`OrderId`], [`Table`], [`Placement`], [`RunReport`])
//! - Configuration ([`AppConfig`], [`SortOptions`], config loading)
//! - The [`PageTextSource`] seam between document readers and matching

pub mod config;
pub mod error;
pub mod source;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_ID_COLUMN, DEFAULT_OUTPUT_FILE, DefaultsConfig, PdfConfig, SortOptions,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{OrderSortError, Result};
pub use source::PageTextSource;
pub use types::{
    CURRENT_SCHEMA_VERSION, Cell, Column, OrderId, Placement, RunId, RunReport, Table,
};
