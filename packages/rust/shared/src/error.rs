//! Error types for ordersort.
//!
//! Library crates use [`OrderSortError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all ordersort operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderSortError {
    /// The identifier column could not be located in the tabular input.
    #[error("spreadsheet must contain a column named '{column}' (found: {})", .available.join(", "))]
    Schema {
        column: String,
        available: Vec<String>,
    },

    /// Spreadsheet could not be opened or parsed.
    #[error("spreadsheet error: {message}")]
    Spreadsheet { message: String },

    /// PDF loading, text extraction, or serialization error.
    #[error("PDF error: {message}")]
    Pdf { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid arguments or inconsistent inputs.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OrderSortError>;

impl OrderSortError {
    /// Create a schema error for a missing column.
    pub fn schema(column: impl Into<String>, available: Vec<String>) -> Self {
        Self::Schema {
            column: column.into(),
            available,
        }
    }

    /// Create a spreadsheet error from any displayable message.
    pub fn spreadsheet(msg: impl Into<String>) -> Self {
        Self::Spreadsheet {
            message: msg.into(),
        }
    }

    /// Create a PDF error from any displayable message.
    pub fn pdf(msg: impl Into<String>) -> Self {
        Self::Pdf {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the missing-column error.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}
