//! Application configuration for ordersort.
//!
//! User config lives at `~/.ordersort/ordersort.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OrderSortError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "ordersort.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".ordersort";

/// Column holding the identifiers, compared after trim + lowercase.
pub const DEFAULT_ID_COLUMN: &str = "order id";

/// File name of the sorted PDF when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "sorted_by_order_id.pdf";

// ---------------------------------------------------------------------------
// Config structs (matching ordersort.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// PDF output settings.
    #[serde(default)]
    pub pdf: PdfConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Header of the identifier column.
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Output file name, placed next to the input PDF.
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Whether to write `<output>.report.json` beside the PDF.
    #[serde(default = "default_true")]
    pub write_report: bool,

    /// Worksheet to read; the first sheet when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            output_file: default_output_file(),
            write_report: true,
            sheet: None,
        }
    }
}

fn default_id_column() -> String {
    DEFAULT_ID_COLUMN.into()
}
fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.into()
}
fn default_true() -> bool {
    true
}

/// `[pdf]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Compress content streams of the written PDF.
    #[serde(default = "default_true")]
    pub compress: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { compress: true }
    }
}

// ---------------------------------------------------------------------------
// Sort options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime sort configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Header of the identifier column.
    pub id_column: String,
    /// Worksheet name, `None` for the first sheet.
    pub sheet: Option<String>,
    /// Output file name used when no explicit output path is given.
    pub output_file: String,
    /// Whether to write the JSON run report.
    pub write_report: bool,
    /// Compress content streams of the written PDF.
    pub compress: bool,
    /// Plan only; write nothing.
    pub dry_run: bool,
}

impl From<&AppConfig> for SortOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            id_column: config.defaults.id_column.clone(),
            sheet: config.defaults.sheet.clone(),
            output_file: config.defaults.output_file.clone(),
            write_report: config.defaults.write_report,
            compress: config.pdf.compress,
            dry_run: false,
        }
    }
}

impl Default for SortOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.ordersort/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| OrderSortError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.ordersort/ordersort.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| OrderSortError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        OrderSortError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| OrderSortError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| OrderSortError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| OrderSortError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
