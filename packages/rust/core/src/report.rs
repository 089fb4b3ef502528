//! Output writing: the sorted PDF and its JSON run report.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use ordersort_shared::{OrderSortError, Result};

/// Report path that sits beside `output` (`sorted.pdf` → `sorted.report.json`).
pub fn report_path_for(output: &Path) -> PathBuf {
    output.with_extension("report.json")
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write `bytes` to `target` atomically (write to temp, then rename).
pub fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            OrderSortError::validation(format!("invalid output path '{}'", target.display()))
        })?;

    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| OrderSortError::io(&dir, e))?;

    let temp = dir.join(format!(".{file_name}.tmp"));
    std::fs::write(&temp, bytes).map_err(|e| OrderSortError::io(&temp, e))?;
    if let Err(e) = std::fs::rename(&temp, target) {
        let _ = std::fs::remove_file(&temp);
        return Err(OrderSortError::io(target, e));
    }

    debug!(path = %target.display(), size = bytes.len(), "wrote file");
    Ok(())
}

/// Write a JSON file (pretty-printed), atomically.
pub fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).map_err(|e| {
        OrderSortError::validation(format!("JSON serialization failed: {e}"))
    })?;
    write_atomic(path, json.as_bytes())
}
