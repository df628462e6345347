//! Temporary input files.

use std::io::Write;

/// Writes `value` to a temporary `.json` file.
pub fn json_file(value: &serde_json::Value) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(file)
}
