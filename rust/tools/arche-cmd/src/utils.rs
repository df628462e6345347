//! Common utilities for arche-cmd

use anyhow::{Context, Result};
use std::path::Path;

use arche::ArchetypeSpec;

/// Checks if a file exists and is readable
pub fn validate_file_exists(path: &str) -> Result<()> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }
    if !file_path.is_file() {
        anyhow::bail!("Path is not a file: {}", path);
    }
    Ok(())
}

/// Reads and parses a JSON file.
pub fn read_json(path: &str) -> Result<serde_json::Value> {
    validate_file_exists(path)?;
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in file: {}", path))
}

/// Resolves an archetype by full or short name.
pub fn resolve_archetype(name: &str) -> Result<&'static ArchetypeSpec> {
    arche::find_archetype(name).with_context(|| {
        let known: Vec<_> = arche::registry().iter().map(|s| s.short_name()).collect();
        format!("Unknown archetype '{}' (known: {})", name, known.join(", "))
    })
}
