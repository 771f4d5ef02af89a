//! Document loading
//!
//! Decodes YAML text into a `serde_yaml::Value` and hands it to
//! `sdf_core::Document::parse`.

use anyhow::{Context, Result};
use sdf_core::Document;
use std::path::Path;
use tracing::info;

/// Parse a document from YAML source text
pub fn load_str(source: &str) -> Result<Document> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(source).context("Failed to decode document YAML")?;
    let document = Document::parse(&value)?;
    Ok(document)
}

/// Read and parse a document file
pub fn load_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;

    let document =
        load_str(&source).with_context(|| format!("Failed to load document: {}", path.display()))?;

    info!(
        "Loaded {} ({} cells, {} items)",
        path.display(),
        document.cells().len(),
        document.item_count()
    );
    Ok(document)
}
