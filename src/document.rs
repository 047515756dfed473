//! Loading and storing documents at the file boundary.
//!
//! Two operations: parse an input document from a JSON file, and write a
//! result document as pretty-printed JSON (2-space indentation). Errors
//! carry the offending path so a failed run names the file that broke it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::ErrorDocument;

/// Load an input document from a JSON file.
pub fn load_document(path: &Path) -> Result<ErrorDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read input '{}'", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse input '{}'", path.display()))
}

/// Write a result document as pretty-printed JSON, overwriting any existing
/// content at the destination.
///
/// The document is serialized in full before the destination is touched, so
/// a serialization failure never leaves a partial file behind.
pub fn store_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let mut json =
        serde_json::to_string_pretty(document).context("failed to serialize result document")?;
    json.push('\n');

    fs::write(path, json)
        .with_context(|| format!("failed to write output '{}'", path.display()))
}
