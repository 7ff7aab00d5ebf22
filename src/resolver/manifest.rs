//! Per-element dependency manifests.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

/// File inside an element checkout listing the elements it depends on.
pub const MANIFEST_FILE: &str = "dependencies.txt";

/// Read the whitespace-delimited manifest in `element_dir`.
///
/// A missing manifest means no dependencies.
pub fn read_manifest(element_dir: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(element_dir.join(MANIFEST_FILE)) {
        Ok(content) => Ok(parse_manifest(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Split manifest text into names, keeping the first of any duplicates.
pub fn parse_manifest(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in content.split_whitespace() {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
