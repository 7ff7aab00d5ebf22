//! Parsing the registry tool's list output.

use regex::Regex;
use std::sync::LazyLock;

/// Numbered row ending in a validity marker, e.g. `3. hermes   VALID`.
static ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+([\w.-]+)[ \t].*VALID[ \t]*\r?$")
        .expect("ROW_REGEX must compile")
});

/// Turns the registry tool's list output into element names.
pub trait RegistryListParser {
    /// Registered element names, in the order the tool listed them.
    fn parse(&self, output: &str) -> Vec<String>;
}

/// Parser for `sst-register -l` tables.
///
/// Rows marked `INVALID` are still registered and are included.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidityMarkerParser;

impl RegistryListParser for ValidityMarkerParser {
    fn parse(&self, output: &str) -> Vec<String> {
        ROW_REGEX
            .captures_iter(output)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
