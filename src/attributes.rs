//! Attribute seeding
//!
//! Loads the base attribute set from a properties file and merges it into
//! every flow file at admission time.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{attribute_file_not_found_error, attribute_file_unreadable_error, Result};

/// Loads a flat key/value properties file into a string-to-string map
///
/// The format is the flat subset of Java properties: one `key=value`,
/// `key: value` or `key value` pair per line, with `#` and `!` comment
/// lines. A missing or unreadable file is a fatal configuration error.
pub fn load_attribute_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(attribute_file_not_found_error(path.to_path_buf()));
    }
    let text = read_to_string(path)
        .map_err(|e| attribute_file_unreadable_error(e, path.to_path_buf()))?;
    Ok(parse_properties(&text))
}

/// Parses properties text into a map
///
/// Later occurrences of a key overwrite earlier ones, matching
/// java.util.Properties behaviour.
pub fn parse_properties(text: &str) -> HashMap<String, String> {
    static LINE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^\s*([^=:\s]+)\s*[=:\s]\s*(.*?)\s*$")
            .expect("Failed to compile regex pattern for property lines")
    });

    let mut properties = HashMap::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        if let Some(captures) = LINE_RE.captures(line) {
            properties.insert(captures[1].to_string(), captures[2].to_string());
        } else {
            // A bare key with no separator maps to the empty string
            properties.insert(trimmed.to_string(), String::new());
        }
    }
    properties
}

/// Merges the base attribute set with per-item attributes
///
/// Per-item attributes (such as `filename` in directory mode) take
/// precedence over base-file attributes with the same key.
pub fn seed(
    base: &HashMap<String, String>,
    item: HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged = base.clone();
    merged.extend(item);
    merged
}
