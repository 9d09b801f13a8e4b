//! Class and file names derived from table names.

use std::path::{Path, PathBuf};

/// Suffix appended to every generated class name.
pub const CLASS_SUFFIX: &str = "TableSeeder";

/// Extension of generated seeder files.
pub const ARTIFACT_EXTENSION: &str = "php";

/// Builds the seeder class name: every `_`-separated part of the table name
/// gets an upper-case first letter, then [`CLASS_SUFFIX`] is appended.
pub fn class_name(table: &str) -> String {
    let mut name: String = table.split('_').map(upper_first).collect();
    name.push_str(CLASS_SUFFIX);
    name
}

fn upper_first(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// True when `name` is usable as a class identifier in generated code.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || !first.is_ascii() => chars
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()),
        _ => false,
    }
}

/// Path of the generated file for `class` inside `seed_dir`.
pub fn artifact_path(seed_dir: &Path, class: &str) -> PathBuf {
    seed_dir.join(format!("{class}.{ARTIFACT_EXTENSION}"))
}
