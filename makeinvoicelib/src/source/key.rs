//! Document keys: the name a file's table goes by inside a template.

use std::path::Path;

/// Derive the document key of an input file.
///
/// Base name, last extension stripped, first character uppercased:
/// `data/q1_sales.csv` becomes `Q1_sales`, `report.CSV` becomes `Report`.
pub fn document_key(path: impl AsRef<Path>) -> String {
    let base = path
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    upper_first(strip_extension(&base))
}

/// Drop everything from the last `.` on, dotfiles included (`.csv` -> ``).
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
