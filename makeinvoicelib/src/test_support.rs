//! Fixtures shared by unit tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Copies its input to its output and records argv next to the output.
#[cfg(unix)]
pub const COPYING_TOOL: &str = r#"for arg in "$@"; do input="$output"; output="$arg"; done
echo "$@" > "$(dirname "$output")/argv.txt"
cp "$input" "$output""#;

/// Write an executable shell script standing in for the PDF converter.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Paths directly inside `dir`.
pub fn entries(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
