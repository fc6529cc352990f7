//! CSV ingestion: files in, keyed Markdown tables out.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::MakeinvoiceError;
use crate::options::{Delimiter, DuplicateKeys};
use crate::source::key::document_key;
use crate::table::{format_table, Grid};
use crate::Result;

/// Document key -> table text (Markdown, or HTML once converted).
///
/// Ordered by key so templates iterating it are deterministic.
pub type TableMap = BTreeMap<String, String>;

/// Read one delimited file into a record grid.
///
/// Ragged rows are rejected; the reader is not flexible.
pub fn read_grid(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<Grid> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MakeinvoiceError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter.as_byte())
        .from_reader(file);

    let mut grid = Grid::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        grid.push(record.iter().map(str::to_string).collect());
    }

    Ok(grid)
}

/// I/O failures stay I/O errors; everything else is malformed input.
fn csv_error(path: &Path, err: csv::Error) -> MakeinvoiceError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => MakeinvoiceError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        _ => MakeinvoiceError::MalformedCsv {
            path: path.to_path_buf(),
            message,
        },
    }
}

/// Ingest CSV files into a keyed table mapping.
///
/// Files are read in order; the first failure aborts the whole call and no
/// partial mapping is returned. Two files deriving the same key either
/// overwrite (last wins) or fail, depending on `duplicates`.
///
/// # Example
///
/// ```rust,ignore
/// use makeinvoicelib::{ingest_files, Delimiter, DuplicateKeys};
///
/// let tables = ingest_files(&["a.csv", "b.csv"], Delimiter::comma(), DuplicateKeys::Overwrite)?;
/// assert!(tables.contains_key("A"));
/// ```
pub fn ingest_files<P: AsRef<Path>>(
    paths: &[P],
    delimiter: Delimiter,
    duplicates: DuplicateKeys,
) -> Result<TableMap> {
    if paths.is_empty() {
        return Err(MakeinvoiceError::NoInput);
    }

    let mut tables = TableMap::new();
    let mut origins: BTreeMap<String, PathBuf> = BTreeMap::new();

    for path in paths {
        let path = path.as_ref();
        let grid = read_grid(path, delimiter)?;
        let key = document_key(path);
        debug!(path = %path.display(), key = %key, rows = grid.len(), "ingested CSV file");

        if let Some(first) = origins.get(&key) {
            match duplicates {
                DuplicateKeys::Reject => {
                    return Err(MakeinvoiceError::DuplicateKey {
                        key,
                        first: first.clone(),
                        second: path.to_path_buf(),
                    });
                }
                DuplicateKeys::Overwrite => {
                    warn!(
                        key = %key,
                        replaced = %first.display(),
                        by = %path.display(),
                        "document key collision, keeping the later file"
                    );
                }
            }
        }

        tables.insert(key.clone(), format_table(&grid));
        origins.insert(key, path.to_path_buf());
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_file as write;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_grid() {
        let temp = tempdir().unwrap();
        let path = write(temp.path(), "items.csv", "Item,Price\nCoffee,3.50\n");

        let grid = read_grid(&path, Delimiter::comma()).unwrap();
        assert_eq!(grid, vec![vec!["Item", "Price"], vec!["Coffee", "3.50"]]);
    }

    #[test]
    fn test_read_grid_quoted_fields() {
        let temp = tempdir().unwrap();
        let path = write(
            temp.path(),
            "q.csv",
            "name,note\n\"Doe, Jane\",\"said \"\"hi\"\"\"\n",
        );

        let grid = read_grid(&path, Delimiter::comma()).unwrap();
        assert_eq!(grid[1], vec!["Doe, Jane", "said \"hi\""]);
    }

    #[test]
    fn test_read_grid_custom_delimiter() {
        let temp = tempdir().unwrap();
        let path = write(temp.path(), "s.csv", "a;b\n1,5;2\n");

        let grid = read_grid(&path, Delimiter::semicolon()).unwrap();
        assert_eq!(grid[1], vec!["1,5", "2"]);
    }

    #[test]
    fn test_read_grid_ragged_rows() {
        let temp = tempdir().unwrap();
        let path = write(temp.path(), "bad.csv", "a,b\n1,2,3\n");

        let err = read_grid(&path, Delimiter::comma()).unwrap_err();
        match err {
            MakeinvoiceError::MalformedCsv { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_grid_unreadable_file() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("dir.csv");
        fs::create_dir(&dir).unwrap();

        let err = read_grid(&dir, Delimiter::comma()).unwrap_err();
        assert!(matches!(err, MakeinvoiceError::FileRead { ref path, .. } if *path == dir));
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }

    #[test]
    fn test_read_grid_missing_file() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope.csv");

        let err = read_grid(&missing, Delimiter::comma()).unwrap_err();
        assert!(matches!(err, MakeinvoiceError::FileOpen { ref path, .. } if *path == missing));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_ingest_no_paths() {
        let paths: Vec<PathBuf> = Vec::new();
        let err = ingest_files(&paths, Delimiter::comma(), DuplicateKeys::Overwrite).unwrap_err();
        assert!(matches!(err, MakeinvoiceError::NoInput));
    }

    #[test]
    fn test_ingest_multiple_files() {
        let temp = tempdir().unwrap();
        let a = write(temp.path(), "a.csv", "H1\nv1\n");
        let b = write(temp.path(), "b.csv", "H2\nv2\n");

        let tables = ingest_files(&[a, b], Delimiter::comma(), DuplicateKeys::Overwrite).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables["A"], "H1\n--\nv1");
        assert_eq!(tables["B"], "H2\n--\nv2");
    }

    #[test]
    fn test_ingest_fails_on_second_of_three() {
        let temp = tempdir().unwrap();
        let first = write(temp.path(), "first.csv", "a\n1\n");
        let missing = temp.path().join("second.csv");
        let third = write(temp.path(), "third.csv", "c\n3\n");

        let err = ingest_files(
            &[first, missing.clone(), third],
            Delimiter::comma(),
            DuplicateKeys::Overwrite,
        )
        .unwrap_err();

        match err {
            MakeinvoiceError::FileOpen { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ingest_duplicate_keys_overwrite() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("x")).unwrap();
        fs::create_dir(temp.path().join("y")).unwrap();
        let first = write(temp.path(), "x/a.csv", "old\n1\n");
        let second = write(temp.path(), "y/a.CSV", "new\n2\n");

        let tables =
            ingest_files(&[first, second], Delimiter::comma(), DuplicateKeys::Overwrite).unwrap();

        // Collision is silent data loss: only the later file survives.
        assert_eq!(tables.len(), 1);
        assert_eq!(tables["A"], "new\n---\n2");
    }

    #[test]
    fn test_ingest_duplicate_keys_reject() {
        let temp = tempdir().unwrap();
        let first = write(temp.path(), "a.csv", "h\n1\n");
        let second = write(temp.path(), "a.CSV", "h\n2\n");

        let err = ingest_files(
            &[first.clone(), second.clone()],
            Delimiter::comma(),
            DuplicateKeys::Reject,
        )
        .unwrap_err();

        match err {
            MakeinvoiceError::DuplicateKey {
                key,
                first: f,
                second: s,
            } => {
                assert_eq!(key, "A");
                assert_eq!(f, first);
                assert_eq!(s, second);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
