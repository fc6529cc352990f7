//! Markdown table formatting.
//!
//! Turns a record grid (rows of string cells, first row is the header) into
//! the compact pipe-table form understood by GitHub-flavoured Markdown:
//!
//! ```text
//! Item|Price
//! ----|-----
//! Coffee|3.50
//! ```
//!
//! The separator line mirrors the header: each column gets as many dashes as
//! its header cell has characters, so engines that size columns from the
//! delimiter row keep the proportions of the header.

/// A parsed CSV file: ordered rows of ordered cells.
pub type Grid = Vec<Vec<String>>;

/// Narrowest separator run emitted for a column.
///
/// Keeps one-character and empty header cells at `--`, as in `a|bb\n--|--`.
pub const MIN_SEPARATOR_WIDTH: usize = 2;

/// Format a grid into a Markdown table.
///
/// Rows made only of blank cells are dropped, the first remaining row is the
/// header and is followed by the separator line. Returns an empty string for
/// a grid with no (non-blank) rows.
///
/// # Example
///
/// ```rust
/// use makeinvoicelib::format_table;
///
/// let grid = vec![
///     vec!["a".to_string(), "bb".to_string()],
///     vec!["x".to_string(), "y".to_string()],
/// ];
/// assert_eq!(format_table(&grid), "a|bb\n--|--\nx|y");
/// ```
pub fn format_table<R: AsRef<[S]>, S: AsRef<str>>(grid: &[R]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(grid.len() + 1);

    for row in grid {
        let row: &[S] = row.as_ref();
        if is_blank_row(row) {
            continue;
        }
        lines.push(format_row(row));
        if lines.len() == 1 {
            lines.push(format_separator(row));
        }
    }

    lines.join("\n").trim().to_string()
}

/// Cells joined by `|`.
fn format_row<S: AsRef<str>>(row: &[S]) -> String {
    row.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("|")
}

/// One run of dashes per header cell, sized to the cell's character count.
fn format_separator<S: AsRef<str>>(header: &[S]) -> String {
    header
        .iter()
        .map(|cell| "-".repeat(cell.as_ref().chars().count().max(MIN_SEPARATOR_WIDTH)))
        .collect::<Vec<_>>()
        .join("|")
}

fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|cell| cell.as_ref().trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_empty_grid() {
        let empty: Grid = Vec::new();
        assert_eq!(format_table(&empty), "");
    }

    #[test]
    fn test_header_and_row() {
        let g = grid(&[&["a", "bb"], &["x", "y"]]);
        assert_eq!(format_table(&g), "a|bb\n--|--\nx|y");
    }

    #[test]
    fn test_separator_follows_header_widths() {
        let g = grid(&[&["Item", "Unit price", "Qty"], &["Coffee", "3.50", "2"]]);
        assert_eq!(
            format_table(&g),
            "Item|Unit price|Qty\n----|----------|---\nCoffee|3.50|2"
        );
    }

    #[test]
    fn test_separator_counts_characters_not_bytes() {
        let g = grid(&[&["Déjà", "€"]]);
        assert_eq!(format_table(&g), "Déjà|€\n----|--");
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let g = grid(&[&["h"], &["  "], &["v"]]);
        assert_eq!(format_table(&g), "h\n--\nv");
    }

    #[test]
    fn test_trailing_blank_lines_produce_nothing() {
        let g = grid(&[&["a", "b"], &["1", "2"], &["", ""], &[" ", "\t"]]);
        assert_eq!(format_table(&g), "a|b\n--|--\n1|2");
    }

    #[test]
    fn test_only_blank_rows() {
        let g = grid(&[&["", " "], &[""]]);
        assert_eq!(format_table(&g), "");
    }

    #[test]
    fn test_header_only() {
        let g = grid(&[&["Name", "Total"]]);
        assert_eq!(format_table(&g), "Name|Total\n----|-----");
    }

    #[test]
    fn test_pipes_in_cells_are_kept_verbatim() {
        let g = grid(&[&["k", "v"], &["a|b", "c"]]);
        assert_eq!(format_table(&g), "k|v\n--|--\na|b|c");
    }

    #[test]
    fn test_accepts_borrowed_cells() {
        let rows: Vec<Vec<&str>> = vec![vec!["h1", "h2"], vec!["1", "2"]];
        assert_eq!(format_table(&rows), "h1|h2\n--|--\n1|2");
    }
}
