//! Destination descriptors: where a document goes and in which format.
//!
//! The format is never declared, it is inferred from the destination's
//! extension once, up front. No path means standard output; an extension
//! other than `.html` or `.pdf` (or none at all) means Markdown.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Markdown file extension
pub const MARKDOWN_EXT: &str = ".md";
/// HTML file extension
pub const HTML_EXT: &str = ".html";
/// PDF file extension
pub const PDF_EXT: &str = ".pdf";

/// Output representation of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Print to standard output, verbatim
    Stdout,
    /// Markdown file (also the fallback for unknown extensions)
    Markdown,
    /// HTML file
    Html,
    /// PDF file rendered by an external tool
    Pdf,
}

impl OutputFormat {
    /// Infer the format from a destination path.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            None => OutputFormat::Stdout,
            Some(p) if p.as_os_str().is_empty() => OutputFormat::Stdout,
            Some(p) if has_extension(p, HTML_EXT) => OutputFormat::Html,
            Some(p) if has_extension(p, PDF_EXT) => OutputFormat::Pdf,
            Some(_) => OutputFormat::Markdown,
        }
    }

    /// File extension written for this format (None for stdout).
    pub fn extension(self) -> Option<&'static str> {
        match self {
            OutputFormat::Stdout => None,
            OutputFormat::Markdown => Some(MARKDOWN_EXT),
            OutputFormat::Html => Some(HTML_EXT),
            OutputFormat::Pdf => Some(PDF_EXT),
        }
    }

    /// Whether the document must be HTML before it is written.
    pub fn needs_html(self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::Pdf)
    }
}

/// A destination path paired with its inferred format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    path: Option<PathBuf>,
    format: OutputFormat,
}

impl Destination {
    /// Resolve a destination; `None` or an empty path means standard output.
    pub fn new(path: Option<PathBuf>) -> Self {
        let path = path.filter(|p| !p.as_os_str().is_empty());
        let format = OutputFormat::from_path(path.as_deref());
        Self { path, format }
    }

    /// Standard output.
    pub fn stdout() -> Self {
        Self::new(None)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// The path as given.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The path that will actually be written, extension forced.
    pub fn file_path(&self) -> Option<PathBuf> {
        let ext = self.format.extension()?;
        self.path.as_deref().map(|p| force_extension(p, ext))
    }
}

/// Append `extension` unless the file name already ends with it.
///
/// An existing, different extension is kept: `invoice.txt` forced to `.pdf`
/// gives `invoice.txt.pdf`. The comparison ignores ASCII case.
pub fn force_extension(path: &Path, extension: &str) -> PathBuf {
    if has_extension(path, extension) {
        return path.to_path_buf();
    }
    let mut forced = OsString::from(path.as_os_str());
    forced.push(extension);
    PathBuf::from(forced)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_ascii_lowercase()
                .ends_with(&extension.to_ascii_lowercase())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_appends_when_missing() {
        assert_eq!(
            force_extension(Path::new("invoice"), ".pdf"),
            PathBuf::from("invoice.pdf")
        );
    }

    #[test]
    fn test_force_keeps_matching_extension() {
        assert_eq!(
            force_extension(Path::new("invoice.pdf"), ".pdf"),
            PathBuf::from("invoice.pdf")
        );
        assert_eq!(
            force_extension(Path::new("out/INVOICE.PDF"), ".pdf"),
            PathBuf::from("out/INVOICE.PDF")
        );
    }

    #[test]
    fn test_force_never_replaces_other_extension() {
        assert_eq!(
            force_extension(Path::new("invoice.txt"), ".pdf"),
            PathBuf::from("invoice.txt.pdf")
        );
        assert_eq!(
            force_extension(Path::new("notes.markdown"), ".md"),
            PathBuf::from("notes.markdown.md")
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(None), OutputFormat::Stdout);
        assert_eq!(OutputFormat::from_path(Some(Path::new(""))), OutputFormat::Stdout);
        assert_eq!(OutputFormat::from_path(Some(Path::new("a.md"))), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_path(Some(Path::new("a.html"))), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(Some(Path::new("a.pdf"))), OutputFormat::Pdf);
        assert_eq!(OutputFormat::from_path(Some(Path::new("A.PDF"))), OutputFormat::Pdf);
    }

    #[test]
    fn test_unknown_extension_falls_back_to_markdown() {
        assert_eq!(OutputFormat::from_path(Some(Path::new("a.txt"))), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_path(Some(Path::new("invoice"))), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_path(Some(Path::new("page.htm"))), OutputFormat::Markdown);
    }

    #[test]
    fn test_needs_html() {
        assert!(OutputFormat::Html.needs_html());
        assert!(OutputFormat::Pdf.needs_html());
        assert!(!OutputFormat::Markdown.needs_html());
        assert!(!OutputFormat::Stdout.needs_html());
    }

    #[test]
    fn test_destination_file_path() {
        let dest = Destination::new(Some(PathBuf::from("invoice.txt")));
        assert_eq!(dest.format(), OutputFormat::Markdown);
        assert_eq!(dest.file_path(), Some(PathBuf::from("invoice.txt.md")));

        let dest = Destination::new(Some(PathBuf::from("out.html")));
        assert_eq!(dest.file_path(), Some(PathBuf::from("out.html")));
    }

    #[test]
    fn test_empty_destination_is_stdout() {
        let dest = Destination::new(Some(PathBuf::new()));
        assert_eq!(dest, Destination::stdout());
        assert_eq!(dest.format(), OutputFormat::Stdout);
        assert!(dest.path().is_none());
        assert!(dest.file_path().is_none());
    }
}
