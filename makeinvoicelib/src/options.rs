//! Input options for ingestion and export.
//!
//! This module contains all configuration types that control how CSV files
//! are read, which template is used and where the document goes.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MakeinvoiceError;

/// Built-in template: every table in key order, each followed by a blank line.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/default.md.j2");

/// External HTML to PDF converter used when none is configured.
pub const DEFAULT_PDF_TOOL: &str = "wkhtmltopdf";

/// CSV field separator.
///
/// Always a single ASCII character; defaults to a comma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiter(u8);

impl Default for Delimiter {
    fn default() -> Self {
        Self(b',')
    }
}

impl Delimiter {
    /// Comma (default)
    pub fn comma() -> Self {
        Self::default()
    }

    /// Semicolon, common in locales that use `,` as decimal mark
    pub fn semicolon() -> Self {
        Self(b';')
    }

    /// Tab
    pub fn tab() -> Self {
        Self(b'\t')
    }

    /// The separator as a byte, as the CSV reader wants it.
    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl FromStr for Delimiter {
    type Err = MakeinvoiceError;

    /// Empty input falls back to a comma; `\t` and `tab` mean tab.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::default()),
            "\\t" | "tab" => Ok(Self::tab()),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii() => Ok(Self(c as u8)),
                    _ => Err(MakeinvoiceError::InvalidDelimiter(s.to_string())),
                }
            }
        }
    }
}

/// What to do when two input files derive the same document key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicateKeys {
    /// Later file replaces the earlier one (a warning is logged)
    #[default]
    Overwrite,
    /// Fail with [`MakeinvoiceError::DuplicateKey`]
    Reject,
}

/// Options for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// CSV field separator
    pub delimiter: Delimiter,
    /// Policy for colliding document keys
    pub duplicate_keys: DuplicateKeys,
    /// Template file (None = built-in default)
    pub template: Option<PathBuf>,
    /// Template source used when no template file is given
    pub default_template: String,
    /// Destination path (None = standard output)
    pub output: Option<PathBuf>,
    /// Stylesheet handed to the PDF renderer
    pub stylesheet: Option<PathBuf>,
    /// Name or path of the HTML to PDF converter
    pub pdf_tool: String,
    /// Directory for the staging file (None = system temp dir)
    pub staging_dir: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            duplicate_keys: DuplicateKeys::default(),
            template: None,
            default_template: DEFAULT_TEMPLATE.to_string(),
            output: None,
            stylesheet: None,
            pdf_tool: DEFAULT_PDF_TOOL.to_string(),
            staging_dir: None,
        }
    }
}

impl ExportOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CSV separator.
    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the key collision policy.
    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Use a template file.
    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    /// Replace the built-in default template.
    pub fn default_template(mut self, source: impl Into<String>) -> Self {
        self.default_template = source.into();
        self
    }

    /// Write to a file instead of standard output.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Stylesheet for PDF export.
    pub fn stylesheet(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheet = Some(path.into());
        self
    }

    /// Name or path of the HTML to PDF converter.
    pub fn pdf_tool(mut self, tool: impl Into<String>) -> Self {
        self.pdf_tool = tool.into();
        self
    }

    /// Directory where the temporary HTML file is staged.
    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_default() {
        assert_eq!(Delimiter::default().as_byte(), b',');
        assert_eq!(Delimiter::from_str("").unwrap(), Delimiter::comma());
    }

    #[test]
    fn test_delimiter_from_str() {
        assert_eq!(Delimiter::from_str(";").unwrap(), Delimiter::semicolon());
        assert_eq!(Delimiter::from_str("\\t").unwrap(), Delimiter::tab());
        assert_eq!(Delimiter::from_str("tab").unwrap(), Delimiter::tab());
        assert_eq!(Delimiter::from_str("|").unwrap().as_byte(), b'|');
    }

    #[test]
    fn test_delimiter_rejects_multiple_chars() {
        let err = Delimiter::from_str(";;").unwrap_err();
        assert!(matches!(err, MakeinvoiceError::InvalidDelimiter(ref s) if s == ";;"));
    }

    #[test]
    fn test_delimiter_rejects_non_ascii() {
        assert!(Delimiter::from_str("§").is_err());
    }

    #[test]
    fn test_export_options_default() {
        let opts = ExportOptions::default();
        assert_eq!(opts.delimiter, Delimiter::comma());
        assert_eq!(opts.duplicate_keys, DuplicateKeys::Overwrite);
        assert!(opts.template.is_none());
        assert!(opts.output.is_none());
        assert_eq!(opts.default_template, DEFAULT_TEMPLATE);
        assert_eq!(opts.pdf_tool, "wkhtmltopdf");
    }

    #[test]
    fn test_export_options_builder() {
        let opts = ExportOptions::new()
            .delimiter(Delimiter::semicolon())
            .duplicate_keys(DuplicateKeys::Reject)
            .template("invoice.md")
            .output("out.pdf")
            .stylesheet("print.css")
            .pdf_tool("/opt/bin/wkhtmltopdf")
            .default_template("{{ tables }}");

        assert_eq!(opts.delimiter.as_byte(), b';');
        assert_eq!(opts.duplicate_keys, DuplicateKeys::Reject);
        assert_eq!(opts.template, Some(PathBuf::from("invoice.md")));
        assert_eq!(opts.output, Some(PathBuf::from("out.pdf")));
        assert_eq!(opts.stylesheet, Some(PathBuf::from("print.css")));
        assert_eq!(opts.pdf_tool, "/opt/bin/wkhtmltopdf");
        assert_eq!(opts.default_template, "{{ tables }}");
    }
}
