//! # makeinvoicelib
//!
//! Turn CSV files into Markdown tables, drop them into a template and export
//! the result to standard output, Markdown, HTML or PDF.
//!
//! ## Overview
//!
//! Every run goes through the same stages:
//!
//! - **Ingest**: each CSV file becomes a Markdown table stored under a
//!   document key derived from its file name (`items.csv` is `Items`)
//! - **Render**: a Jinja template (or the built-in default) receives the
//!   tables as variables
//! - **Export**: the destination's extension picks the format; HTML and PDF
//!   convert Markdown once, PDF goes through an external converter
//!
//! ## Features
//!
//! - **Custom separators**: semicolon, tab or any single ASCII character
//! - **HTML templates**: a `.html` template gets HTML tables
//! - **Stylesheets**: passed to the PDF converter as a user style sheet
//! - **No partial output**: any failure aborts before anything is written
//!
//! ## Example
//!
//! ```rust
//! use makeinvoicelib::{run, ExportOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let items = dir.path().join("items.csv");
//! fs::write(&items, "Item,Price\nCoffee,3.50\n").unwrap();
//!
//! // Render with the built-in template into a buffer
//! let mut out = Vec::new();
//! let written = run(&[&items], &ExportOptions::new(), &mut out).unwrap();
//! assert!(written.is_none());
//! assert_eq!(String::from_utf8(out).unwrap(), "Item|Price\n----|-----\nCoffee|3.50\n\n");
//!
//! // Export to an HTML file
//! let target = dir.path().join("invoice.html");
//! let options = ExportOptions::new().output(&target);
//! run(&[&items], &options, &mut std::io::sink()).unwrap();
//! assert!(fs::read_to_string(target).unwrap().contains("<table>"));
//! ```

pub mod error;
pub mod export;
pub mod markdown;
pub mod options;
pub mod pipeline;
pub mod source;
pub mod table;
pub mod template;

#[cfg(test)]
mod test_support;

pub use error::{ErrorKind, MakeinvoiceError};
pub use export::{
    force_extension, ContentForm, Destination, Exporter, OutputFormat, PdfRenderer,
    RenderedDocument,
};
pub use markdown::{to_html, to_html_all};
pub use options::{
    Delimiter, DuplicateKeys, ExportOptions, DEFAULT_PDF_TOOL, DEFAULT_TEMPLATE,
};
pub use pipeline::{render_document, run, template_context};
pub use source::{document_key, ingest_files, read_grid, TableMap};
pub use table::{format_table, Grid};
pub use template::{ContextValue, DocumentTemplate, TemplateData};

/// Result type for makeinvoicelib operations
pub type Result<T> = std::result::Result<T, MakeinvoiceError>;
