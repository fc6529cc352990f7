//! Export: send a rendered document where it belongs.
//!
//! This module handles the last stage of the pipeline. It provides:
//!
//! - **Destination**: a path and the format inferred from its extension
//! - **RenderedDocument**: template output, tagged Markdown or HTML
//! - **Exporter**: the single routing entry point (stdout, `.md`, `.html`, `.pdf`)
//! - **PdfRenderer**: temp-file staging and the external converter call
//!
//! | Destination       | Action                                              |
//! |-------------------|-----------------------------------------------------|
//! | none              | print verbatim                                      |
//! | `.md`, other      | write Markdown, forcing `.md`                       |
//! | `.html`           | convert if still Markdown, write, forcing `.html`   |
//! | `.pdf`            | convert if still Markdown, stage, run the converter |
//!
//! ## Example
//!
//! ```rust,ignore
//! use makeinvoicelib::export::{Destination, Exporter, RenderedDocument};
//!
//! let dest = Destination::new(Some("invoice.html".into()));
//! Exporter::default().export(RenderedDocument::markdown("# Hi"), &dest, &mut std::io::stdout())?;
//! ```

pub mod document;
pub mod format;
pub mod pdf;
pub mod router;

pub use document::{ContentForm, RenderedDocument};
pub use format::{force_extension, Destination, OutputFormat};
pub use pdf::PdfRenderer;
pub use router::Exporter;
