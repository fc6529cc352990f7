//! Export routing: one entry point, dispatched on the destination format.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::MakeinvoiceError;
use crate::export::document::RenderedDocument;
use crate::export::format::{
    force_extension, Destination, OutputFormat, HTML_EXT, MARKDOWN_EXT, PDF_EXT,
};
use crate::export::pdf::PdfRenderer;
use crate::options::ExportOptions;
use crate::Result;

/// Routes a rendered document to its destination.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    pdf: PdfRenderer,
}

impl Exporter {
    pub fn new(pdf: PdfRenderer) -> Self {
        Self { pdf }
    }

    /// Build an exporter from run options (PDF tool, stylesheet, staging dir).
    pub fn from_options(options: &ExportOptions) -> Self {
        Self::new(
            PdfRenderer::new(options.pdf_tool.clone())
                .stylesheet(options.stylesheet.clone())
                .staging_dir(options.staging_dir.clone()),
        )
    }

    /// Export `document` to `destination`.
    ///
    /// Standard output receives the body verbatim through `stdout`. File
    /// destinations get their extension forced; HTML and PDF convert a
    /// Markdown body once, before anything is written. Returns the path that
    /// was written, or None for standard output.
    pub fn export<W: Write>(
        &self,
        document: RenderedDocument,
        destination: &Destination,
        stdout: &mut W,
    ) -> Result<Option<PathBuf>> {
        let format = destination.format();
        debug!(format = ?format, path = ?destination.path(), form = ?document.form(), "exporting");

        let written = match (format, destination.path()) {
            (OutputFormat::Stdout, _) | (_, None) => {
                stdout.write_all(document.body().as_bytes())?;
                stdout.flush()?;
                return Ok(None);
            }
            (OutputFormat::Markdown, Some(path)) => {
                let path = force_extension(path, MARKDOWN_EXT);
                write_file(&path, document.body())?;
                path
            }
            (OutputFormat::Html, Some(path)) => {
                let html = document.into_html();
                let path = force_extension(path, HTML_EXT);
                write_file(&path, &html)?;
                path
            }
            (OutputFormat::Pdf, Some(path)) => {
                let html = document.into_html();
                let path = force_extension(path, PDF_EXT);
                self.pdf.render(&html, &path)?;
                path
            }
        };

        debug!(path = %written.display(), "document written");
        Ok(Some(written))
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| MakeinvoiceError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
