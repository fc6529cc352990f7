//! The export pipeline: CSV files in, one document out.
//!
//! 1. Ingest every input into the keyed table mapping (a single file is a
//!    mapping of one).
//! 2. Load the template (file or injected default).
//! 3. Render. An HTML template gets its tables converted first and yields
//!    an HTML document; a Markdown template yields Markdown.
//! 4. Route the document by destination format; HTML and PDF destinations
//!    convert a Markdown document there, once.
//!
//! Any failure aborts the run before anything is written.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::MakeinvoiceError;
use crate::export::{Destination, Exporter, OutputFormat, RenderedDocument};
use crate::markdown::to_html_all;
use crate::options::ExportOptions;
use crate::source::{ingest_files, TableMap};
use crate::template::{DocumentTemplate, TemplateData};
use crate::Result;

/// Run a full export.
///
/// Returns the path written, or None when the document went to `stdout`.
///
/// # Example
///
/// ```rust,ignore
/// use makeinvoicelib::{run, ExportOptions};
///
/// let written = run(&["items.csv"], &ExportOptions::new().output("invoice.html"), &mut std::io::stdout())?;
/// ```
pub fn run<P: AsRef<Path>, W: Write>(
    inputs: &[P],
    options: &ExportOptions,
    stdout: &mut W,
) -> Result<Option<PathBuf>> {
    let (template, data) = prepare(inputs, options)?;
    let destination = Destination::new(options.output.clone());

    if options.stylesheet.is_some() && destination.format() != OutputFormat::Pdf {
        debug!("stylesheet only applies to pdf output, ignoring it");
    }

    let document = render_document(&template, &data)?;
    Exporter::from_options(options).export(document, &destination, stdout)
}

/// The context a run would render its template with.
pub fn template_context<P: AsRef<Path>>(
    inputs: &[P],
    options: &ExportOptions,
) -> Result<TemplateData> {
    prepare(inputs, options).map(|(_, data)| data)
}

/// Render `data` with `template`, tagging the result with its content form.
pub fn render_document(
    template: &DocumentTemplate,
    data: &TemplateData,
) -> Result<RenderedDocument> {
    let body = template.render(data)?;
    if template.is_html() {
        Ok(RenderedDocument::html(body))
    } else {
        Ok(RenderedDocument::markdown(body))
    }
}

fn prepare<P: AsRef<Path>>(
    inputs: &[P],
    options: &ExportOptions,
) -> Result<(DocumentTemplate, TemplateData)> {
    if inputs.is_empty() {
        return Err(MakeinvoiceError::NoInput);
    }

    let tables = ingest_files(inputs, options.delimiter, options.duplicate_keys)?;
    let template = DocumentTemplate::load(options.template.as_deref(), &options.default_template)?;
    debug!(
        template = template.name(),
        html = template.is_html(),
        documents = tables.len(),
        "template loaded"
    );

    let data = data_for(&template, tables);
    Ok((template, data))
}

fn data_for(template: &DocumentTemplate, tables: TableMap) -> TemplateData {
    if template.is_html() {
        TemplateData::keyed(to_html_all(&tables))
    } else {
        TemplateData::keyed(tables)
    }
}
