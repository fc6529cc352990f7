//! PDF rendering through an external HTML to PDF converter.
//!
//! The converter picks its input format from the file extension, so the
//! HTML is staged in a temporary `.html` file first. The converter is looked
//! up on the execution path before anything is staged, and the staging file
//! is removed whether the converter succeeds or not.
//!
//! Invocation: `<tool> [--user-style-sheet <css>] <staged.html> <output.pdf>`.
//! There is no timeout: a converter that hangs hangs the caller.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::{Builder, TempPath};
use tracing::{debug, warn};

use crate::error::MakeinvoiceError;
use crate::options::DEFAULT_PDF_TOOL;
use crate::Result;

const STAGING_PREFIX: &str = "mkinv_";
const STAGING_SUFFIX: &str = ".html";
const STYLESHEET_FLAG: &str = "--user-style-sheet";

/// Drives the external converter.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    tool: String,
    stylesheet: Option<PathBuf>,
    staging_dir: Option<PathBuf>,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PDF_TOOL)
    }
}

impl PdfRenderer {
    /// Use `tool` (a name looked up on PATH, or a path).
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            stylesheet: None,
            staging_dir: None,
        }
    }

    /// Pass a user stylesheet to the converter.
    pub fn stylesheet(mut self, path: Option<PathBuf>) -> Self {
        self.stylesheet = path;
        self
    }

    /// Stage temporary files in `dir` instead of the system temp dir.
    pub fn staging_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.staging_dir = dir;
        self
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Resolve the converter on the execution path.
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(&self.tool).map_err(|_| MakeinvoiceError::ToolUnavailable {
            tool: self.tool.clone(),
        })
    }

    /// Render `html` into the PDF file `output`.
    pub fn render(&self, html: &str, output: &Path) -> Result<()> {
        let tool = self.locate()?;

        if let Some(css) = &self.stylesheet {
            if !css.is_file() {
                return Err(MakeinvoiceError::StylesheetNotFound(css.clone()));
            }
        }

        let staged = self.stage(html)?;
        debug!(staged = %staged.display(), output = %output.display(), "staged html for pdf rendering");

        let result = self.invoke(&tool, &staged, output);

        let staged_path = staged.to_path_buf();
        if let Err(e) = staged.close() {
            warn!(path = %staged_path.display(), error = %e, "cannot remove staging file");
        }

        result
    }

    /// Write the HTML into a fresh temp file ending in `.html`.
    ///
    /// The handle is closed before returning; the returned path deletes the
    /// file when dropped.
    fn stage(&self, html: &str) -> Result<TempPath> {
        let mut builder = Builder::new();
        builder.prefix(STAGING_PREFIX).suffix(STAGING_SUFFIX);

        let mut file = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(MakeinvoiceError::Staging)?;

        file.write_all(html.as_bytes())
            .and_then(|_| file.flush())
            .map_err(MakeinvoiceError::Staging)?;

        Ok(file.into_temp_path())
    }

    fn invoke(&self, tool: &Path, input: &Path, output: &Path) -> Result<()> {
        let mut command = Command::new(tool);
        if let Some(css) = &self.stylesheet {
            command.arg(STYLESHEET_FLAG).arg(css);
        }
        command
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!(command = ?command, "running pdf converter");
        let out = command.output().map_err(|source| MakeinvoiceError::ToolSpawn {
            tool: self.tool.clone(),
            source,
        })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let detail = stderr
                .lines()
                .map(str::trim)
                .rev()
                .find(|l| !l.is_empty())
                .map(str::to_string);
            return Err(MakeinvoiceError::ToolFailed {
                tool: self.tool.clone(),
                status: out.status,
                detail,
            });
        }

        Ok(())
    }
}
