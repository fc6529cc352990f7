//! Error types for makeinvoicelib

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while building a document
#[derive(Error, Debug)]
pub enum MakeinvoiceError {
    /// No input file was given
    #[error("no input files: pass at least one CSV file")]
    NoInput,

    /// The field separator is not a single ASCII character
    #[error("invalid delimiter '{0}': expected a single ASCII character")]
    InvalidDelimiter(String),

    /// An input file could not be opened
    #[error("cannot open '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input file was opened but could not be read
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input file is not valid delimited data
    #[error("cannot read '{path}': invalid CSV file ({message})")]
    MalformedCsv { path: PathBuf, message: String },

    /// Two input files derive the same document key (strict mode only)
    #[error("duplicate document key '{key}': '{first}' and '{second}' collide")]
    DuplicateKey {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// The template file could not be read
    #[error("cannot read the template '{path}': {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The template does not parse
    #[error("invalid template file '{name}': {message}")]
    TemplateSyntax { name: String, message: String },

    /// The template parsed but failed against the supplied data
    #[error("cannot render the template '{name}': {message}")]
    TemplateRender { name: String, message: String },

    /// The stylesheet given for PDF export does not exist
    #[error("stylesheet not found: {0}")]
    StylesheetNotFound(PathBuf),

    /// The destination file could not be created or written
    #[error("cannot write '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The temporary HTML file for the PDF renderer could not be staged
    #[error("cannot create a temporary html file: {0}")]
    Staging(std::io::Error),

    /// The external PDF renderer is not on the execution path
    #[error("impossible to call `{tool}`: install it and run this command again")]
    ToolUnavailable { tool: String },

    /// The external PDF renderer could not be started
    #[error("cannot start `{tool}`: {source}")]
    ToolSpawn {
        tool: String,
        source: std::io::Error,
    },

    /// The external PDF renderer exited unsuccessfully
    #[error("`{tool}` failed ({status}){}", detail_suffix(.detail))]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        detail: Option<String>,
    },

    /// IO error (standard output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

/// Failure classes, stable enough for scripts to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Io,
    MalformedInput,
    Syntax,
    Execution,
    Unavailable,
    Subprocess,
}

impl ErrorKind {
    /// Process exit code for this class.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Usage => 2,
            ErrorKind::Io => 3,
            ErrorKind::MalformedInput => 4,
            ErrorKind::Syntax => 5,
            ErrorKind::Execution => 6,
            ErrorKind::Unavailable => 7,
            ErrorKind::Subprocess => 8,
        }
    }
}

impl MakeinvoiceError {
    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MakeinvoiceError::NoInput | MakeinvoiceError::InvalidDelimiter(_) => ErrorKind::Usage,
            MakeinvoiceError::FileOpen { .. }
            | MakeinvoiceError::FileRead { .. }
            | MakeinvoiceError::TemplateRead { .. }
            | MakeinvoiceError::StylesheetNotFound(_)
            | MakeinvoiceError::OutputWrite { .. }
            | MakeinvoiceError::Staging(_)
            | MakeinvoiceError::Io(_) => ErrorKind::Io,
            MakeinvoiceError::MalformedCsv { .. } | MakeinvoiceError::DuplicateKey { .. } => {
                ErrorKind::MalformedInput
            }
            MakeinvoiceError::TemplateSyntax { .. } => ErrorKind::Syntax,
            MakeinvoiceError::TemplateRender { .. } => ErrorKind::Execution,
            MakeinvoiceError::ToolUnavailable { .. } => ErrorKind::Unavailable,
            MakeinvoiceError::ToolSpawn { .. } | MakeinvoiceError::ToolFailed { .. } => {
                ErrorKind::Subprocess
            }
        }
    }
}
