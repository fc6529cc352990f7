//! Document templates.
//!
//! Templates use Jinja syntax (minijinja). A template sees the tables it is
//! rendered with as plain strings; nothing is escaped, so an HTML template
//! receives tables that were converted to HTML beforehand and injects them
//! verbatim.
//!
//! ## Context
//!
//! - Keyed mode (the pipeline): every document key is a variable holding its
//!   table (`{{ Invoice }}`), `tables` holds the whole mapping in key order
//!   (`{% for key, table in tables|items %}`), and with a single document
//!   `Table` aliases it. Document keys win over these reserved names.
//! - Single mode: only `Table`.
//!
//! Referencing an undefined variable is a render error, not an empty string.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use tracing::debug;

use crate::error::MakeinvoiceError;
use crate::source::TableMap;
use crate::Result;

/// Name the built-in template is registered under.
pub const DEFAULT_TEMPLATE_NAME: &str = "default";

/// Variable holding the whole table mapping.
pub const TABLES_VAR: &str = "tables";

/// Variable holding the only table.
pub const TABLE_VAR: &str = "Table";

/// A single context entry: one table, or the mapping of all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    Text(String),
    Tables(TableMap),
}

/// Data a template is rendered against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateData {
    context: BTreeMap<String, ContextValue>,
}

impl TemplateData {
    /// Single-table context: `{ Table: table }`.
    pub fn single(table: impl Into<String>) -> Self {
        let mut context = BTreeMap::new();
        context.insert(TABLE_VAR.to_string(), ContextValue::Text(table.into()));
        Self { context }
    }

    /// Context for a keyed table mapping.
    pub fn keyed(tables: TableMap) -> Self {
        let mut context: BTreeMap<String, ContextValue> = tables
            .iter()
            .map(|(key, table)| (key.clone(), ContextValue::Text(table.clone())))
            .collect();

        if tables.len() == 1 {
            if let Some(only) = tables.values().next() {
                context
                    .entry(TABLE_VAR.to_string())
                    .or_insert_with(|| ContextValue::Text(only.clone()));
            }
        }
        context
            .entry(TABLES_VAR.to_string())
            .or_insert(ContextValue::Tables(tables));

        Self { context }
    }

    /// Look up a context variable.
    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.context.get(name)
    }

    /// Names of all context variables, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.context.keys().map(String::as_str)
    }
}

/// A parsed template, ready to render.
#[derive(Debug)]
pub struct DocumentTemplate {
    env: Environment<'static>,
    name: String,
    html: bool,
}

impl DocumentTemplate {
    /// Load a template file, or the given default source when `path` is None
    /// or empty.
    ///
    /// A file whose name ends in `.html` is an HTML template: tables must be
    /// converted before rendering and the output is already HTML.
    pub fn load(path: Option<&Path>, default_source: &str) -> Result<Self> {
        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            debug!("using the built-in default template");
            return Self::from_source(DEFAULT_TEMPLATE_NAME, default_source);
        };

        let source = fs::read_to_string(path).map_err(|source| MakeinvoiceError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!(path = %path.display(), "loaded template file");
        Self::from_source(name, source)
    }

    /// Parse template source registered under `name`.
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source: String = source.into();
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_template_owned(name.clone(), source)
            .map_err(|e| MakeinvoiceError::TemplateSyntax {
                name: name.clone(),
                message: e.to_string(),
            })?;

        let html = Path::new(&name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));

        Ok(Self { env, name, html })
    }

    /// Whether this template produces HTML.
    pub fn is_html(&self) -> bool {
        self.html
    }

    /// Template name (file name, or `default`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render against `data`.
    pub fn render(&self, data: &TemplateData) -> Result<String> {
        let render_error = |e: minijinja::Error| MakeinvoiceError::TemplateRender {
            name: self.name.clone(),
            message: e.to_string(),
        };

        let template = self.env.get_template(&self.name).map_err(render_error)?;
        template.render(data).map_err(render_error)
    }
}
