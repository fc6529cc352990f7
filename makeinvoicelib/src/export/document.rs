//! Rendered documents and the form their content is in.

use crate::markdown::to_html;

/// Whether a rendered document is still Markdown or already HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentForm {
    Markdown,
    Html,
}

/// Output of a template, tagged with its content form.
///
/// Converting to HTML consumes the document, so a body can only ever be
/// converted once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    body: String,
    form: ContentForm,
}

impl RenderedDocument {
    /// A document rendered from a Markdown template.
    pub fn markdown(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            form: ContentForm::Markdown,
        }
    }

    /// A document that is already HTML (HTML template).
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            form: ContentForm::Html,
        }
    }

    pub fn form(&self) -> ContentForm {
        self.form
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The body as HTML, converting it if it is still Markdown.
    pub fn into_html(self) -> String {
        match self.form {
            ContentForm::Markdown => to_html(&self.body),
            ContentForm::Html => self.body,
        }
    }

    pub fn into_body(self) -> String {
        self.body
    }
}
