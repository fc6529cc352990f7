//! Markdown to HTML conversion.
//!
//! Uses pulldown-cmark with the GitHub-flavoured extensions an invoice
//! template is likely to lean on (tables, strikethrough, footnotes, task
//! lists). Raw HTML in the input is passed through untouched, so converting
//! already converted output does not nest it in another paragraph.

use pulldown_cmark::{html, Options, Parser};

use crate::source::TableMap;

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Convert a Markdown document to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Convert every table of a mapping, keeping its keys.
pub fn to_html_all(tables: &TableMap) -> TableMap {
    tables
        .iter()
        .map(|(key, markdown)| (key.clone(), to_html(markdown)))
        .collect()
}
