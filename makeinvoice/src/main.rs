//! # makeinvoice
//!
//! A CLI tool that creates documents (Markdown, HTML, PDF) populated with
//! data from CSV files.
//!
//! ## Overview
//!
//! makeinvoice is built on top of makeinvoicelib. Each CSV file becomes a
//! Markdown table named after the file (`items.csv` is `{{ Items }}`), the
//! tables are rendered through a template and the result goes to standard
//! output or to the file given with `--output`, whose extension picks the
//! format.
//!
//! ## Usage
//!
//! ```bash
//! # Print every table as Markdown
//! makeinvoice items.csv customer.csv
//!
//! # Fill a template and write HTML
//! makeinvoice items.csv customer.csv --template invoice.md --output invoice.html
//!
//! # PDF through wkhtmltopdf, with a print stylesheet
//! makeinvoice items.csv -t invoice.md -o invoice.pdf --style print.css
//!
//! # Semicolon separated input
//! makeinvoice items.csv -d ';'
//!
//! # Show what a template can reference
//! makeinvoice items.csv customer.csv --dump-context
//! ```
//!
//! ## Logging
//!
//! Diagnostics go to stderr. The filter is read from `RUST_LOG`, then
//! `MAKEINVOICE_LOG`; `--verbose` turns on debug output when neither is set.

mod report;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use makeinvoicelib::{
    template_context, Delimiter, DuplicateKeys, ExportOptions, DEFAULT_PDF_TOOL,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable read when `RUST_LOG` is not set
const LOG_ENV: &str = "MAKEINVOICE_LOG";

/// Environment variable naming the PDF converter
const PDF_TOOL_ENV: &str = "MAKEINVOICE_PDF_TOOL";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("makeinvoice")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Create documents (Markdown, HTML, PDF) populated with data from CSV files")
        .arg(
            Arg::new("inputs")
                .value_name("CSV")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("CSV files to read, each available in the template under its capitalized name"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .help("Output file; .md, .html or .pdf picks the format (default: stdout)"),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .value_parser(value_parser!(PathBuf))
                .help("Template file (a .html template receives HTML tables)"),
        )
        .arg(
            Arg::new("style")
                .short('s')
                .long("style")
                .visible_alias("css")
                .visible_short_alias('c')
                .value_parser(value_parser!(PathBuf))
                .help("Stylesheet handed to the PDF converter"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .default_value(",")
                .help("CSV field separator, a single character ('\\t' for tab)"),
        )
        .arg(
            Arg::new("pdf-tool")
                .long("pdf-tool")
                .env(PDF_TOOL_ENV)
                .default_value(DEFAULT_PDF_TOOL)
                .help("HTML to PDF converter, looked up on PATH"),
        )
        .arg(
            Arg::new("strict-keys")
                .long("strict-keys")
                .action(ArgAction::SetTrue)
                .help("Fail when two files map to the same template name instead of keeping the last"),
        )
        .arg(
            Arg::new("dump-context")
                .long("dump-context")
                .action(ArgAction::SetTrue)
                .help("Print the template context as JSON instead of rendering"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log each step to stderr"),
        )
}

/// Translate parsed arguments into export options
fn build_options(matches: &ArgMatches) -> anyhow::Result<ExportOptions> {
    let delimiter: Delimiter = matches
        .get_one::<String>("delimiter")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;

    let duplicates = if matches.get_flag("strict-keys") {
        DuplicateKeys::Reject
    } else {
        DuplicateKeys::Overwrite
    };

    let mut options = ExportOptions::new()
        .delimiter(delimiter)
        .duplicate_keys(duplicates);

    if let Some(template) = matches.get_one::<PathBuf>("template") {
        options = options.template(template);
    }
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        options = options.output(output);
    }
    if let Some(style) = matches.get_one::<PathBuf>("style") {
        options = options.stylesheet(style);
    }
    if let Some(tool) = matches.get_one::<String>("pdf-tool") {
        options = options.pdf_tool(tool);
    }

    Ok(options)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let inputs: Vec<PathBuf> = matches
        .get_many::<PathBuf>("inputs")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    let options = build_options(matches)?;

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    if matches.get_flag("dump-context") {
        let data = template_context(&inputs, &options)?;
        let json = serde_json::to_string_pretty(&data).context("cannot serialize the context")?;
        writeln!(stdout, "{json}")?;
        return Ok(());
    }

    if let Some(path) = makeinvoicelib::run(&inputs, &options, &mut stdout)? {
        info!(path = %path.display(), "wrote document");
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report::fail(&err),
    }
}
