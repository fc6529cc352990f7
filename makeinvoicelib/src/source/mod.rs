//! Source ingestion: read CSV files into tables.
//!
//! This module handles the first stage of the pipeline - turning input
//! files into the keyed table mapping handed to templates. It provides:
//!
//! - **Document keys**: the name each file's table goes by (`Invoice`, `Items`)
//! - **CSV ingestion**: read, tokenize and format every file, in order
//!
//! ## Example
//!
//! ```rust,ignore
//! use makeinvoicelib::source::{ingest_files, document_key};
//!
//! assert_eq!(document_key("data/items.csv"), "Items");
//! let tables = ingest_files(&["data/items.csv"], Delimiter::comma(), DuplicateKeys::Overwrite)?;
//! ```

pub mod ingest;
pub mod key;

pub use ingest::{ingest_files, read_grid, TableMap};
pub use key::document_key;
