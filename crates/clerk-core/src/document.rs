//! Document ingestion boundary
//!
//! Upstream collaborators (spreadsheet parsing, PDF text extraction, OCR)
//! reduce every supported file to one of two shapes: rows with a header, or
//! a text blob. Format dispatch happens exactly once, here, by building the
//! closed `DocumentInput` union; everything downstream matches on the
//! variant instead of re-inspecting the file.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};

/// A document reduced to an extractable shape
#[derive(Debug, Clone)]
pub enum DocumentInput {
    /// Ordered rows with a header row (CSV, spreadsheet export)
    Tabular {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Unstructured text (PDF text layer, OCR output)
    Text(String),
}

/// Source shape a file should be read as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Tabular,
    Text,
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tabular" | "csv" => Ok(Self::Tabular),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Unknown document format: {}", s)),
        }
    }
}

/// Infer the document format from a file extension.
///
/// Anything that is neither tabular nor text-extractable is an unsupported
/// format, the one failure this pipeline surfaces to callers.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(DocumentFormat::Tabular),
        "txt" | "text" => Ok(DocumentFormat::Text),
        _ => Err(Error::UnsupportedFormat(format!(
            "{} (expected a .csv or .txt file)",
            path.display()
        ))),
    }
}

/// Read CSV data into a tabular document
pub fn read_tabular<R: Read>(reader: R) -> Result<DocumentInput> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    debug!("Read tabular document: {} columns, {} rows", headers.len(), rows.len());

    Ok(DocumentInput::Tabular { headers, rows })
}

/// Load a document from disk, dispatching on the detected (or forced) format
pub fn load_document(path: &Path, format: Option<DocumentFormat>) -> Result<DocumentInput> {
    let format = match format {
        Some(f) => f,
        None => detect_format(path)?,
    };

    match format {
        DocumentFormat::Tabular => {
            let file = fs::File::open(path)?;
            read_tabular(file)
        }
        DocumentFormat::Text => Ok(DocumentInput::Text(fs::read_to_string(path)?)),
    }
}
