#![deny(warnings)]

//! JSON loading for play catalogs and invoices.

use playbill_core::{Catalog, Invoice};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// An invoices document holds either one invoice or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum InvoicesDoc {
    Many(Vec<Invoice>),
    One(Invoice),
}

pub fn parse_catalog(text: &str) -> Result<Catalog, LoadError> {
    Ok(serde_json::from_str(text)?)
}

pub fn parse_invoice(text: &str) -> Result<Invoice, LoadError> {
    Ok(serde_json::from_str(text)?)
}

/// Parse a single invoice object or an array of invoices.
pub fn parse_invoices(text: &str) -> Result<Vec<Invoice>, LoadError> {
    let doc: InvoicesDoc = serde_json::from_str(text)?;
    Ok(match doc {
        InvoicesDoc::Many(invoices) => invoices,
        InvoicesDoc::One(invoice) => vec![invoice],
    })
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let catalog = parse_catalog(&read(path)?)?;
    info!(path = %path.display(), plays = catalog.len(), "loaded catalog");
    Ok(catalog)
}

pub fn load_invoices<P: AsRef<Path>>(path: P) -> Result<Vec<Invoice>, LoadError> {
    let path = path.as_ref();
    let invoices = parse_invoices(&read(path)?)?;
    info!(path = %path.display(), invoices = invoices.len(), "loaded invoices");
    Ok(invoices)
}
