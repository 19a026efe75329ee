//! Reading extraction output and writing the renderer's JSON artifacts.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use storefront_core::{Collection, Enrichment, Product, RawListing};

use crate::aggregate::Catalog;
use crate::changes::GenerationLog;
use crate::error::IngestError;

pub const PRODUCTS_FILE: &str = "products_detailed.json";
pub const COLLECTIONS_FILE: &str = "collections.json";
pub const GENERATION_LOG_FILE: &str = "generation_log.json";

#[derive(Serialize)]
struct ProductsOut<'a> {
    products: &'a [Product],
}

#[derive(Deserialize)]
struct ProductsIn {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Serialize)]
struct CollectionsOut<'a> {
    collections: &'a BTreeMap<String, Collection>,
}

/// Reads the extraction collaborator's listing array.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or is not a JSON array
/// of listings.
pub fn load_listings(path: &Path) -> Result<Vec<RawListing>, IngestError> {
    read_json(path)
}

/// Reads the per-listing enrichment map (`listingId` → outcome).
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or parsed.
pub fn load_details(path: &Path) -> Result<HashMap<String, Enrichment>, IngestError> {
    read_json(path)
}

/// Reads a previously written products artifact.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or parsed.
pub fn load_products(path: &Path) -> Result<Vec<Product>, IngestError> {
    let file: ProductsIn = read_json(path)?;
    Ok(file.products)
}

/// Writes `products_detailed.json` and `collections.json` into `dir`,
/// creating it if needed. Returns the written paths.
///
/// # Errors
///
/// Returns [`IngestError`] if the directory or either file cannot be written.
pub fn write_catalog(dir: &Path, catalog: &Catalog) -> Result<Vec<PathBuf>, IngestError> {
    create_dir(dir)?;

    let products_path = dir.join(PRODUCTS_FILE);
    write_json_atomic(
        &products_path,
        &ProductsOut {
            products: &catalog.products,
        },
    )?;

    let collections_path = dir.join(COLLECTIONS_FILE);
    write_json_atomic(
        &collections_path,
        &CollectionsOut {
            collections: &catalog.collections,
        },
    )?;

    Ok(vec![products_path, collections_path])
}

/// Writes `generation_log.json` into `dir`.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be written.
pub fn write_generation_log(dir: &Path, log: &GenerationLog) -> Result<PathBuf, IngestError> {
    create_dir(dir)?;
    let path = dir.join(GENERATION_LOG_FILE);
    write_json_atomic(&path, log)?;
    Ok(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| IngestError::Deserialize {
        context: path.display().to_string(),
        source: e,
    })
}

fn create_dir(dir: &Path) -> Result<(), IngestError> {
    std::fs::create_dir_all(dir).map_err(|e| IngestError::Write {
        path: dir.display().to_string(),
        source: e,
    })
}

/// Serializes to a sibling temp file, then renames over `path` so readers
/// never observe a half-written artifact.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), IngestError> {
    let mut body = serde_json::to_string_pretty(value).map_err(|e| IngestError::Serialize {
        context: path.display().to_string(),
        source: e,
    })?;
    body.push('\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, body).map_err(|e| IngestError::Write {
        path: tmp.display().to_string(),
        source: e,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| IngestError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "artifact written");
    Ok(())
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
