//! Single-value operator commands: `slug`, `classify`, `normalize`.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use storefront_core::AppConfig;

/// Slug for a title; with no listing id, an untitled product slugs to `listing`.
pub(crate) fn slug_for(title: &str, listing_id: Option<&str>) -> String {
    storefront_core::listing_slug(title, listing_id.unwrap_or_default())
}

/// Labels `title` and `tags` would receive under the configured keyword table.
///
/// # Errors
///
/// Returns an error if the keyword table cannot be loaded.
pub(crate) fn run_classify(
    config: &AppConfig,
    title: &str,
    tags: &[String],
) -> anyhow::Result<Vec<String>> {
    let table = storefront_core::load_keyword_table(&config.collections_path).with_context(
        || format!("loading keyword table {}", config.collections_path.display()),
    )?;
    Ok(storefront_ingest::classify(&table, title, tags))
}

/// Plain text for a markup file, or for stdin when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub(crate) fn run_normalize(path: Option<&Path>) -> anyhow::Result<String> {
    let markup = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    Ok(storefront_ingest::normalize_description(&markup))
}
