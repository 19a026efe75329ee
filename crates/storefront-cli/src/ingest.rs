//! The `ingest` command: extraction output in, renderer artifacts out.

use std::path::{Path, PathBuf};

use anyhow::Context;
use storefront_core::{AppConfig, Product};
use storefront_ingest::{Catalog, GenerationLog, PRODUCTS_FILE};

#[derive(Debug)]
pub(crate) struct IngestArgs {
    pub listings: PathBuf,
    pub details: Option<PathBuf>,
    pub collections: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub previous: Option<PathBuf>,
    pub dry_run: bool,
}

/// Run one ingest and write (or, on a dry run, summarize) the artifacts.
///
/// # Errors
///
/// Returns an error if the keyword table, listings, details, or previous
/// products file cannot be loaded, or if an artifact cannot be written.
/// Malformed or failed listings are logged and never abort the run.
pub(crate) fn run_ingest(config: &AppConfig, args: &IngestArgs) -> anyhow::Result<()> {
    let table_path = args
        .collections
        .as_deref()
        .unwrap_or(&config.collections_path);
    let table = storefront_core::load_keyword_table(table_path)
        .with_context(|| format!("loading keyword table {}", table_path.display()))?;

    let listings = storefront_ingest::load_listings(&args.listings)
        .with_context(|| format!("loading listings {}", args.listings.display()))?;
    let details = args
        .details
        .as_deref()
        .map(|path| {
            storefront_ingest::load_details(path)
                .with_context(|| format!("loading details {}", path.display()))
        })
        .transpose()?;

    let out_dir = args.out_dir.as_deref().unwrap_or(&config.output_dir);
    let previous = load_previous(args.previous.as_deref(), out_dir)?;

    tracing::info!(
        listings = listings.len(),
        details = details.as_ref().map_or(0, std::collections::HashMap::len),
        table = %table_path.display(),
        "starting ingest"
    );

    let catalog = storefront_ingest::ingest(
        listings,
        details.as_ref(),
        &table,
        &config.share_link_base,
    );
    let log = GenerationLog::new(&catalog, &previous, chrono::Utc::now());

    if args.dry_run {
        print!("{}", dry_run_summary(&catalog, &log));
        return Ok(());
    }

    let written = storefront_ingest::write_catalog(out_dir, &catalog)
        .with_context(|| format!("writing catalog to {}", out_dir.display()))?;
    let log_path = storefront_ingest::write_generation_log(out_dir, &log)
        .with_context(|| format!("writing generation log to {}", out_dir.display()))?;

    for path in written.iter().chain(std::iter::once(&log_path)) {
        println!("wrote {}", path.display());
    }
    println!(
        "ingested {} products into {} collections ({} new)",
        log.total_products, log.collections, log.new_products
    );

    Ok(())
}

/// Products from an earlier run. An explicit path must exist; the default
/// `products_detailed.json` in the output directory is optional.
fn load_previous(explicit: Option<&Path>, out_dir: &Path) -> anyhow::Result<Vec<Product>> {
    if let Some(path) = explicit {
        return storefront_ingest::load_products(path)
            .with_context(|| format!("loading previous products {}", path.display()));
    }

    let default_path = out_dir.join(PRODUCTS_FILE);
    if !default_path.exists() {
        tracing::debug!(path = %default_path.display(), "no previous products; every listing is new");
        return Ok(Vec::new());
    }
    storefront_ingest::load_products(&default_path)
        .with_context(|| format!("loading previous products {}", default_path.display()))
}

pub(crate) fn dry_run_summary(catalog: &Catalog, log: &GenerationLog) -> String {
    let mut out = format!(
        "dry-run: would write {} products and {} collections\n",
        log.total_products, log.collections
    );
    for collection in catalog.collections.values() {
        out.push_str(&format!(
            "  {} ({}): {} products\n",
            collection.name(),
            collection.slug(),
            collection.product_count()
        ));
    }
    if log.new_product_ids.is_empty() {
        out.push_str("no new products\n");
    } else {
        out.push_str(&format!(
            "new products: [{}]\n",
            log.new_product_ids.join(", ")
        ));
    }
    out
}
