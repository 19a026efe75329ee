//! One ingest run: sanitize, deduplicate, and aggregate a listing scan.

use std::collections::HashMap;

use storefront_core::{Enrichment, KeywordTable, RawListing};

use crate::aggregate::{Aggregator, Catalog};
use crate::dedup::{dedup_listings, sanitize_listings};

/// Reason recorded for listings absent from a supplied detail map.
pub const MISSING_DETAIL_REASON: &str = "no detail record";

/// Turns a raw listing scan into the renderer's catalog.
///
/// When `details` is `None`, no enrichment was attempted and every product is
/// classified by its title. When it is `Some`, a listing without an entry is
/// treated as a failed fetch.
#[must_use]
pub fn ingest(
    listings: Vec<RawListing>,
    details: Option<&HashMap<String, Enrichment>>,
    table: &KeywordTable,
    share_link_base: &str,
) -> Catalog {
    let scanned = listings.len();
    let unique = dedup_listings(sanitize_listings(listings));
    tracing::info!(
        scanned,
        unique = unique.len(),
        "listing scan deduplicated"
    );

    let missing = Enrichment::Failed {
        reason: MISSING_DETAIL_REASON.to_string(),
    };

    let mut aggregator = Aggregator::new(table, share_link_base);
    for listing in unique {
        let enrichment = details.map(|map| map.get(&listing.listing_id).unwrap_or(&missing));
        aggregator.push(listing, enrichment);
    }
    aggregator.finish()
}
