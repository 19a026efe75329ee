//! Collapsing repeated extraction results into a unique listing sequence.

use std::collections::HashSet;

use storefront_core::RawListing;

use crate::urls::{canonicalize_url, recover_listing_id};

/// Tracks which listings a single scan has already produced.
///
/// A listing is a duplicate when its canonical URL, or its listing id, was
/// admitted earlier. Checking ids as well keeps listing ids unique even when
/// the extractor reports one listing under two unrelated URLs.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen_urls: HashSet<String>,
    seen_ids: HashSet<String>,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a listing is seen and records it;
    /// `false` for every later duplicate.
    pub fn admit(&mut self, listing: &RawListing) -> bool {
        let key = canonicalize_url(&listing.canonical_url);
        if self.seen_urls.contains(&key) {
            tracing::debug!(listing_id = %listing.listing_id, url = %key, "dropping duplicate listing URL");
            return false;
        }
        if !listing.listing_id.is_empty() && self.seen_ids.contains(&listing.listing_id) {
            tracing::debug!(listing_id = %listing.listing_id, url = %key, "dropping duplicate listing id");
            return false;
        }

        self.seen_urls.insert(key);
        if !listing.listing_id.is_empty() {
            self.seen_ids.insert(listing.listing_id.clone());
        }
        true
    }

    /// Number of listings admitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen_urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen_urls.is_empty()
    }
}

/// Keeps the first occurrence of each listing, preserving scan order.
pub fn dedup_listings<I>(listings: I) -> Vec<RawListing>
where
    I: IntoIterator<Item = RawListing>,
{
    let mut dedup = Deduplicator::new();
    listings
        .into_iter()
        .filter(|listing| dedup.admit(listing))
        .collect()
}

/// Fills missing listing ids from the listing URL and drops listings that
/// still lack a URL or an id.
pub fn sanitize_listings<I>(listings: I) -> Vec<RawListing>
where
    I: IntoIterator<Item = RawListing>,
{
    listings
        .into_iter()
        .filter_map(|mut listing| {
            listing.listing_id = listing.listing_id.trim().to_string();
            if listing.canonical_url.trim().is_empty() {
                tracing::warn!(listing_id = %listing.listing_id, title = %listing.title, "skipping listing without a URL");
                return None;
            }
            if listing.listing_id.is_empty() {
                match recover_listing_id(&listing.canonical_url) {
                    Some(id) => listing.listing_id = id,
                    None => {
                        tracing::warn!(url = %listing.canonical_url, "skipping listing without a listing id");
                        return None;
                    }
                }
            }
            Some(listing)
        })
        .collect()
}

#[cfg(test)]
#[path = "dedup_test.rs"]
mod tests;
