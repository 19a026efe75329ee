//! Folding deduplicated listings and their enrichment into products and a
//! collection index.

use std::collections::{BTreeMap, HashSet};

use storefront_core::slug::{listing_slug, slugify};
use storefront_core::{Collection, DetailFields, Enrichment, KeywordTable, Product, RawListing};

use crate::classify::classify;
use crate::description::normalize_description;
use crate::price::price_fields;

/// The two artifacts an ingest run hands to the page renderer.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Products in scan order; `listing_id` and `slug` are unique.
    pub products: Vec<Product>,
    /// Non-empty collections keyed by label.
    pub collections: BTreeMap<String, Collection>,
}

impl Catalog {
    #[must_use]
    pub fn product(&self, listing_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.listing_id == listing_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Accumulates products for one ingest run.
///
/// Owns the run's cross-listing state: the slugs handed out so far and each
/// collection's member list. Listings must be pushed in a fixed order (scan
/// order) for slug collision suffixes to be reproducible.
#[derive(Debug)]
pub struct Aggregator<'t> {
    table: &'t KeywordTable,
    share_link_base: String,
    assigned_slugs: HashSet<String>,
    listing_ids: HashSet<String>,
    products: Vec<Product>,
    /// Member listing ids per keyword-table rule, same indexing as `table.rules()`.
    members: Vec<Vec<String>>,
}

impl<'t> Aggregator<'t> {
    #[must_use]
    pub fn new(table: &'t KeywordTable, share_link_base: &str) -> Self {
        Self {
            table,
            share_link_base: share_link_base.trim_end_matches('/').to_string(),
            assigned_slugs: HashSet::new(),
            listing_ids: HashSet::new(),
            products: Vec::new(),
            members: vec![Vec::new(); table.len()],
        }
    }

    /// Builds the product for one listing and records its collection
    /// memberships.
    ///
    /// `enrichment` is `None` when no detail fetch was attempted; the product
    /// is then classified by title alone. A failed fetch yields a product
    /// with empty description, tags, and collections. Returns `false` (and
    /// emits nothing) only for a listing id already pushed in this run.
    pub fn push(&mut self, listing: RawListing, enrichment: Option<&Enrichment>) -> bool {
        if !self.listing_ids.insert(listing.listing_id.clone()) {
            tracing::warn!(listing_id = %listing.listing_id, "listing id already aggregated; skipping");
            return false;
        }

        let empty = DetailFields::default();
        let (fields, classify_listing) = match enrichment {
            Some(Enrichment::Fetched(fields)) => (fields, true),
            Some(Enrichment::Failed { reason }) => {
                tracing::warn!(
                    listing_id = %listing.listing_id,
                    reason = %reason,
                    "enrichment failed; emitting product from card fields only"
                );
                (&empty, false)
            }
            None => (&empty, true),
        };

        let description = fields
            .raw_description_markup
            .as_deref()
            .map(normalize_description)
            .unwrap_or_default();
        let tags = clean_tags(&fields.tags);
        let collections = if classify_listing {
            classify(self.table, &listing.title, &tags)
        } else {
            Vec::new()
        };
        let slug = self.assign_slug(&listing.title, &listing.listing_id);
        let (price, price_amount) = price_fields(&listing.price_text);
        let images = merge_images(&fields.images, &listing.image_url);
        let primary_image = if listing.image_url.trim().is_empty() {
            images.first().cloned().unwrap_or_default()
        } else {
            listing.image_url.trim().to_string()
        };
        let meta_description = fields
            .meta_description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        for (rule, members) in self.table.rules().iter().zip(self.members.iter_mut()) {
            if collections.contains(&rule.name) {
                members.push(listing.listing_id.clone());
            }
        }

        self.products.push(Product {
            share_link: format!("{}/{}", self.share_link_base, listing.listing_id),
            listing_id: listing.listing_id,
            title: listing.title.trim().to_string(),
            slug,
            price,
            price_amount,
            primary_image,
            images,
            description,
            meta_description,
            tags,
            collections,
        });
        true
    }

    /// Slug for the title, suffixed with the listing id when an earlier
    /// listing in this run already holds it.
    fn assign_slug(&mut self, title: &str, listing_id: &str) -> String {
        let base = listing_slug(title, listing_id);
        if self.assigned_slugs.insert(base.clone()) {
            return base;
        }

        let mut suffix = slugify(listing_id);
        if suffix.is_empty() {
            suffix = "listing".to_string();
        }
        let mut candidate = format!("{base}-{suffix}");
        let mut n = 2u32;
        while self.assigned_slugs.contains(&candidate) {
            candidate = format!("{base}-{suffix}-{n}");
            n += 1;
        }

        tracing::debug!(listing_id = %listing_id, slug = %base, resolved = %candidate, "slug collision resolved");
        self.assigned_slugs.insert(candidate.clone());
        candidate
    }

    /// Number of products emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Closes the run. Collections with no members are left out.
    #[must_use]
    pub fn finish(self) -> Catalog {
        let collections: BTreeMap<String, Collection> = self
            .table
            .rules()
            .iter()
            .zip(self.members)
            .filter(|(_, members)| !members.is_empty())
            .map(|(rule, members)| {
                (
                    rule.name.clone(),
                    Collection::new(rule.name.clone(), rule.slug(), members),
                )
            })
            .collect();

        tracing::info!(
            products = self.products.len(),
            collections = collections.len(),
            "aggregation complete"
        );

        Catalog {
            products: self.products,
            collections,
        }
    }
}

/// Trims tags, drops empties, and removes exact repeats keeping first-seen
/// order.
fn clean_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .map(str::to_string)
        .collect()
}

/// Enrichment images in first-seen order without repeats, or the card image
/// when enrichment supplied none.
fn merge_images(detail_images: &[String], card_image: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let images: Vec<String> = detail_images
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty() && seen.insert(*u))
        .map(str::to_string)
        .collect();

    if images.is_empty() && !card_image.trim().is_empty() {
        return vec![card_image.trim().to_string()];
    }
    images
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
