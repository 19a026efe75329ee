//! Run-to-run change reporting.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::Product;

use crate::aggregate::Catalog;

/// Listing ids present in `current` but not in `previous`, in `current` order.
#[must_use]
pub fn new_listing_ids<'a>(previous: &[Product], current: &'a [Product]) -> Vec<&'a str> {
    let known: HashSet<&str> = previous.iter().map(|p| p.listing_id.as_str()).collect();
    current
        .iter()
        .map(|p| p.listing_id.as_str())
        .filter(|id| !known.contains(id))
        .collect()
}

/// Summary written next to the artifacts after each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationLog {
    pub generated_at: DateTime<Utc>,
    pub total_products: usize,
    pub new_products: usize,
    pub collections: usize,
    pub new_product_ids: Vec<String>,
}

impl GenerationLog {
    #[must_use]
    pub fn new(catalog: &Catalog, previous: &[Product], generated_at: DateTime<Utc>) -> Self {
        let new_product_ids: Vec<String> = new_listing_ids(previous, &catalog.products)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            generated_at,
            total_products: catalog.products.len(),
            new_products: new_product_ids.len(),
            collections: catalog.collections.len(),
            new_product_ids,
        }
    }
}
