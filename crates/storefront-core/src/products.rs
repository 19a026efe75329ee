use rust_decimal::Decimal;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// One product card as extracted from the marketplace shop page.
///
/// Older extraction output used `link` / `image` / `price` keys and carried no
/// listing id; the aliases keep those files readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(default)]
    pub title: String,
    /// Marketplace listing id, e.g. `"1234567890"`.
    #[serde(default)]
    pub listing_id: String,
    /// Listing URL as scraped. Tracking parameters are stripped before it is
    /// used as a dedup key.
    #[serde(alias = "link")]
    pub canonical_url: String,
    #[serde(default, alias = "image")]
    pub image_url: String,
    /// Locale-formatted price, e.g. `"£4.99"` or `"$1,299.00"`.
    #[serde(default, alias = "price")]
    pub price_text: String,
}

/// Enrichment fetched from a listing's own page. Every field is
/// independently optional: a partially loaded page still contributes what it
/// has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailFields {
    /// Description body; may contain paragraph, list, heading, and inline tags.
    #[serde(default)]
    pub raw_description_markup: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Outcome of the detail fetch for a single listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Enrichment {
    Fetched(DetailFields),
    Failed {
        #[serde(default)]
        reason: String,
    },
}

impl Enrichment {
    /// The fetched fields, or `None` when the fetch failed.
    #[must_use]
    pub fn fields(&self) -> Option<&DetailFields> {
        match self {
            Enrichment::Fetched(fields) => Some(fields),
            Enrichment::Failed { .. } => None,
        }
    }
}

/// The durable product record handed to the page renderer.
///
/// `listing_id` is the identity key. `slug` is unique within one ingest run
/// but may differ between runs when collision suffixes change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub listing_id: String,
    pub title: String,
    pub slug: String,
    /// Display price: currency symbol plus amount when parseable, otherwise
    /// the scraped text trimmed.
    pub price: String,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price_amount: Option<Decimal>,
    pub primary_image: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Plain text with paragraph and list structure kept as newlines.
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Collection labels in keyword-table order.
    #[serde(default)]
    pub collections: Vec<String>,
    pub share_link: String,
}

impl Product {
    #[must_use]
    pub fn in_collection(&self, label: &str) -> bool {
        self.collections.iter().any(|c| c == label)
    }
}

/// A named grouping of products. Membership is fixed at construction;
/// `product_count` is always derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    name: String,
    slug: String,
    listing_ids: Vec<String>,
}

impl Collection {
    #[must_use]
    pub fn new(name: impl Into<String>, slug: impl Into<String>, listing_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            listing_ids,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Member listing ids in the order products were ingested.
    #[must_use]
    pub fn listing_ids(&self) -> &[String] {
        &self.listing_ids
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.listing_ids.len()
    }
}

impl Serialize for Collection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Collection", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("slug", &self.slug)?;
        state.serialize_field("listingIds", &self.listing_ids)?;
        state.serialize_field("productCount", &self.product_count())?;
        state.end()
    }
}
