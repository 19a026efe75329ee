pub mod aggregate;
pub mod changes;
pub mod classify;
pub mod dedup;
pub mod description;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod price;
pub mod urls;

pub use aggregate::{Aggregator, Catalog};
pub use changes::{new_listing_ids, GenerationLog};
pub use classify::classify;
pub use dedup::{dedup_listings, sanitize_listings, Deduplicator};
pub use description::normalize_description;
pub use error::IngestError;
pub use output::{
    load_details, load_listings, load_products, write_catalog, write_generation_log,
    COLLECTIONS_FILE, GENERATION_LOG_FILE, PRODUCTS_FILE,
};
pub use pipeline::{ingest, MISSING_DETAIL_REASON};
pub use price::{parse_price, price_fields, Price};
pub use urls::{canonicalize_url, recover_listing_id};
