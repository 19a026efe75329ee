pub mod app_config;
pub mod collections;
pub mod config;
pub mod error;
pub mod products;
pub mod slug;

pub use app_config::{AppConfig, Environment};
pub use collections::{load_keyword_table, CollectionRule, KeywordTable};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use products::{Collection, DetailFields, Enrichment, Product, RawListing};
pub use slug::{listing_slug, slugify};
