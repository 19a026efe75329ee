use std::collections::BTreeMap;

use storefront_core::{Collection, Product};
use storefront_ingest::{Catalog, GenerationLog};

use super::*;

#[test]
fn parses_ingest_with_defaults() {
    let cli = Cli::try_parse_from(["storefront", "ingest", "--listings", "listings.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Ingest {
            ref listings,
            details: None,
            collections: None,
            out_dir: None,
            previous: None,
            dry_run: false,
        } if listings == &PathBuf::from("listings.json")
    ));
}

#[test]
fn parses_ingest_with_all_flags() {
    let cli = Cli::try_parse_from([
        "storefront",
        "ingest",
        "--listings",
        "l.json",
        "--details",
        "d.json",
        "--collections",
        "c.yaml",
        "--out-dir",
        "site",
        "--previous",
        "old.json",
        "--dry-run",
    ])
    .expect("expected valid cli args");
    let Commands::Ingest {
        details,
        out_dir,
        previous,
        dry_run,
        ..
    } = cli.command
    else {
        panic!("expected ingest command");
    };
    assert_eq!(details, Some(PathBuf::from("d.json")));
    assert_eq!(out_dir, Some(PathBuf::from("site")));
    assert_eq!(previous, Some(PathBuf::from("old.json")));
    assert!(dry_run);
}

#[test]
fn ingest_requires_listings() {
    assert!(Cli::try_parse_from(["storefront", "ingest"]).is_err());
}

#[test]
fn parses_classify_with_repeated_tags() {
    let cli = Cli::try_parse_from([
        "storefront",
        "classify",
        "Cute Cat",
        "--tag",
        "holiday",
        "--tag",
        "golf",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Classify { ref title, ref tags } if title == "Cute Cat" && tags.len() == 2
    ));
}

#[test]
fn parses_normalize_without_path() {
    let cli = Cli::try_parse_from(["storefront", "normalize"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Normalize { path: None }));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["storefront"]).is_err());
}

#[test]
fn slug_for_uses_listing_id_fallback() {
    assert_eq!(tools::slug_for("Golf Fun!", None), "golf-fun");
    assert_eq!(tools::slug_for("", Some("555")), "listing-555");
    assert_eq!(tools::slug_for("!!!", None), "listing");
}

#[test]
fn dry_run_summary_lists_collections_and_new_products() {
    let product = Product {
        listing_id: "7".to_string(),
        title: "Cute Cat".to_string(),
        slug: "cute-cat".to_string(),
        price: String::new(),
        price_amount: None,
        primary_image: String::new(),
        images: Vec::new(),
        description: String::new(),
        meta_description: None,
        tags: Vec::new(),
        collections: vec!["kawaii".to_string()],
        share_link: "https://www.etsy.com/listing/7".to_string(),
    };
    let mut collections = BTreeMap::new();
    collections.insert(
        "kawaii".to_string(),
        Collection::new("kawaii", "kawaii", vec!["7".to_string()]),
    );
    let catalog = Catalog {
        products: vec![product],
        collections,
    };
    let log = GenerationLog::new(&catalog, &[], chrono::Utc::now());

    let summary = ingest::dry_run_summary(&catalog, &log);
    assert!(summary.starts_with("dry-run: would write 1 products and 1 collections\n"));
    assert!(summary.contains("  kawaii (kawaii): 1 products\n"));
    assert!(summary.ends_with("new products: [7]\n"));
}
