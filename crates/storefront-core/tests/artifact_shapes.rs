//! Checks the on-disk shapes shared with the extraction and rendering
//! collaborators: the keyword table file, the detail map entries, and the
//! product and collection records.

use std::path::PathBuf;

use storefront_core::{
    load_keyword_table, Collection, ConfigError, DetailFields, Enrichment, Product,
};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("storefront-core-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn keyword_table_loads_from_disk() {
    let path = temp_file(
        "table.yaml",
        "collections:\n  - name: Sea Life\n    keywords: [Whale, ' octopus ']\n",
    );
    let table = load_keyword_table(&path).unwrap();
    assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Sea Life"]);
    assert_eq!(table.rules()[0].keywords, vec!["whale", "octopus"]);
    assert_eq!(table.rules()[0].slug(), "sea-life");
}

#[test]
fn keyword_table_with_duplicate_labels_is_rejected() {
    let path = temp_file(
        "dupes.yaml",
        "collections:\n  - name: cats\n    keywords: [cat]\n  - name: Cats\n    keywords: [kitten]\n",
    );
    let err = load_keyword_table(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn enrichment_status_tag_round_trips() {
    let fetched: Enrichment = serde_json::from_str(
        r#"{"status": "fetched", "images": ["a.jpg"], "metaDescription": "Short"}"#,
    )
    .unwrap();
    assert_eq!(
        fetched,
        Enrichment::Fetched(DetailFields {
            raw_description_markup: None,
            images: vec!["a.jpg".to_string()],
            tags: Vec::new(),
            meta_description: Some("Short".to_string()),
        })
    );

    let failed = serde_json::to_value(Enrichment::Failed {
        reason: "timeout".to_string(),
    })
    .unwrap();
    assert_eq!(
        failed,
        serde_json::json!({"status": "failed", "reason": "timeout"})
    );
}

#[test]
fn product_record_uses_renderer_field_names() {
    let product: Product = serde_json::from_value(serde_json::json!({
        "listingId": "9",
        "title": "Cute Cat",
        "slug": "cute-cat",
        "price": "$2.00",
        "priceAmount": "2.00",
        "primaryImage": "a.jpg",
        "shareLink": "https://www.etsy.com/listing/9"
    }))
    .unwrap();
    assert!(product.images.is_empty());
    assert!(product.meta_description.is_none());

    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(value["priceAmount"], "2.00");
    assert!(value.get("metaDescription").is_none());
}

#[test]
fn collection_record_reports_its_member_count() {
    let collection = Collection::new("Sea Life", "sea-life", vec!["1".into(), "2".into()]);
    let value = serde_json::to_value(&collection).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Sea Life",
            "slug": "sea-life",
            "listingIds": ["1", "2"],
            "productCount": 2
        })
    );
}
