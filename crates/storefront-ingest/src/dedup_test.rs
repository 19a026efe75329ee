use super::*;

fn listing(id: &str, url: &str) -> RawListing {
    RawListing {
        title: format!("Listing {id}"),
        listing_id: id.to_string(),
        canonical_url: url.to_string(),
        image_url: String::new(),
        price_text: String::new(),
    }
}

#[test]
fn dedup_keeps_first_of_query_variants() {
    let out = dedup_listings(vec![
        listing("111", "https://www.etsy.com/listing/111?ref=a"),
        listing("111", "https://www.etsy.com/listing/111?ref=b"),
    ]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].canonical_url, "https://www.etsy.com/listing/111?ref=a");
}

#[test]
fn dedup_preserves_first_seen_order() {
    let out = dedup_listings(vec![
        listing("3", "https://www.etsy.com/listing/3"),
        listing("1", "https://www.etsy.com/listing/1"),
        listing("3", "https://www.etsy.com/listing/3?ref=x"),
        listing("2", "https://www.etsy.com/listing/2"),
        listing("1", "https://www.etsy.com/listing/1#top"),
    ]);
    let ids: Vec<&str> = out.iter().map(|l| l.listing_id.as_str()).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[test]
fn dedup_drops_reused_listing_id_under_other_url() {
    let out = dedup_listings(vec![
        listing("7", "https://www.etsy.com/listing/7/kawaii-cats"),
        listing("7", "https://www.etsy.com/listing/7/kawaii-cats-v2"),
    ]);
    assert_eq!(out.len(), 1);
    assert!(out[0].canonical_url.ends_with("kawaii-cats"));
}

#[test]
fn dedup_output_never_longer_than_input() {
    let input = vec![
        listing("1", "https://www.etsy.com/listing/1"),
        listing("2", "https://www.etsy.com/listing/2"),
    ];
    let out = dedup_listings(input.clone());
    assert_eq!(out, input);
}

#[test]
fn dedup_empty_input() {
    assert!(dedup_listings(Vec::new()).is_empty());
}

#[test]
fn deduplicator_counts_admitted() {
    let mut dedup = Deduplicator::new();
    assert!(dedup.is_empty());
    assert!(dedup.admit(&listing("1", "https://www.etsy.com/listing/1")));
    assert!(!dedup.admit(&listing("1", "https://www.etsy.com/listing/1?ref=z")));
    assert_eq!(dedup.len(), 1);
}

#[test]
fn separate_deduplicators_do_not_share_state() {
    let a = dedup_listings(vec![listing("1", "https://www.etsy.com/listing/1")]);
    let b = dedup_listings(vec![listing("1", "https://www.etsy.com/listing/1")]);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
}

#[test]
fn sanitize_recovers_missing_listing_id() {
    let out = sanitize_listings(vec![listing(
        "",
        "https://www.etsy.com/listing/98765/golf-fun?ref=a",
    )]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].listing_id, "98765");
}

#[test]
fn sanitize_drops_unidentifiable_listings() {
    let out = sanitize_listings(vec![
        listing("", "https://www.etsy.com/shop/Example"),
        listing("5", "   "),
        listing(" 6 ", "https://www.etsy.com/listing/6"),
    ]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].listing_id, "6");
}
