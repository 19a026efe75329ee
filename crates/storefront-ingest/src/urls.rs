//! Listing URL canonicalization and listing-id recovery.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static LISTING_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/listing/(\d+)").expect("valid listing id regex"));

/// Canonical form of a listing URL: query string and fragment removed, and a
/// trailing slash on a non-root path dropped.
///
/// Tracking parameters (`?ref=...`) vary between two scrapes of the same card,
/// so the canonical form is what identifies a listing. Inputs that do not
/// parse as absolute URLs are cut at the first `?` or `#` instead.
#[must_use]
pub fn canonicalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(mut url) = Url::parse(trimmed) else {
        return strip_query(trimmed).to_string();
    };

    url.set_fragment(None);
    url.set_query(None);

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    url.to_string()
}

fn strip_query(raw: &str) -> &str {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let cut = &raw[..end];
    if cut.len() > 1 {
        cut.trim_end_matches('/')
    } else {
        cut
    }
}

/// Extracts the numeric id from a `.../listing/{id}/...` URL.
#[must_use]
pub fn recover_listing_id(url: &str) -> Option<String> {
    LISTING_ID_RE
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}
