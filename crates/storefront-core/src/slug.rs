//! URL-safe identifiers derived from free text.
//!
//! A slug is a run of `[a-z0-9]+` tokens joined by single hyphens. Both
//! product pages and collection pages are addressed by slug, so the same
//! routine serves [`crate::Product`] titles and [`crate::CollectionRule`]
//! names.

/// Lower-cases `text` and replaces every maximal run of characters outside
/// `[a-z0-9]` with a single hyphen, trimming hyphens from both ends.
///
/// Returns an empty string when `text` has no ASCII alphanumerics.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Slug for a listing's page: [`slugify`] of the title, or
/// `listing-{listing_id}` when the title yields nothing. Never empty.
#[must_use]
pub fn listing_slug(title: &str, listing_id: &str) -> String {
    let slug = slugify(title);
    if !slug.is_empty() {
        return slug;
    }
    let id = slugify(listing_id);
    if id.is_empty() {
        "listing".to_string()
    } else {
        format!("listing-{id}")
    }
}

/// `true` when `s` is a well-formed slug: `^[a-z0-9]+(-[a-z0-9]+)*$`.
#[must_use]
pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|token| {
            !token.is_empty()
                && token
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}
