//! Keyword-based collection tagging.

use storefront_core::KeywordTable;

/// Returns the labels whose keywords occur in the product's title or tags,
/// in keyword-table order.
///
/// Matching is a case-insensitive substring test over the title and tags
/// joined by newlines, so a keyword never matches across two tags. An empty
/// result is valid: the product is then only listed under "all products".
#[must_use]
pub fn classify(table: &KeywordTable, title: &str, tags: &[String]) -> Vec<String> {
    let haystack = search_text(title, tags);
    table
        .rules()
        .iter()
        .filter(|rule| rule.keywords.iter().any(|kw| haystack.contains(kw.as_str())))
        .map(|rule| rule.name.clone())
        .collect()
}

fn search_text(title: &str, tags: &[String]) -> String {
    let mut text = title.to_lowercase();
    for tag in tags {
        text.push('\n');
        text.push_str(&tag.to_lowercase());
    }
    text
}
