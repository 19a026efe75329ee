use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::slug::slugify;
use crate::ConfigError;

/// One collection label and the keywords that place a product in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CollectionRule {
    #[must_use]
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// URL-safe slug for the collection page.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

#[derive(Debug, Deserialize)]
struct CollectionsFile {
    #[serde(default)]
    collections: Vec<CollectionRule>,
}

/// Validated label → keywords table consumed by the collection classifier.
///
/// Rule order is significant: it is the order labels appear on a product.
/// Keywords are stored trimmed and lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    rules: Vec<CollectionRule>,
}

impl KeywordTable {
    /// Builds a table from rules, normalizing keywords and validating labels.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on an empty or duplicate label, a
    /// label with no slug-able characters, or a rule with no usable keywords.
    pub fn from_rules(rules: Vec<CollectionRule>) -> Result<Self, ConfigError> {
        let rules = rules
            .into_iter()
            .map(normalize_rule)
            .collect::<Result<Vec<_>, _>>()?;
        validate_rules(&rules)?;
        Ok(Self { rules })
    }

    #[must_use]
    pub fn rules(&self) -> &[CollectionRule] {
        &self.rules
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parse a keyword table from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_keyword_table(yaml: &str) -> Result<KeywordTable, ConfigError> {
    let file: CollectionsFile = serde_yaml::from_str(yaml)?;
    KeywordTable::from_rules(file.collections)
}

/// Load and validate the keyword table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_keyword_table(path: &Path) -> Result<KeywordTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CollectionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_keyword_table(&content)
}

fn normalize_rule(rule: CollectionRule) -> Result<CollectionRule, ConfigError> {
    let name = rule.name.trim().to_string();
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "collection name must be non-empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut keywords = Vec::with_capacity(rule.keywords.len());
    for keyword in rule.keywords {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(ConfigError::Validation(format!(
                "collection '{name}' has an empty keyword"
            )));
        }
        if seen.insert(keyword.clone()) {
            keywords.push(keyword);
        }
    }

    if keywords.is_empty() {
        return Err(ConfigError::Validation(format!(
            "collection '{name}' must list at least one keyword"
        )));
    }

    Ok(CollectionRule { name, keywords })
}

fn validate_rules(rules: &[CollectionRule]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for rule in rules {
        if !seen_names.insert(rule.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate collection name: '{}'",
                rule.name
            )));
        }

        let slug = rule.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "collection '{}' has no characters usable in a slug",
                rule.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate collection slug: '{}' (from collection '{}')",
                slug, rule.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "collections_test.rs"]
mod tests;
