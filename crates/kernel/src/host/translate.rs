//! Label translation for default content.

use std::collections::HashMap;

/// Translates user-facing strings within a text domain.
pub trait Translator {
    /// Translate `text` in `domain`, returning the original when no
    /// translation exists.
    fn translate(&self, text: &str, domain: &str) -> String;
}

/// Translator that returns every string unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _domain: &str) -> String {
        text.to_string()
    }
}

/// Map-backed translator keyed by `(domain, source text)`.
#[derive(Debug, Default, Clone)]
pub struct CatalogTranslator {
    entries: HashMap<(String, String), String>,
}

impl CatalogTranslator {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation, replacing any existing one.
    pub fn insert(&mut self, domain: &str, source: &str, translated: &str) {
        self.entries.insert(
            (domain.to_string(), source.to_string()),
            translated.to_string(),
        );
    }

    /// Build a catalog for one domain from a JSON object of
    /// `{"source": "translation"}` pairs.
    pub fn from_json(domain: &str, json: &str) -> serde_json::Result<Self> {
        let pairs: HashMap<String, String> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (source, translated) in pairs {
            catalog.insert(domain, &source, &translated);
        }
        Ok(catalog)
    }

    /// Number of translations in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, text: &str, domain: &str) -> String {
        self.entries
            .get(&(domain.to_string(), text.to_string()))
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
