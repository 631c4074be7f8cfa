//! Translation catalog seam.
//!
//! The normalizer never owns user-facing copy for identifier outcomes. It asks
//! a [`TranslationCatalog`] for display text by stable key and treats whatever
//! comes back as opaque. Loading, locale selection and fallback language all
//! belong to the catalog implementation.
//!
//! Any `Fn(&str) -> String` is a catalog, which keeps tests and thin
//! integrations free of boilerplate:
//!
//! ```rust
//! use friendly_errors::TranslationCatalog;
//!
//! let catalog = |key: &str| format!("<{key}>");
//! assert_eq!(catalog.lookup("error.failureReasonTimeout"), "<error.failureReasonTimeout>");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

/// Point lookup from translation key to display text.
///
/// Implementations must be cheap and side-effect free; the normalizer may call
/// `lookup` twice per normalization (base text plus one augmentation).
pub trait TranslationCatalog {
    /// Display text for `key`. Absent keys follow the implementation's own
    /// fallback policy.
    fn lookup(&self, key: &str) -> Cow<'_, str>;
}

impl<F> TranslationCatalog for F
where
    F: Fn(&str) -> String,
{
    #[inline]
    fn lookup(&self, key: &str) -> Cow<'_, str> {
        Cow::Owned(self(key))
    }
}

/// In-memory catalog backed by a map.
///
/// Missing keys resolve to the key itself, which is how most string tables
/// surface gaps in development builds.
#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    entries: HashMap<Cow<'static, str>, Cow<'static, str>>,
}

impl MapCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a translation.
    pub fn with(
        mut self,
        key: impl Into<Cow<'static, str>>,
        text: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.insert(key, text);
        self
    }

    /// Add or replace a translation in place.
    pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, text: impl Into<Cow<'static, str>>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Number of translations held.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no translations are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapCatalog
where
    K: Into<Cow<'static, str>>,
    V: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl TranslationCatalog for MapCatalog {
    fn lookup(&self, key: &str) -> Cow<'_, str> {
        match self.entries.get(key) {
            Some(text) => Cow::Borrowed(text.as_ref()),
            None => Cow::Owned(key.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_catalog_returns_borrowed_hit() {
        let catalog = MapCatalog::new().with("greeting", "Hello");
        let text = catalog.lookup("greeting");
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "Hello");
    }

    #[test]
    fn map_catalog_falls_back_to_key() {
        let catalog = MapCatalog::new();
        assert_eq!(catalog.lookup("error.unknown"), "error.unknown");
    }

    #[test]
    fn closures_are_catalogs() {
        let catalog = |key: &str| key.to_uppercase();
        assert_eq!(catalog.lookup("abc"), "ABC");
    }

    #[test]
    fn map_catalog_collects_from_pairs() {
        let catalog: MapCatalog = [("a", "b"), ("c", "d")].into_iter().collect();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("c"), "d");
    }
}
