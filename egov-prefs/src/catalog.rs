//! Embedded translation catalog

use crate::error::CatalogError;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Locale used when a stored or requested code is unknown.
pub const DEFAULT_LOCALE: &str = "en";

const EMBEDDED_TRANSLATIONS: &str = include_str!("../i18n/translations.json");

static EMBEDDED: Lazy<TranslationCatalog> = Lazy::new(|| {
    TranslationCatalog::from_json(EMBEDDED_TRANSLATIONS, DEFAULT_LOCALE).unwrap_or_else(|err| {
        log::error!("embedded translations failed to load: {err}");
        TranslationCatalog::empty(DEFAULT_LOCALE)
    })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta<'a> {
    pub code: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct LocaleStrings {
    name: String,
    #[serde(default)]
    strings: BTreeMap<String, String>,
}

/// Display strings for every supported locale, keyed by locale code and then
/// by translation key.
///
/// Keys are flat: `card.apply.desc` is a single key, not a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCatalog {
    default_locale: String,
    locales: BTreeMap<String, LocaleStrings>,
}

impl TranslationCatalog {
    /// Parse a translation resource of the form
    /// `{"en": {"name": "English", "strings": {"home": "Home"}}}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or `default_locale` is absent.
    pub fn from_json(json: &str, default_locale: &str) -> Result<Self, CatalogError> {
        let locales: BTreeMap<String, LocaleStrings> = serde_json::from_str(json)?;
        if !locales.contains_key(default_locale) {
            return Err(CatalogError::MissingDefault(default_locale.to_string()));
        }
        Ok(Self {
            default_locale: default_locale.to_string(),
            locales,
        })
    }

    /// The translations bundled with the crate (`en`, `hi`, `or`).
    #[must_use]
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    fn empty(default_locale: &str) -> Self {
        Self {
            default_locale: default_locale.to_string(),
            locales: BTreeMap::new(),
        }
    }

    /// Locale that unknown codes resolve to.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Whether `code` is a supported locale.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.locales.contains_key(code)
    }

    /// Map an arbitrary code onto a supported one, falling back to the default.
    #[must_use]
    pub fn resolve_locale<'a>(&'a self, code: &'a str) -> &'a str {
        if self.contains(code) {
            code
        } else {
            &self.default_locale
        }
    }

    /// Translation of `key` in `code`. Empty strings count as missing.
    #[must_use]
    pub fn lookup(&self, code: &str, key: &str) -> Option<&str> {
        self.locales
            .get(code)
            .and_then(|locale| locale.strings.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Supported locales with their native names, ordered by code.
    pub fn locales(&self) -> impl Iterator<Item = LocaleMeta<'_>> {
        self.locales.iter().map(|(code, locale)| LocaleMeta {
            code,
            name: &locale.name,
        })
    }
}
