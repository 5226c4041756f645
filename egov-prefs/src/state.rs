//! Preference state and its storage encoding
use crate::catalog::TranslationCatalog;
use crate::config::ResetScope;
use crate::error::PrefsError;
use crate::font::FontScale;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user's display preferences for the current page session.
///
/// Encoded in storage as
/// `{"fontSize": 100, "highContrast": false, "darkMode": false, "language": "en"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceState {
    pub font_size: FontScale,
    pub high_contrast: bool,
    pub dark_mode: bool,
    pub language: String,
}

impl Default for PreferenceState {
    fn default() -> Self {
        Self::with_language(crate::catalog::DEFAULT_LOCALE)
    }
}

impl PreferenceState {
    /// Default display settings in the given language.
    #[must_use]
    pub fn with_language(language: &str) -> Self {
        Self {
            font_size: FontScale::DEFAULT,
            high_contrast: false,
            dark_mode: false,
            language: language.to_string(),
        }
    }

    /// Shallow-merge a stored JSON object over `self`.
    ///
    /// Fields missing from `json` keep their current values and unknown fields
    /// are ignored. Each known field is decoded on its own, so a field of the
    /// wrong type keeps its current value without losing the others.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` does not parse or is not a JSON object.
    pub fn merged_with(&self, json: &str) -> Result<Self, PrefsError> {
        let Value::Object(stored) = serde_json::from_str::<Value>(json)? else {
            return Err(PrefsError::NotAnObject);
        };
        let mut merged = self.clone();
        merge_field(&stored, "fontSize", &mut merged.font_size);
        merge_field(&stored, "highContrast", &mut merged.high_contrast);
        merge_field(&stored, "darkMode", &mut merged.dark_mode);
        merge_field(&stored, "language", &mut merged.language);
        Ok(merged)
    }

    /// Encode for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, PrefsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Replace an unsupported language with the catalog's default.
    #[must_use]
    pub fn normalized(mut self, catalog: &TranslationCatalog) -> Self {
        if !catalog.contains(&self.language) {
            log::debug!(
                "unsupported language `{}`, using `{}`",
                self.language,
                catalog.default_locale()
            );
            self.language = catalog.resolve_locale(&self.language).to_string();
        }
        self
    }

    /// Return display settings to their defaults according to `scope`.
    /// The language is never reset.
    pub fn reset_display(&mut self, scope: ResetScope) {
        self.font_size = FontScale::DEFAULT;
        if scope == ResetScope::Display {
            self.high_contrast = false;
            self.dark_mode = false;
        }
    }
}

fn merge_field<T: DeserializeOwned>(stored: &Map<String, Value>, field: &str, slot: &mut T) {
    let Some(value) = stored.get(field) else {
        return;
    };
    match T::deserialize(value) {
        Ok(decoded) => *slot = decoded,
        Err(err) => log::warn!("ignoring stored `{field}`: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overrides_only_present_fields() {
        let base = PreferenceState::default();
        let merged = base.merged_with(r#"{"darkMode": true, "extra": 1}"#).unwrap();
        assert!(merged.dark_mode);
        assert_eq!(merged.font_size, FontScale::DEFAULT);
        assert_eq!(merged.language, "en");
    }

    #[test]
    fn merge_rejects_non_objects_and_unparsable_text() {
        let base = PreferenceState::default();
        assert!(matches!(
            base.merged_with("[1, 2]"),
            Err(PrefsError::NotAnObject)
        ));
        assert!(matches!(
            base.merged_with("{not json"),
            Err(PrefsError::Json(_))
        ));
    }

    #[test]
    fn wrong_typed_field_keeps_the_rest_of_the_document() {
        let merged = PreferenceState::default()
            .merged_with(r#"{"fontSize": 130, "highContrast": "true", "language": "hi"}"#)
            .unwrap();
        assert_eq!(merged.font_size.percent(), 130);
        assert!(!merged.high_contrast);
        assert_eq!(merged.language, "hi");

        let nulls = PreferenceState::with_language("or")
            .merged_with(r#"{"fontSize": null, "darkMode": true, "language": 7}"#)
            .unwrap();
        assert_eq!(nulls.font_size, FontScale::DEFAULT);
        assert!(nulls.dark_mode);
        assert_eq!(nulls.language, "or");
    }

    #[test]
    fn stored_font_sizes_are_clamped() {
        let merged = PreferenceState::default()
            .merged_with(r#"{"fontSize": 400}"#)
            .unwrap();
        assert_eq!(merged.font_size, FontScale::MAX);
    }

    #[test]
    fn encoding_uses_storage_field_names() {
        let json = PreferenceState::with_language("hi").to_json().unwrap();
        assert_eq!(
            json,
            r#"{"fontSize":100,"highContrast":false,"darkMode":false,"language":"hi"}"#
        );
    }

    #[test]
    fn reset_scope_controls_theme_flags() {
        let mut state = PreferenceState {
            font_size: FontScale::MAX,
            high_contrast: true,
            dark_mode: true,
            language: "or".into(),
        };
        state.reset_display(ResetScope::FontOnly);
        assert_eq!(state.font_size, FontScale::DEFAULT);
        assert!(state.high_contrast && state.dark_mode);

        state.reset_display(ResetScope::Display);
        assert!(!state.high_contrast && !state.dark_mode);
        assert_eq!(state.language, "or");
    }

    #[test]
    fn normalization_falls_back_silently() {
        let catalog = TranslationCatalog::embedded();
        let state = PreferenceState::with_language("klingon").normalized(catalog);
        assert_eq!(state.language, "en");
        let kept = PreferenceState::with_language("hi").normalized(catalog);
        assert_eq!(kept.language, "hi");
    }
}
