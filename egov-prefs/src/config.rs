//! Preference manager configuration
use crate::binding::{ControlRole, ControlSelector, default_selectors};
use crate::catalog::DEFAULT_LOCALE;
use serde::{Deserialize, Serialize};

/// Storage key holding the JSON-encoded preference state.
pub const STORAGE_KEY: &str = "accessibility_settings";
/// Older pages stored only the theme, as `"dark"` or `"light"`, under this key.
pub const LEGACY_THEME_KEY: &str = "data-theme";
/// Attribute marking an element for translation; its value is the key.
pub const TRANSLATION_MARKER: &str = "data-i18n";

/// What the reset control clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetScope {
    /// Only the font scale returns to 100%.
    FontOnly,
    /// Font scale, high contrast and dark mode all return to their defaults.
    #[default]
    Display,
}

/// Configuration for a [`crate::PreferenceManager`].
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefsConfig {
    pub storage_key: String,
    pub legacy_theme_key: Option<String>,
    pub default_language: String,
    pub reset_scope: ResetScope,
    pub translation_marker: String,
    pub controls: Vec<ControlSelector>,
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl PrefsConfig {
    /// Settings matching the portal templates.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            legacy_theme_key: Some(LEGACY_THEME_KEY.to_string()),
            default_language: DEFAULT_LOCALE.to_string(),
            reset_scope: ResetScope::default(),
            translation_marker: TRANSLATION_MARKER.to_string(),
            controls: default_selectors(),
        }
    }

    /// Parse a configuration document, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Selector configured for `role`, if any.
    #[must_use]
    pub fn selector(&self, role: ControlRole) -> Option<&ControlSelector> {
        self.controls.iter().find(|selector| selector.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PrefsConfig::from_json(r#"{"reset_scope": "font_only"}"#).unwrap();
        assert_eq!(config.reset_scope, ResetScope::FontOnly);
        assert_eq!(config.storage_key, STORAGE_KEY);
        assert_eq!(config.legacy_theme_key.as_deref(), Some(LEGACY_THEME_KEY));
        assert!(config.selector(ControlRole::LanguageSelect).is_some());
    }

    #[test]
    fn legacy_key_can_be_disabled() {
        let config = PrefsConfig::from_json(r#"{"legacy_theme_key": null}"#).unwrap();
        assert_eq!(config.legacy_theme_key, None);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(PrefsConfig::from_json(r#"{"reset_scope": 3}"#).is_err());
    }
}
