//! Preference manager
//!
//! Owns the preference state for one page session. Every mutation follows the
//! same sequence: update the state, persist it, then re-project the affected
//! part onto the page, fanning out to every bound instance of the control so
//! desktop and mobile copies never disagree.

use crate::binding::{BindingList, ControlAction, ControlRole};
use crate::catalog::TranslationCatalog;
use crate::config::PrefsConfig;
use crate::error::PrefsError;
use crate::state::PreferenceState;
use crate::surface::{IconKind, TextSlot};
use crate::{PageSurface, PreferenceStore};

const DARK_CLASS: &str = "dark";
const HIGH_CONTRAST_CLASS: &str = "high-contrast";
const THEME_ATTRIBUTE: &str = "data-bs-theme";
const LANG_ATTRIBUTE: &str = "lang";

pub struct PreferenceManager<S, P>
where
    S: PreferenceStore,
    P: PageSurface,
{
    state: PreferenceState,
    config: PrefsConfig,
    catalog: TranslationCatalog,
    store: S,
    page: P,
    bindings: BindingList<P::Handle>,
}

impl<S, P> PreferenceManager<S, P>
where
    S: PreferenceStore,
    P: PageSurface,
{
    /// Create a manager and resolve its control bindings against `page`.
    ///
    /// The state starts at the defaults; call [`Self::init`] (or
    /// [`Self::load`] and [`Self::apply`]) to restore and project it.
    pub fn new(config: PrefsConfig, catalog: TranslationCatalog, store: S, page: P) -> Self {
        let bindings = BindingList::build(&page, &config.controls);
        let state =
            PreferenceState::with_language(catalog.resolve_locale(&config.default_language));
        Self {
            state,
            config,
            catalog,
            store,
            page,
            bindings,
        }
    }

    /// Manager using the default configuration and the embedded translations.
    pub fn with_defaults(store: S, page: P) -> Self {
        Self::new(
            PrefsConfig::default_config(),
            TranslationCatalog::embedded().clone(),
            store,
            page,
        )
    }

    /// Restore the stored state and project it onto the page.
    pub fn init(&mut self) {
        self.load();
        self.apply();
        log::debug!("preferences initialised: {:?}", self.state);
    }

    /// The current preferences.
    #[must_use]
    pub const fn state(&self) -> &PreferenceState {
        &self.state
    }

    /// Controls resolved on the page at construction, grouped by role.
    #[must_use]
    pub const fn bindings(&self) -> &BindingList<P::Handle> {
        &self.bindings
    }

    /// The page this manager projects onto.
    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Translation of `key` in the active language.
    #[must_use]
    pub fn translate(&self, key: &str) -> Option<&str> {
        self.catalog.lookup(&self.state.language, key)
    }

    fn defaults(&self) -> PreferenceState {
        PreferenceState::with_language(self.catalog.resolve_locale(&self.config.default_language))
    }

    /// Replace the state with what storage holds, merged over the defaults.
    ///
    /// Without a stored state the dark-mode flag is seeded from the legacy
    /// theme key, or failing that from the OS colour-scheme preference.
    /// Malformed stored data is ignored and the defaults are used as-is.
    pub fn load(&mut self) {
        let defaults = self.defaults();
        self.state = match self.read_stored(&defaults) {
            Ok(Some(stored)) => stored.normalized(&self.catalog),
            Ok(None) => self.seeded(defaults),
            Err(err @ PrefsError::Storage(_)) => {
                log::warn!("preferences unreadable, using defaults: {err}");
                self.seeded(defaults)
            }
            Err(err) => {
                log::warn!("ignoring malformed stored preferences: {err}");
                defaults
            }
        };
    }

    fn seeded(&self, mut defaults: PreferenceState) -> PreferenceState {
        defaults.dark_mode = self
            .legacy_dark_mode()
            .unwrap_or_else(|| self.page.prefers_dark_scheme());
        defaults
    }

    fn read_stored(&self, defaults: &PreferenceState) -> Result<Option<PreferenceState>, PrefsError> {
        let Some(raw) = self.read_item(&self.config.storage_key)? else {
            return Ok(None);
        };
        defaults.merged_with(&raw).map(Some)
    }

    fn legacy_dark_mode(&self) -> Option<bool> {
        let key = self.config.legacy_theme_key.as_deref()?;
        match self.read_item(key) {
            Ok(value) => value.map(|theme| theme == "dark"),
            Err(err) => {
                log::warn!("legacy theme unreadable: {err}");
                None
            }
        }
    }

    fn read_item(&self, key: &str) -> Result<Option<String>, PrefsError> {
        self.store
            .get_item(key)
            .map_err(|err| PrefsError::Storage(err.to_string()))
    }

    fn write_item(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.store
            .set_item(key, value)
            .map_err(|err| PrefsError::Storage(err.to_string()))
    }

    /// Persist the current state. Failures are logged and otherwise ignored.
    pub fn save(&self) {
        if let Err(err) = self.write_stored() {
            log::warn!("preferences not saved: {err}");
        }
    }

    fn write_stored(&self) -> Result<(), PrefsError> {
        let json = self.state.to_json()?;
        self.write_item(&self.config.storage_key, &json)?;
        if let Some(key) = self.config.legacy_theme_key.as_deref() {
            let theme = if self.state.dark_mode { "dark" } else { "light" };
            self.write_item(key, theme)?;
        }
        Ok(())
    }

    /// Project the whole state onto the page. Idempotent.
    pub fn apply(&self) {
        self.apply_font_size();
        self.apply_theme();
        self.apply_language();
    }

    /// Scale the root font and refresh every text-size display.
    pub fn apply_font_size(&self) {
        let css = self.state.font_size.css_value();
        self.page.set_root_font_size(&css);
        for display in self.bindings.handles(ControlRole::TextSizeDisplay) {
            self.page.set_text(display, &css);
        }
    }

    /// Project dark mode and high contrast onto the root element, the theme
    /// toggles and the theme icons.
    pub fn apply_theme(&self) {
        let dark = self.state.dark_mode;
        let high_contrast = self.state.high_contrast;

        self.page.set_root_class(DARK_CLASS, dark);
        self.page
            .set_root_attribute(THEME_ATTRIBUTE, if dark { "dark" } else { "light" });
        self.page.set_root_class(HIGH_CONTRAST_CLASS, high_contrast);

        for toggle in self.bindings.handles(ControlRole::DarkModeToggle) {
            self.page.set_checked(toggle, dark);
        }
        for toggle in self.bindings.handles(ControlRole::HighContrastToggle) {
            self.page.set_checked(toggle, high_contrast);
        }
        for icon in self.bindings.handles(ControlRole::ThemeIcon) {
            match self.page.icon_kind(icon) {
                IconKind::ClassName => {
                    let class = if dark { "bi bi-sun-fill" } else { "bi bi-moon-fill" };
                    self.page.set_class_name(icon, class);
                }
                IconKind::Ligature => {
                    let glyph = if dark { "light_mode" } else { "dark_mode" };
                    self.page.set_text(icon, glyph);
                }
                IconKind::Other => {}
            }
        }
    }

    /// Re-render every marked element in the active language. Elements whose
    /// key has no translation keep their current content.
    pub fn apply_language(&self) {
        let language = self.state.language.as_str();
        self.page.set_root_attribute(LANG_ATTRIBUTE, language);

        for element in self.page.translatable(&self.config.translation_marker) {
            let Some(text) = self.catalog.lookup(language, &element.key) else {
                continue;
            };
            match element.slot {
                TextSlot::Content => self.page.set_text(&element.handle, text),
                TextSlot::Placeholder => self.page.set_placeholder(&element.handle, text),
            }
        }
        self.mirror_language_selects();
    }

    fn mirror_language_selects(&self) {
        for select in self.bindings.handles(ControlRole::LanguageSelect) {
            self.page.set_value(select, &self.state.language);
        }
    }

    /// Grow the font one step. Returns `false` (and does nothing) at the maximum.
    pub fn increase_font(&mut self) -> bool {
        let Some(next) = self.state.font_size.checked_increase() else {
            return false;
        };
        self.state.font_size = next;
        self.save();
        self.apply_font_size();
        true
    }

    /// Shrink the font one step. Returns `false` (and does nothing) at the minimum.
    pub fn decrease_font(&mut self) -> bool {
        let Some(next) = self.state.font_size.checked_decrease() else {
            return false;
        };
        self.state.font_size = next;
        self.save();
        self.apply_font_size();
        true
    }

    /// Return the font to 100%, and with [`crate::ResetScope::Display`] also
    /// clear high contrast and dark mode.
    pub fn reset_font(&mut self) {
        self.state.reset_display(self.config.reset_scope);
        self.save();
        self.apply_font_size();
        self.apply_theme();
    }

    /// Flip high contrast, persist it and restyle the page.
    pub fn toggle_high_contrast(&mut self) {
        self.set_high_contrast(!self.state.high_contrast);
    }

    /// Flip dark mode, persist it and restyle the page.
    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.state.dark_mode);
    }

    /// Set high contrast to the value a checkbox reported.
    pub fn set_high_contrast(&mut self, enabled: bool) {
        self.state.high_contrast = enabled;
        self.save();
        self.apply_theme();
    }

    /// Set dark mode to the value a checkbox reported.
    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.state.dark_mode = enabled;
        self.save();
        self.apply_theme();
    }

    /// Switch the UI language. Unknown codes are ignored and `false` is
    /// returned; the selectors are put back on the current language.
    pub fn set_language(&mut self, code: &str) -> bool {
        if !self.catalog.contains(code) {
            log::debug!("ignoring unsupported language `{code}`");
            self.mirror_language_selects();
            return false;
        }
        self.state.language = code.to_string();
        self.save();
        self.apply_language();
        true
    }

    /// Perform the action a bound control asked for.
    pub fn dispatch(&mut self, action: ControlAction) {
        match action {
            ControlAction::IncreaseFont => {
                self.increase_font();
            }
            ControlAction::DecreaseFont => {
                self.decrease_font();
            }
            ControlAction::ResetFont => self.reset_font(),
            ControlAction::ToggleDarkMode => self.toggle_dark_mode(),
            ControlAction::ToggleHighContrast => self.toggle_high_contrast(),
            ControlAction::SetDarkMode(enabled) => self.set_dark_mode(enabled),
            ControlAction::SetHighContrast(enabled) => self.set_high_contrast(enabled),
            ControlAction::SetLanguage(code) => {
                self.set_language(&code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STORAGE_KEY;
    use crate::font::FontScale;
    use crate::storage::MemoryStore;
    use crate::surface::{MemoryElement, MemoryPage};
    use std::fmt;

    #[derive(Debug)]
    struct Unavailable;

    impl fmt::Display for Unavailable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("storage disabled")
        }
    }

    impl std::error::Error for Unavailable {}

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        type Error = Unavailable;

        fn get_item(&self, _key: &str) -> Result<Option<String>, Self::Error> {
            Err(Unavailable)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
            Err(Unavailable)
        }
    }

    #[test]
    fn font_steps_are_noops_at_bounds() {
        let store = MemoryStore::new();
        let mut manager = PreferenceManager::with_defaults(store.clone(), MemoryPage::new());
        for _ in 0..5 {
            assert!(manager.increase_font());
        }
        assert!(!manager.increase_font());
        assert_eq!(manager.state().font_size, FontScale::MAX);
        assert_eq!(manager.page().root_font_size().as_deref(), Some("150%"));

        let saved = store.item(STORAGE_KEY).expect("saved");
        assert!(saved.contains("\"fontSize\":150"));
    }

    #[test]
    fn unavailable_storage_still_applies_and_seeds_from_os() {
        let page = MemoryPage::new().with_dark_preference(true);
        let mut manager = PreferenceManager::with_defaults(BrokenStore, page);
        manager.init();
        assert!(manager.state().dark_mode);

        manager.toggle_high_contrast();
        assert!(manager.state().high_contrast);
        assert!(manager.page().root_has_class("high-contrast"));
    }

    #[test]
    fn theme_icons_follow_their_markup() {
        let page = MemoryPage::new();
        let ligature = page.add(
            MemoryElement::new("span")
                .with_id("themeIcon")
                .with_class("material-symbols-outlined"),
        );
        let bootstrap = page.add(MemoryElement::new("i").with_class("theme-icon"));
        let plain = page.add(
            MemoryElement::new("span")
                .with_id("theme-icon")
                .with_text("Theme"),
        );
        let mut manager = PreferenceManager::with_defaults(MemoryStore::new(), page.clone());

        manager.set_dark_mode(true);
        assert_eq!(page.element(ligature).text, "light_mode");
        assert!(page.element(bootstrap).classes.contains("bi-sun-fill"));

        manager.set_dark_mode(false);
        assert_eq!(page.element(ligature).text, "dark_mode");
        assert!(page.element(bootstrap).classes.contains("bi-moon-fill"));
        assert_eq!(page.element(plain).text, "Theme", "plain icons keep their markup");
    }

    #[test]
    fn dispatch_routes_control_actions() {
        let mut manager = PreferenceManager::with_defaults(MemoryStore::new(), MemoryPage::new());
        manager.dispatch(ControlAction::DecreaseFont);
        manager.dispatch(ControlAction::SetLanguage("or".into()));
        manager.dispatch(ControlAction::ToggleDarkMode);
        manager.dispatch(ControlAction::SetHighContrast(true));

        let state = manager.state();
        assert_eq!(state.font_size.percent(), 90);
        assert_eq!(state.language, "or");
        assert!(state.dark_mode && state.high_contrast);
        assert_eq!(manager.translate("home"), Some("ମୂଳ ପୃଷ୍ଠା"));
    }
}
