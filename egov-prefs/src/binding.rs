//! Control bindings
//!
//! A portal page may render the same preference control several times (the
//! desktop toolbar and the mobile drawer each have a language selector, for
//! example). Controls are found once at start-up, either by element id or by a
//! shared marker class, and recorded in a [`BindingList`] that pairs each
//! [`ControlRole`] with every element playing that role.

use crate::PageSurface;
use serde::{Deserialize, Serialize};

/// What a bound element does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlRole {
    IncreaseText,
    DecreaseText,
    ResetText,
    TextSizeDisplay,
    DarkModeToggle,
    HighContrastToggle,
    ThemeButton,
    ThemeIcon,
    LanguageSelect,
}

impl ControlRole {
    pub const ALL: [Self; 9] = [
        Self::IncreaseText,
        Self::DecreaseText,
        Self::ResetText,
        Self::TextSizeDisplay,
        Self::DarkModeToggle,
        Self::HighContrastToggle,
        Self::ThemeButton,
        Self::ThemeIcon,
        Self::LanguageSelect,
    ];

    /// DOM event the control reports through, or `None` for display-only roles.
    #[must_use]
    pub const fn event_name(self) -> Option<&'static str> {
        match self {
            Self::IncreaseText | Self::DecreaseText | Self::ResetText | Self::ThemeButton => {
                Some("click")
            }
            Self::DarkModeToggle | Self::HighContrastToggle | Self::LanguageSelect => {
                Some("change")
            }
            Self::TextSizeDisplay | Self::ThemeIcon => None,
        }
    }

    /// Translate a raw control event into a manager action.
    ///
    /// Returns `None` when the input does not fit the role (a checkbox role
    /// receiving a select value, a display role receiving anything).
    #[must_use]
    pub fn action(self, input: ControlInput) -> Option<ControlAction> {
        match (self, input) {
            (Self::IncreaseText, ControlInput::Click) => Some(ControlAction::IncreaseFont),
            (Self::DecreaseText, ControlInput::Click) => Some(ControlAction::DecreaseFont),
            (Self::ResetText, ControlInput::Click) => Some(ControlAction::ResetFont),
            (Self::ThemeButton, ControlInput::Click) => Some(ControlAction::ToggleDarkMode),
            (Self::DarkModeToggle, ControlInput::Checked(on)) => Some(ControlAction::SetDarkMode(on)),
            (Self::HighContrastToggle, ControlInput::Checked(on)) => {
                Some(ControlAction::SetHighContrast(on))
            }
            (Self::LanguageSelect, ControlInput::Value(code)) => {
                Some(ControlAction::SetLanguage(code))
            }
            _ => None,
        }
    }
}

/// Raw state read from a control when its event fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlInput {
    Click,
    Checked(bool),
    Value(String),
}

/// A preference mutation requested by a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    IncreaseFont,
    DecreaseFont,
    ResetFont,
    ToggleDarkMode,
    ToggleHighContrast,
    SetDarkMode(bool),
    SetHighContrast(bool),
    SetLanguage(String),
}

/// Where to find the elements playing one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSelector {
    pub role: ControlRole,
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ControlSelector {
    /// Selector for `role` matching any of `ids` or `classes`.
    #[must_use]
    pub fn new(role: ControlRole, ids: &[&str], classes: &[&str]) -> Self {
        Self {
            role,
            ids: ids.iter().map(|id| (*id).to_string()).collect(),
            classes: classes.iter().map(|class| (*class).to_string()).collect(),
        }
    }
}

/// Ids and classes used by the portal templates.
#[must_use]
pub fn default_selectors() -> Vec<ControlSelector> {
    use ControlRole::{
        DarkModeToggle, DecreaseText, HighContrastToggle, IncreaseText, LanguageSelect, ResetText,
        TextSizeDisplay, ThemeButton, ThemeIcon,
    };
    vec![
        ControlSelector::new(
            IncreaseText,
            &["btn-increase-text", "btn-increase-text-mobile"],
            &["btn-increase-text", "btn-increase-text-mobile"],
        ),
        ControlSelector::new(
            DecreaseText,
            &["btn-decrease-text", "btn-decrease-text-mobile"],
            &["btn-decrease-text", "btn-decrease-text-mobile"],
        ),
        ControlSelector::new(ResetText, &["btn-reset-text"], &["btn-reset-text"]),
        ControlSelector::new(
            TextSizeDisplay,
            &["text-size-display", "text-size-display-mobile"],
            &["text-size-display"],
        ),
        ControlSelector::new(
            DarkModeToggle,
            &["cb-dark-mode", "cb-dark-mode-mobile"],
            &["cb-dark-mode", "theme-toggle-cb"],
        ),
        ControlSelector::new(
            HighContrastToggle,
            &["cb-high-contrast", "cb-high-contrast-mobile"],
            &["cb-high-contrast"],
        ),
        ControlSelector::new(ThemeButton, &["theme-toggle", "themeToggle"], &["theme-toggle"]),
        ControlSelector::new(ThemeIcon, &["themeIcon", "theme-icon"], &["theme-icon"]),
        ControlSelector::new(
            LanguageSelect,
            &["language-select", "language-select-mobile"],
            &["language-select"],
        ),
    ]
}

/// One role and every element found for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<H> {
    pub role: ControlRole,
    pub handles: Vec<H>,
}

/// Controls found on the page, grouped by role.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingList<H> {
    entries: Vec<Binding<H>>,
}

impl<H> Default for BindingList<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H: Clone + PartialEq> BindingList<H> {
    /// Resolve `selectors` against `page`.
    ///
    /// An element matched by both its id and a class, or by two selectors of
    /// the same role, is bound once. Roles with no elements on the page are
    /// omitted.
    pub fn build<P>(page: &P, selectors: &[ControlSelector]) -> Self
    where
        P: PageSurface<Handle = H>,
    {
        let mut list = Self::default();
        for selector in selectors {
            let by_id = selector.ids.iter().filter_map(|id| page.find_by_id(id));
            let by_class = selector
                .classes
                .iter()
                .flat_map(|class| page.find_by_class(class));
            for handle in by_id.chain(by_class) {
                list.insert(selector.role, handle);
            }
        }
        list
    }

    fn insert(&mut self, role: ControlRole, handle: H) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.role == role) {
            if !entry.handles.contains(&handle) {
                entry.handles.push(handle);
            }
        } else {
            self.entries.push(Binding {
                role,
                handles: vec![handle],
            });
        }
    }

    /// Every element bound to `role`; empty when the page has none.
    #[must_use]
    pub fn handles(&self, role: ControlRole) -> &[H] {
        self.entries
            .iter()
            .find(|entry| entry.role == role)
            .map(|entry| entry.handles.as_slice())
            .unwrap_or(&[])
    }

    /// Every role that matched at least one element.
    pub fn iter(&self) -> impl Iterator<Item = &Binding<H>> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_match_roles_and_inputs() {
        assert_eq!(
            ControlRole::IncreaseText.action(ControlInput::Click),
            Some(ControlAction::IncreaseFont)
        );
        assert_eq!(
            ControlRole::DarkModeToggle.action(ControlInput::Checked(true)),
            Some(ControlAction::SetDarkMode(true))
        );
        assert_eq!(
            ControlRole::LanguageSelect.action(ControlInput::Value("hi".into())),
            Some(ControlAction::SetLanguage("hi".into()))
        );
        assert_eq!(ControlRole::LanguageSelect.action(ControlInput::Click), None);
        assert_eq!(ControlRole::ThemeIcon.action(ControlInput::Click), None);
    }

    #[test]
    fn only_interactive_roles_listen() {
        let listening: Vec<ControlRole> = ControlRole::ALL
            .into_iter()
            .filter(|role| role.event_name().is_some())
            .collect();
        assert_eq!(listening.len(), 7);
        assert_eq!(ControlRole::LanguageSelect.event_name(), Some("change"));
        assert_eq!(ControlRole::ThemeButton.event_name(), Some("click"));
    }

    #[test]
    fn default_selectors_cover_every_role_once() {
        let selectors = default_selectors();
        for role in ControlRole::ALL {
            assert_eq!(
                selectors.iter().filter(|s| s.role == role).count(),
                1,
                "{role:?} should have exactly one selector"
            );
        }
    }

    #[test]
    fn selectors_roundtrip_through_config_json() {
        let json = r#"{"role": "language_select", "ids": ["lang"]}"#;
        let selector: ControlSelector = serde_json::from_str(json).unwrap();
        assert_eq!(selector.role, ControlRole::LanguageSelect);
        assert_eq!(selector.ids, vec!["lang".to_string()]);
        assert!(selector.classes.is_empty());
    }
}
