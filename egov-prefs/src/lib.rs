//! e-Governance portal display preferences
//!
//! Platform-agnostic core for the portal's accessibility and language settings
//! (font scale, dark mode, high contrast, UI language) and the arithmetic behind
//! its cosmetic animations. Browser bindings live in `egov-web`; everything in
//! this crate runs on the host.

pub mod binding;
pub mod catalog;
pub mod config;
pub mod error;
pub mod font;
pub mod manager;
pub mod motion;
pub mod state;
pub mod storage;
pub mod surface;

// Re-export commonly used types
pub use binding::{Binding, BindingList, ControlAction, ControlInput, ControlRole, ControlSelector};
pub use catalog::{DEFAULT_LOCALE, LocaleMeta, TranslationCatalog};
pub use config::{PrefsConfig, ResetScope};
pub use error::{CatalogError, PrefsError};
pub use font::FontScale;
pub use manager::PreferenceManager;
pub use motion::{CountUp, Effect, MotionPolicy, Rect, Ripple};
pub use state::PreferenceState;
pub use storage::MemoryStore;
pub use surface::{IconKind, MemoryElement, MemoryHandle, MemoryPage, TextSlot, Translatable};

/// Trait for abstracting the key-value store preferences persist to
/// Platform-specific implementations should provide this
pub trait PreferenceStore {
    type Error: std::error::Error + 'static;

    /// Read the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Trait for abstracting the page preferences are projected onto
///
/// Every method is infallible from the caller's point of view: a surface that
/// cannot find the node it is asked to touch does nothing.
pub trait PageSurface {
    /// Opaque reference to one element on the page.
    type Handle: Clone + PartialEq;

    /// Set the inline font-size of the root element (e.g. `"130%"`).
    fn set_root_font_size(&self, css_value: &str);

    /// Add or remove a class on the root element.
    fn set_root_class(&self, class: &str, enabled: bool);

    /// Set an attribute on the root element.
    fn set_root_attribute(&self, name: &str, value: &str);

    /// Whether the operating system asks for a dark colour scheme.
    fn prefers_dark_scheme(&self) -> bool;

    /// Look up a single element by id.
    fn find_by_id(&self, id: &str) -> Option<Self::Handle>;

    /// Every element carrying `class`, in document order.
    fn find_by_class(&self, class: &str) -> Vec<Self::Handle>;

    /// Every element carrying the `marker` attribute, with its translation key.
    fn translatable(&self, marker: &str) -> Vec<Translatable<Self::Handle>>;

    /// Replace the text content of an element.
    fn set_text(&self, handle: &Self::Handle, text: &str);

    /// Set the placeholder of an input-like element.
    fn set_placeholder(&self, handle: &Self::Handle, text: &str);

    /// Tick or clear a checkbox.
    fn set_checked(&self, handle: &Self::Handle, checked: bool);

    /// Select `value` in a select element, or set an input's value.
    fn set_value(&self, handle: &Self::Handle, value: &str);

    /// Replace the full class attribute of an element.
    fn set_class_name(&self, handle: &Self::Handle, class_name: &str);

    /// How a theme icon element renders its glyph.
    fn icon_kind(&self, handle: &Self::Handle) -> IconKind;
}
