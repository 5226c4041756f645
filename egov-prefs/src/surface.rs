//! Page surface vocabulary and an in-memory page for host-side tests.

use crate::PageSurface;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Which property a translation is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    /// Element text content.
    Content,
    /// Input placeholder.
    Placeholder,
}

/// An element opted into translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translatable<H> {
    pub handle: H,
    pub key: String,
    pub slot: TextSlot,
}

/// How a theme icon shows its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// Icon font ligature: the glyph name is the element text (Material Symbols).
    Ligature,
    /// Icon font class: the glyph is chosen by class name (Bootstrap Icons).
    ClassName,
    /// Markup the theme cannot restyle; left as authored.
    Other,
}

/// Handle into a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryHandle(usize);

/// Element of a [`MemoryPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub placeholder: String,
    pub checked: bool,
    pub value: String,
}

impl MemoryElement {
    /// Element with the given tag name, stored upper-cased like the DOM does.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            ..Self::default()
        }
    }

    /// Set the id.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Value of attribute `name`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn is_text_input(&self) -> bool {
        self.tag == "INPUT" || self.tag == "TEXTAREA"
    }
}

#[derive(Debug, Default)]
struct PageModel {
    root: MemoryElement,
    root_font_size: Option<String>,
    elements: Vec<MemoryElement>,
    prefers_dark: bool,
}

/// In-memory [`PageSurface`] standing in for a browser document.
///
/// Clones share the same page.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    model: Rc<RefCell<PageModel>>,
}

impl MemoryPage {
    /// Empty page with no colour-scheme preference.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the operating system's colour-scheme preference.
    #[must_use]
    pub fn with_dark_preference(self, prefers_dark: bool) -> Self {
        self.model.borrow_mut().prefers_dark = prefers_dark;
        self
    }

    /// Append an element and return its handle.
    pub fn add(&self, element: MemoryElement) -> MemoryHandle {
        let mut model = self.model.borrow_mut();
        model.elements.push(element);
        MemoryHandle(model.elements.len() - 1)
    }

    /// Snapshot of one element.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was not produced by this page.
    #[must_use]
    pub fn element(&self, handle: MemoryHandle) -> MemoryElement {
        self.model.borrow().elements[handle.0].clone()
    }

    /// Snapshot of the root (`<html>`) element.
    #[must_use]
    pub fn root(&self) -> MemoryElement {
        self.model.borrow().root.clone()
    }

    /// Inline font-size of the root, if set.
    #[must_use]
    pub fn root_font_size(&self) -> Option<String> {
        self.model.borrow().root_font_size.clone()
    }

    /// Whether the root carries `class`.
    #[must_use]
    pub fn root_has_class(&self, class: &str) -> bool {
        self.model.borrow().root.classes.contains(class)
    }

    /// Value of a root attribute.
    #[must_use]
    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.model.borrow().root.attr(name).map(str::to_string)
    }

    /// Simulate the user editing a control before its event fires.
    pub fn user_sets_value(&self, handle: MemoryHandle, value: &str) {
        self.set_value(&handle, value);
    }

    /// Simulate the user ticking or clearing a checkbox.
    pub fn user_sets_checked(&self, handle: MemoryHandle, checked: bool) {
        self.set_checked(&handle, checked);
    }

    fn update(&self, handle: MemoryHandle, f: impl FnOnce(&mut MemoryElement)) {
        if let Some(element) = self.model.borrow_mut().elements.get_mut(handle.0) {
            f(element);
        }
    }
}

impl PageSurface for MemoryPage {
    type Handle = MemoryHandle;

    fn set_root_font_size(&self, css_value: &str) {
        self.model.borrow_mut().root_font_size = Some(css_value.to_string());
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        let mut model = self.model.borrow_mut();
        if enabled {
            model.root.classes.insert(class.to_string());
        } else {
            model.root.classes.remove(class);
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.model
            .borrow_mut()
            .root
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.model.borrow().prefers_dark
    }

    fn find_by_id(&self, id: &str) -> Option<MemoryHandle> {
        self.model
            .borrow()
            .elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(MemoryHandle)
    }

    fn find_by_class(&self, class: &str) -> Vec<MemoryHandle> {
        self.model
            .borrow()
            .elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.classes.contains(class))
            .map(|(index, _)| MemoryHandle(index))
            .collect()
    }

    fn translatable(&self, marker: &str) -> Vec<Translatable<MemoryHandle>> {
        self.model
            .borrow()
            .elements
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                element.attr(marker).map(|key| Translatable {
                    handle: MemoryHandle(index),
                    key: key.to_string(),
                    slot: if element.is_text_input() {
                        TextSlot::Placeholder
                    } else {
                        TextSlot::Content
                    },
                })
            })
            .collect()
    }

    fn set_text(&self, handle: &MemoryHandle, text: &str) {
        self.update(*handle, |element| element.text = text.to_string());
    }

    fn set_placeholder(&self, handle: &MemoryHandle, text: &str) {
        self.update(*handle, |element| element.placeholder = text.to_string());
    }

    fn set_checked(&self, handle: &MemoryHandle, checked: bool) {
        self.update(*handle, |element| element.checked = checked);
    }

    fn set_value(&self, handle: &MemoryHandle, value: &str) {
        self.update(*handle, |element| element.value = value.to_string());
    }

    fn set_class_name(&self, handle: &MemoryHandle, class_name: &str) {
        self.update(*handle, |element| {
            element.classes = class_name.split_whitespace().map(str::to_string).collect();
        });
    }

    fn icon_kind(&self, handle: &MemoryHandle) -> IconKind {
        let model = self.model.borrow();
        match model.elements.get(handle.0) {
            Some(element) if element.classes.contains("material-symbols-outlined") => {
                IconKind::Ligature
            }
            Some(element) if element.tag == "I" => IconKind::ClassName,
            _ => IconKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_follow_ids_classes_and_markers() {
        let page = MemoryPage::new();
        let heading = page.add(MemoryElement::new("h1").with_attr("data-i18n", "welcome"));
        let search = page.add(
            MemoryElement::new("input")
                .with_id("q")
                .with_class("search-input")
                .with_attr("data-i18n", "search"),
        );

        assert_eq!(page.find_by_id("q"), Some(search));
        assert_eq!(page.find_by_class("search-input"), vec![search]);

        let marked = page.translatable("data-i18n");
        assert_eq!(marked.len(), 2);
        assert_eq!(marked[0].handle, heading);
        assert_eq!(marked[0].slot, TextSlot::Content);
        assert_eq!(marked[1].slot, TextSlot::Placeholder);
    }

    #[test]
    fn icon_kind_depends_on_markup() {
        let page = MemoryPage::new();
        let ligature = page.add(MemoryElement::new("span").with_class("material-symbols-outlined"));
        let bootstrap = page.add(MemoryElement::new("i").with_class("bi"));
        let plain = page.add(MemoryElement::new("span"));
        assert_eq!(page.icon_kind(&ligature), IconKind::Ligature);
        assert_eq!(page.icon_kind(&bootstrap), IconKind::ClassName);
        assert_eq!(page.icon_kind(&plain), IconKind::Other);
    }
}
