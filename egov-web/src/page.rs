//! The live document as a [`PageSurface`].

use crate::dom;
use egov_prefs::{IconKind, PageSurface, TextSlot, Translatable};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

const COLOR_SCHEME_DARK: &str = "(prefers-color-scheme: dark)";
const LIGATURE_ICON_CLASS: &str = "material-symbols-outlined";

#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    /// Surface over `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// The wrapped document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }
}

impl PageSurface for DomPage {
    type Handle = Element;

    fn set_root_font_size(&self, css_value: &str) {
        if let Some(root) = self.root().and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
            let _ = root.style().set_property("font-size", css_value);
        }
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        if let Some(root) = self.root() {
            let _ = if enabled {
                root.class_list().add_1(class)
            } else {
                root.class_list().remove_1(class)
            };
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn prefers_dark_scheme(&self) -> bool {
        dom::media_matches(COLOR_SCHEME_DARK)
    }

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn find_by_class(&self, class: &str) -> Vec<Element> {
        dom::query_all(&self.document, &format!(".{class}"))
    }

    fn translatable(&self, marker: &str) -> Vec<Translatable<Element>> {
        dom::query_all(&self.document, &format!("[{marker}]"))
            .into_iter()
            .filter_map(|element| {
                let key = element.get_attribute(marker)?;
                let slot = if element.is_instance_of::<HtmlInputElement>()
                    || element.is_instance_of::<HtmlTextAreaElement>()
                {
                    TextSlot::Placeholder
                } else {
                    TextSlot::Content
                };
                Some(Translatable {
                    handle: element,
                    key,
                    slot,
                })
            })
            .collect()
    }

    fn set_text(&self, handle: &Element, text: &str) {
        handle.set_text_content(Some(text));
    }

    fn set_placeholder(&self, handle: &Element, text: &str) {
        if let Some(input) = handle.dyn_ref::<HtmlInputElement>() {
            input.set_placeholder(text);
        } else if let Some(area) = handle.dyn_ref::<HtmlTextAreaElement>() {
            area.set_placeholder(text);
        }
    }

    fn set_checked(&self, handle: &Element, checked: bool) {
        if let Some(input) = handle.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn set_value(&self, handle: &Element, value: &str) {
        if let Some(select) = handle.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(input) = handle.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn set_class_name(&self, handle: &Element, class_name: &str) {
        handle.set_class_name(class_name);
    }

    fn icon_kind(&self, handle: &Element) -> IconKind {
        if handle.class_list().contains(LIGATURE_ICON_CLASS) {
            IconKind::Ligature
        } else if handle.tag_name().eq_ignore_ascii_case("i") {
            IconKind::ClassName
        } else {
            IconKind::Other
        }
    }
}
