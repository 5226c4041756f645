#![cfg(target_arch = "wasm32")]

use egov_prefs::config::{LEGACY_THEME_KEY, STORAGE_KEY};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

use egov_web::{SharedPrefs, dom, init_preferences};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r#"
<button id="btn-increase-text">A+</button>
<button id="btn-decrease-text">A-</button>
<button id="btn-reset-text">A</button>
<span id="text-size-display">100%</span>
<span id="text-size-display-mobile">100%</span>
<input type="checkbox" id="cb-dark-mode" class="theme-toggle-cb">
<input type="checkbox" id="cb-dark-mode-mobile" class="theme-toggle-cb">
<input type="checkbox" id="cb-high-contrast">
<span id="themeIcon" class="material-symbols-outlined">light_mode</span>
<select id="language-select">
  <option value="en">English</option><option value="hi">Hindi</option><option value="or">Odia</option>
</select>
<select id="language-select-mobile">
  <option value="en">English</option><option value="hi">Hindi</option><option value="or">Odia</option>
</select>
<h1 data-i18n="hero.title">E-Governance Service Management System</h1>
<input type="search" data-i18n="search" placeholder="Search">
<p data-i18n="no.such.key">untouched</p>
"#;

fn document() -> Document {
    dom::document().expect("document")
}

/// Fresh controls in the body, with storage cleared and the root reset.
fn mount(stored: Option<&str>) -> SharedPrefs {
    let doc = document();
    if let Some(old) = doc.get_element_by_id("prefs-fixture") {
        old.remove();
    }
    let storage = dom::local_storage().expect("localStorage");
    storage.remove_item(STORAGE_KEY).expect("clear settings");
    storage.remove_item(LEGACY_THEME_KEY).expect("clear legacy theme");
    if let Some(json) = stored {
        storage.set_item(STORAGE_KEY, json).expect("seed settings");
    }
    let root = doc.document_element().expect("root");
    root.set_class_name("");

    let fixture = doc.create_element("div").expect("create fixture");
    fixture.set_id("prefs-fixture");
    fixture.set_inner_html(FIXTURE);
    doc.body()
        .expect("document body")
        .append_child(&fixture)
        .expect("append fixture");
    init_preferences(doc)
}

fn by_id(id: &str) -> Element {
    document()
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("#{id} exists"))
}

fn click(id: &str) {
    by_id(id)
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

fn change(element: &Element) {
    element
        .dispatch_event(&Event::new("change").expect("change event"))
        .expect("dispatch change");
}

fn root() -> Element {
    document().document_element().expect("root")
}

fn root_font_size() -> String {
    root()
        .dyn_into::<HtmlElement>()
        .expect("html root")
        .style()
        .get_property_value("font-size")
        .expect("font-size")
}

fn stored() -> serde_json::Value {
    let raw = dom::local_storage()
        .expect("localStorage")
        .get_item(STORAGE_KEY)
        .expect("read settings")
        .expect("settings saved");
    serde_json::from_str(&raw).expect("settings are json")
}

#[wasm_bindgen_test]
fn font_buttons_scale_root_and_update_every_display() {
    let _prefs = mount(None);
    click("btn-increase-text");
    click("btn-increase-text");

    assert_eq!(root_font_size(), "120%");
    assert_eq!(by_id("text-size-display").text_content().as_deref(), Some("120%"));
    assert_eq!(by_id("text-size-display-mobile").text_content().as_deref(), Some("120%"));
    assert_eq!(stored()["fontSize"], 120);

    click("btn-decrease-text");
    assert_eq!(root_font_size(), "110%");

    click("btn-reset-text");
    assert_eq!(root_font_size(), "100%");
    assert_eq!(stored()["fontSize"], 100);
}

#[wasm_bindgen_test]
fn dark_mode_checkbox_mirrors_and_themes_root() {
    let prefs = mount(Some(r#"{"darkMode":false}"#));
    let desktop: HtmlInputElement = by_id("cb-dark-mode").dyn_into().expect("checkbox");
    desktop.set_checked(true);
    change(&desktop);

    assert!(prefs.borrow().state().dark_mode);
    assert!(root().class_list().contains("dark"));
    assert_eq!(root().get_attribute("data-bs-theme").as_deref(), Some("dark"));
    let mobile: HtmlInputElement = by_id("cb-dark-mode-mobile").dyn_into().expect("checkbox");
    assert!(mobile.checked(), "every dark-mode toggle reflects the state");
    assert_eq!(by_id("themeIcon").text_content().as_deref(), Some("light_mode"));
    assert_eq!(
        dom::local_storage()
            .expect("localStorage")
            .get_item(LEGACY_THEME_KEY)
            .expect("read legacy"),
        Some("dark".into())
    );
}

#[wasm_bindgen_test]
fn high_contrast_checkbox_toggles_root_class() {
    let _prefs = mount(None);
    let toggle: HtmlInputElement = by_id("cb-high-contrast").dyn_into().expect("checkbox");
    toggle.set_checked(true);
    change(&toggle);
    assert!(root().class_list().contains("high-contrast"));
    assert_eq!(stored()["highContrast"], true);

    toggle.set_checked(false);
    change(&toggle);
    assert!(!root().class_list().contains("high-contrast"));
}

#[wasm_bindgen_test]
fn language_select_translates_and_syncs_the_other_select() {
    let _prefs = mount(None);
    let select: HtmlSelectElement = by_id("language-select").dyn_into().expect("select");
    select.set_value("hi");
    change(&select);

    assert_eq!(root().get_attribute("lang").as_deref(), Some("hi"));
    let mobile: HtmlSelectElement = by_id("language-select-mobile").dyn_into().expect("select");
    assert_eq!(mobile.value(), "hi");

    let doc = document();
    let title = doc
        .query_selector("[data-i18n='hero.title']")
        .expect("query title")
        .expect("title exists");
    assert_eq!(title.text_content().as_deref(), Some("ई-गवर्नेंस सेवा प्रबंधन प्रणाली"));
    let search: HtmlInputElement = doc
        .query_selector("input[data-i18n='search']")
        .expect("query search")
        .expect("search exists")
        .dyn_into()
        .expect("input");
    assert_eq!(search.placeholder(), "खोजें");
    let untranslated = doc
        .query_selector("[data-i18n='no.such.key']")
        .expect("query")
        .expect("exists");
    assert_eq!(untranslated.text_content().as_deref(), Some("untouched"));
    assert_eq!(stored()["language"], "hi");
}

#[wasm_bindgen_test]
fn stored_preferences_are_applied_on_startup() {
    let prefs = mount(Some(
        r#"{"fontSize":130,"highContrast":true,"darkMode":true,"language":"or"}"#,
    ));
    assert_eq!(prefs.borrow().state().language, "or");
    assert_eq!(root_font_size(), "130%");
    assert!(root().class_list().contains("high-contrast"));
    assert!(root().class_list().contains("dark"));
    let select: HtmlSelectElement = by_id("language-select").dyn_into().expect("select");
    assert_eq!(select.value(), "or");
    let toggle: HtmlInputElement = by_id("cb-high-contrast").dyn_into().expect("checkbox");
    assert!(toggle.checked());
}

#[wasm_bindgen_test]
fn parsed_document_is_not_reported_as_loading() {
    let doc = document();
    assert_ne!(doc.ready_state(), "loading");
    assert!(!dom::is_loading(&doc));
}
