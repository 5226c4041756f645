#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod animations;
pub mod bindings;
pub mod dom;
pub mod logging;
pub mod page;
pub mod storage;

pub use bindings::{PortalPrefs, SharedPrefs};
pub use page::DomPage;
pub use storage::LocalStore;

use egov_prefs::{MotionPolicy, PreferenceManager};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::Document;

const REDUCED_MOTION: &str = "(prefers-reduced-motion: reduce)";

/// Restore saved preferences onto `document` and bind its controls.
pub fn init_preferences(document: Document) -> SharedPrefs {
    let mut manager = PreferenceManager::with_defaults(LocalStore, DomPage::new(document));
    manager.init();
    let prefs = Rc::new(RefCell::new(manager));
    bindings::bind_controls(&prefs);
    prefs
}

/// Start the cosmetic animations, honouring the reduced-motion preference.
pub fn init_animations(document: &Document) {
    let policy = MotionPolicy::new(dom::media_matches(REDUCED_MOTION));
    if policy.reduced_motion {
        log::info!("reduced motion requested, decorative animations disabled");
    }
    animations::init(document, policy);
}

#[cfg(target_arch = "wasm32")]
fn boot(document: &Document) {
    let prefs = init_preferences(document.clone());
    init_animations(document);
    log::info!("portal ready, language {}", prefs.borrow().state().language);
}

/// Module entry point run by the wasm loader.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
    let Some(document) = dom::document() else {
        return;
    };
    // Module scripts loaded from <head> can run before the body is parsed.
    if dom::is_loading(&document) {
        let ready = document.clone();
        let on_ready = Closure::once_into_js(move || boot(&ready));
        let _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    } else {
        boot(&document);
    }
}
