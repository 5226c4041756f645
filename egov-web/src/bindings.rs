//! Event listeners connecting bound controls to the preference manager.

use crate::page::DomPage;
use crate::storage::LocalStore;
use egov_prefs::{ControlInput, ControlRole, PreferenceManager};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement};

pub type PortalPrefs = PreferenceManager<LocalStore, DomPage>;

/// The page's single preference manager, shared by every listener.
pub type SharedPrefs = Rc<RefCell<PortalPrefs>>;

/// Attach a listener to every interactive control in the manager's binding
/// list. Returns the number of listeners attached.
pub fn bind_controls(prefs: &SharedPrefs) -> usize {
    let bound: Vec<(ControlRole, Vec<Element>)> = prefs
        .borrow()
        .bindings()
        .iter()
        .map(|binding| (binding.role, binding.handles.clone()))
        .collect();

    let mut attached = 0;
    for (role, elements) in bound {
        let Some(event_name) = role.event_name() else {
            continue;
        };
        for element in elements {
            if listen(prefs, role, event_name, &element) {
                attached += 1;
            }
            if event_name == "change" {
                // Controls inside dropdown menus must not close the menu.
                stop_click_propagation(&element);
            }
        }
    }
    log::debug!("bound {attached} preference controls");
    attached
}

fn listen(prefs: &SharedPrefs, role: ControlRole, event_name: &str, element: &Element) -> bool {
    let prefs = Rc::clone(prefs);
    let target = element.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.stop_propagation();
        let Some(action) = role.action(read_input(role, &target)) else {
            return;
        };
        log::debug!("{role:?} -> {action:?}");
        match prefs.try_borrow_mut() {
            Ok(mut manager) => manager.dispatch(action),
            Err(_) => log::warn!("preference update already in progress, dropping {role:?}"),
        }
    });
    let added = element
        .add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())
        .map_err(|err| log::warn!("cannot bind {role:?}: {}", crate::dom::js_error_message(&err)))
        .is_ok();
    handler.forget();
    added
}

fn stop_click_propagation(element: &Element) {
    let handler = Closure::<dyn FnMut(Event)>::new(|event: Event| event.stop_propagation());
    let _ = element.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
    handler.forget();
}

fn read_input(role: ControlRole, element: &Element) -> ControlInput {
    match role {
        ControlRole::DarkModeToggle | ControlRole::HighContrastToggle => element
            .dyn_ref::<HtmlInputElement>()
            .map_or(ControlInput::Click, |input| {
                ControlInput::Checked(input.checked())
            }),
        ControlRole::LanguageSelect => element
            .dyn_ref::<HtmlSelectElement>()
            .map(HtmlSelectElement::value)
            .or_else(|| element.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value))
            .map_or(ControlInput::Click, ControlInput::Value),
        _ => ControlInput::Click,
    }
}
