//! Cosmetic page animations.
//!
//! Nothing here touches preference state. Each effect is wired once at
//! startup and skipped entirely when the [`MotionPolicy`] disallows it.

use crate::dom;
use egov_prefs::motion::{
    ACCENT_COLOR, BADGE_PULSE_ANIMATION, BADGE_SELECTOR, CARD_ANIMATE_CLASS,
    CARD_CONTAINER_SELECTOR, CARD_OBSERVER, CARD_SELECTOR, COUNT_UP_OBSERVER, COUNT_UP_SELECTOR,
    COUNT_UP_TICK_MS, COUNTED_ATTRIBUTE, CountUp, Effect, FORM_FIELD_SELECTOR, FORM_SELECTOR,
    INPUT_SHAKE_ANIMATION, INPUT_SHAKE_RESTART_MS, INVALID_CLASS, LAZY_IMAGE_OBSERVER,
    LAZY_IMAGE_SELECTOR, LAZY_SOURCE_ATTRIBUTE, LOADED_CLASS, MotionPolicy, NAVBAR_SCROLLED_CLASS,
    NAVBAR_SELECTOR, ObserverOptions, REVEAL_AUTO_SELECTOR, REVEAL_CLASS, REVEAL_OBSERVER,
    REVEAL_SELECTOR, RIPPLE_KEYFRAMES, RIPPLE_LIFETIME_MS, RIPPLE_STYLE_ATTRIBUTE,
    RIPPLE_TARGET_SELECTOR, Rect, Ripple, SEARCH_HIGHLIGHT_BORDER, SEARCH_INPUT_CLASS,
    SEARCH_INPUT_SELECTOR, SEARCH_RESULT_SELECTOR, VALID_CLASS, VISIBLE_CLASS,
    badge_should_pulse, css_px, expanded_search_width, group_thousands, matches_query,
    navbar_scrolled, normalize_query, parse_count_target, stagger_delay,
};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement, HtmlImageElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
};

/// Wire every effect the policy allows.
pub fn init(document: &Document, policy: MotionPolicy) {
    let effects: [(Effect, fn(&Document)); 8] = [
        (Effect::Reveal, init_scroll_reveal),
        (Effect::CardStagger, init_card_stagger),
        (Effect::NavbarShadow, init_navbar_shadow),
        (Effect::CountUp, init_count_up),
        (Effect::Ripple, init_ripple),
        (Effect::LazyImages, init_lazy_images),
        (Effect::SearchHighlight, init_search_highlight),
        (Effect::BadgePulse, init_badge_pulse),
    ];
    for (effect, wire) in effects {
        if policy.allows(effect) {
            wire(document);
        } else {
            log::debug!("{effect:?} skipped under reduced motion");
        }
    }
    if policy.allows(Effect::FormValidation) {
        init_form_validation(document, policy.allows(Effect::InputShake));
    }
}

/// Observer that calls `on_enter` for each target as it enters the viewport.
fn observer<F>(options: ObserverOptions, on_enter: F) -> Option<IntersectionObserver>
where
    F: Fn(&Element, &IntersectionObserver) + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_enter(&entry.target(), &observer);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    if let Some(margin) = options.root_margin {
        init.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|err| {
                log::warn!("IntersectionObserver unavailable: {}", dom::js_error_message(&err));
            })
            .ok()?;
    callback.forget();
    Some(observer)
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

fn clear_style(element: &Element, property: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().remove_property(property);
    }
}

/// Reveal marked elements and page sections the first time they scroll into view.
pub fn init_scroll_reveal(document: &Document) {
    let Some(observer) = observer(REVEAL_OBSERVER, |target, observer| {
        let _ = target.class_list().add_1(VISIBLE_CLASS);
        observer.unobserve(target);
    }) else {
        return;
    };

    for element in dom::query_all(document, REVEAL_SELECTOR) {
        observer.observe(&element);
    }
    for section in dom::query_all(document, REVEAL_AUTO_SELECTOR) {
        let classes = section.class_list();
        if !classes.contains(REVEAL_CLASS) {
            let _ = classes.add_1(REVEAL_CLASS);
            observer.observe(&section);
        }
    }
}

/// Animate the cards of each container in sequence when it first scrolls into view.
pub fn init_card_stagger(document: &Document) {
    let Some(observer) = observer(CARD_OBSERVER, |container, observer| {
        for (index, card) in dom::query_within(container, CARD_SELECTOR).iter().enumerate() {
            let classes = card.class_list();
            if classes.contains(CARD_ANIMATE_CLASS) {
                continue;
            }
            let _ = classes.add_1(CARD_ANIMATE_CLASS);
            set_style(card, "animation-delay", &stagger_delay(index));
        }
        observer.unobserve(container);
    }) else {
        return;
    };

    for container in dom::query_all(document, CARD_CONTAINER_SELECTOR) {
        if !dom::query_within(&container, CARD_SELECTOR).is_empty() {
            observer.observe(&container);
        }
    }
}

/// Keep the navbar's `scrolled` class in step with the scroll offset.
pub fn init_navbar_shadow(document: &Document) {
    let Some(navbar) = document.query_selector(NAVBAR_SELECTOR).ok().flatten() else {
        return;
    };
    let Some(win) = dom::window() else {
        return;
    };

    let scroll_source = win.clone();
    let handler = Closure::<dyn FnMut()>::new(move || {
        let scrolled = navbar_scrolled(scroll_source.scroll_y().unwrap_or(0.0));
        let classes = navbar.class_list();
        let _ = if scrolled {
            classes.add_1(NAVBAR_SCROLLED_CLASS)
        } else {
            classes.remove_1(NAVBAR_SCROLLED_CLASS)
        };
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    let _ = win.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        handler.as_ref().unchecked_ref(),
        &options,
    );
    handler.forget();
}

/// Count statistics up from zero the first time they are half visible.
pub fn init_count_up(document: &Document) {
    let Some(observer) = observer(COUNT_UP_OBSERVER, |target, observer| {
        observer.unobserve(target);
        if target.has_attribute(COUNTED_ATTRIBUTE) {
            return;
        }
        let _ = target.set_attribute(COUNTED_ATTRIBUTE, "true");
        wasm_bindgen_futures::spawn_local(count_up(target.clone()));
    }) else {
        return;
    };

    for element in dom::query_all(document, COUNT_UP_SELECTOR) {
        observer.observe(&element);
    }
}

#[allow(clippy::future_not_send)]
async fn count_up(element: Element) {
    let frames = CountUp::new(parse_count_target(
        &element.text_content().unwrap_or_default(),
    ));
    let target = frames.target();
    let tick = i32::try_from(COUNT_UP_TICK_MS).unwrap_or(i32::MAX);
    for frame in frames {
        if dom::sleep_ms(tick).await.is_err() {
            element.set_text_content(Some(&group_thousands(target)));
            return;
        }
        element.set_text_content(Some(&group_thousands(frame)));
    }
}

/// Spread a ripple from the click point of any `.btn`.
pub fn init_ripple(document: &Document) {
    let doc = document.clone();
    let handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let button = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest(RIPPLE_TARGET_SELECTOR).ok().flatten());
        if let Some(button) = button {
            spawn_ripple(&doc, &button, &event);
        }
    });
    let _ = document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
    handler.forget();
}

fn spawn_ripple(document: &Document, button: &Element, event: &MouseEvent) {
    let bounds = button.get_bounding_client_rect();
    let ripple = Ripple::at(
        Rect {
            left: bounds.left(),
            top: bounds.top(),
            width: bounds.width(),
            height: bounds.height(),
        },
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    );

    ensure_ripple_keyframes(document);
    let Ok(span) = document.create_element("span") else {
        return;
    };
    let _ = span.set_attribute("style", &ripple.css_text());
    set_style(button, "position", "relative");
    set_style(button, "overflow", "hidden");
    if button.append_child(&span).is_err() {
        return;
    }

    let lifetime = i32::try_from(RIPPLE_LIFETIME_MS).unwrap_or(i32::MAX);
    wasm_bindgen_futures::spawn_local(async move {
        let _ = dom::sleep_ms(lifetime).await;
        span.remove();
    });
}

fn ensure_ripple_keyframes(document: &Document) {
    let existing = document
        .query_selector(&format!("style[{RIPPLE_STYLE_ATTRIBUTE}]"))
        .ok()
        .flatten();
    if existing.is_some() {
        return;
    }
    let (Ok(style), Some(head)) = (document.create_element("style"), document.head()) else {
        return;
    };
    let _ = style.set_attribute(RIPPLE_STYLE_ATTRIBUTE, "true");
    style.set_text_content(Some(RIPPLE_KEYFRAMES));
    let _ = head.append_child(&style);
}

/// Load `data-src` images as they approach the viewport.
pub fn init_lazy_images(document: &Document) {
    let Some(observer) = observer(LAZY_IMAGE_OBSERVER, |target, observer| {
        observer.unobserve(target);
        let Some(source) = target.get_attribute(LAZY_SOURCE_ATTRIBUTE) else {
            return;
        };
        if let Some(image) = target.dyn_ref::<HtmlImageElement>() {
            image.set_src(&source);
        }
        let _ = target.class_list().add_1(LOADED_CLASS);
    }) else {
        return;
    };

    for image in dom::query_all(document, LAZY_IMAGE_SELECTOR) {
        observer.observe(&image);
    }
}

/// Style search inputs and mark matching results as the user types.
///
/// On wide viewports a focused input also grows by
/// [`egov_prefs::motion::SEARCH_EXPAND_FACTOR`] and returns to its initial
/// width on blur.
pub fn init_search_highlight(document: &Document) {
    for element in dom::query_all(document, SEARCH_INPUT_SELECTOR) {
        let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let _ = input.class_list().add_1(SEARCH_INPUT_CLASS);
        let initial_width = f64::from(input.offset_width());

        let focused = input.clone();
        let on_focus = Closure::<dyn FnMut()>::new(move || {
            let style = focused.style();
            let _ = style.set_property("border-color", ACCENT_COLOR);
            if let Some(width) = expanded_search_width(initial_width, viewport_width()) {
                let _ = style.set_property("width", &css_px(width));
            }
        });
        let blurred = input.clone();
        let on_blur = Closure::<dyn FnMut()>::new(move || {
            let style = blurred.style();
            let _ = style.remove_property("border-color");
            let _ = style.set_property("width", &css_px(initial_width));
        });
        let doc = document.clone();
        let source = input.clone();
        let on_input = Closure::<dyn FnMut()>::new(move || {
            highlight_results(&doc, normalize_query(&source.value()).as_deref());
        });

        for (event_name, handler) in [("focus", on_focus), ("blur", on_blur), ("input", on_input)] {
            let _ = input.add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref());
            handler.forget();
        }
    }
}

fn viewport_width() -> f64 {
    dom::window()
        .and_then(|win| win.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

/// Mark results containing `query`; `None` clears every mark.
fn highlight_results(document: &Document, query: Option<&str>) {
    for result in dom::query_all(document, SEARCH_RESULT_SELECTOR) {
        let text = result.text_content().unwrap_or_default();
        match query {
            Some(query) if matches_query(&text, query) => {
                set_style(&result, "border-left", SEARCH_HIGHLIGHT_BORDER);
            }
            _ => clear_style(&result, "border-left"),
        }
    }
}

/// Pulse notification badges that show a positive count.
pub fn init_badge_pulse(document: &Document) {
    for badge in dom::query_all(document, BADGE_SELECTOR) {
        if badge_should_pulse(&badge.text_content().unwrap_or_default()) {
            set_style(&badge, "animation", BADGE_PULSE_ANIMATION);
        }
    }
}

/// Flag invalid form fields and clear the flag once the field validates.
///
/// With `shake` set, an invalid field also replays
/// [`INPUT_SHAKE_ANIMATION`].
pub fn init_form_validation(document: &Document, shake: bool) {
    for form in dom::query_all(document, FORM_SELECTOR) {
        for field in dom::query_within(&form, FORM_FIELD_SELECTOR) {
            let flagged = field.clone();
            let on_invalid = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                let _ = flagged.class_list().add_1(INVALID_CLASS);
                if shake {
                    replay_shake(&flagged);
                }
            });
            let edited = field.clone();
            let on_input = Closure::<dyn FnMut()>::new(move || {
                if field_is_valid(&edited) {
                    let classes = edited.class_list();
                    let _ = classes.remove_1(INVALID_CLASS);
                    let _ = classes.add_1(VALID_CLASS);
                }
            });
            let _ = field.add_event_listener_with_callback("invalid", on_invalid.as_ref().unchecked_ref());
            let _ = field.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref());
            on_invalid.forget();
            on_input.forget();
        }
    }
}

fn replay_shake(field: &Element) {
    set_style(field, "animation", "none");
    let field = field.clone();
    let restart = i32::try_from(INPUT_SHAKE_RESTART_MS).unwrap_or(i32::MAX);
    wasm_bindgen_futures::spawn_local(async move {
        let _ = dom::sleep_ms(restart).await;
        set_style(&field, "animation", INPUT_SHAKE_ANIMATION);
    });
}

fn field_is_valid(field: &Element) -> bool {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.check_validity()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.check_validity()
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.check_validity()
    } else {
        true
    }
}
