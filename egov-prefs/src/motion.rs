//! Cosmetic animation parameters and arithmetic.
//!
//! The browser wiring lives in `egov-web`; this module keeps the selectors,
//! timings and calculations so they can be checked without a DOM.

use num_traits::cast::cast;

/// Intersection observer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: Option<&'static str>,
}

pub const REVEAL_SELECTOR: &str = ".scroll-fade, .scroll-left, .scroll-right";
/// Sections that get the reveal class added automatically.
pub const REVEAL_AUTO_SELECTOR: &str = "section, .container > .row, .info-section";
pub const REVEAL_CLASS: &str = "scroll-fade";
pub const VISIBLE_CLASS: &str = "visible";
pub const REVEAL_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.15,
    root_margin: Some("0px 0px -50px 0px"),
};

pub const CARD_CONTAINER_SELECTOR: &str = ".row, .card-group, .list-group";
pub const CARD_SELECTOR: &str = ".card";
pub const CARD_ANIMATE_CLASS: &str = "card-animate";
pub const CARD_STAGGER_MS: u64 = 60;
pub const CARD_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.1,
    root_margin: None,
};

pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const NAVBAR_SCROLLED_CLASS: &str = "scrolled";
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

pub const COUNT_UP_SELECTOR: &str = ".stat-number, .count-up, [data-count-up]";
pub const COUNTED_ATTRIBUTE: &str = "data-counted";
pub const COUNT_UP_DURATION_MS: u32 = 1200;
pub const COUNT_UP_TICK_MS: u32 = 16;
pub const COUNT_UP_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.5,
    root_margin: None,
};

pub const RIPPLE_TARGET_SELECTOR: &str = ".btn";
pub const RIPPLE_LIFETIME_MS: u32 = 600;
pub const RIPPLE_STYLE_ATTRIBUTE: &str = "data-ripple";
pub const RIPPLE_KEYFRAMES: &str =
    "@keyframes rippleEffect { to { transform: scale(2); opacity: 0; } }";

pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const LAZY_SOURCE_ATTRIBUTE: &str = "data-src";
pub const LOADED_CLASS: &str = "loaded";
pub const LAZY_IMAGE_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.0,
    root_margin: None,
};

pub const SEARCH_INPUT_SELECTOR: &str = "input[type=\"search\"], .search-input";
pub const SEARCH_RESULT_SELECTOR: &str = ".search-result, .list-group-item, .card";
pub const SEARCH_INPUT_CLASS: &str = "rounded-pill";
pub const ACCENT_COLOR: &str = "#D97706";
pub const SEARCH_HIGHLIGHT_BORDER: &str = "3px solid #D97706";
/// Narrowest viewport, in CSS pixels, where focused search inputs widen.
pub const SEARCH_EXPAND_MIN_VIEWPORT: f64 = 768.0;
pub const SEARCH_EXPAND_FACTOR: f64 = 1.1;

pub const FORM_SELECTOR: &str = "form";
pub const FORM_FIELD_SELECTOR: &str = "input, textarea, select";
pub const INVALID_CLASS: &str = "is-invalid";
pub const VALID_CLASS: &str = "is-valid";
pub const INPUT_SHAKE_ANIMATION: &str = "inputShake 400ms ease";
/// Gap between clearing and re-setting the shake so it replays.
pub const INPUT_SHAKE_RESTART_MS: u32 = 10;

pub const BADGE_SELECTOR: &str = ".badge.bg-danger, .badge-count";
pub const BADGE_PULSE_ANIMATION: &str = "countPulse 500ms ease";

/// Individual effects the controller can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Reveal,
    CardStagger,
    NavbarShadow,
    CountUp,
    Ripple,
    LazyImages,
    SearchHighlight,
    BadgePulse,
    FormValidation,
    InputShake,
}

/// Decides which effects run given the user's motion preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionPolicy {
    pub reduced_motion: bool,
}

impl MotionPolicy {
    /// Policy for a user who does or does not ask for reduced motion.
    #[must_use]
    pub const fn new(reduced_motion: bool) -> Self {
        Self { reduced_motion }
    }

    /// Purely decorative motion is skipped under reduced motion; effects that
    /// carry information or load content always run.
    #[must_use]
    pub const fn allows(self, effect: Effect) -> bool {
        match effect {
            Effect::Reveal
            | Effect::CardStagger
            | Effect::CountUp
            | Effect::Ripple
            | Effect::BadgePulse
            | Effect::InputShake => !self.reduced_motion,
            Effect::NavbarShadow
            | Effect::LazyImages
            | Effect::SearchHighlight
            | Effect::FormValidation => true,
        }
    }
}

/// CSS `animation-delay` for the card at `index` within its container.
#[must_use]
pub fn stagger_delay(index: usize) -> String {
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    format!("{}ms", index.saturating_mul(CARD_STAGGER_MS))
}

/// Whether the navbar should carry its scrolled shadow at `scroll_y`.
#[must_use]
pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

/// Count-up target read from an element's text: every ASCII digit, in order.
/// Text without digits (or too many to fit) counts to zero.
#[must_use]
pub fn parse_count_target(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Format with comma thousands separators: `1234567` → `"1,234,567"`.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Frames of a count-up animation from zero to a target.
///
/// Each call to `next` is one tick of [`COUNT_UP_TICK_MS`]; the value grows by
/// `target / (duration / tick)` per tick and the final frame is exactly the
/// target.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    target_f: f64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CountUp {
    /// Count-up to `target` with the default duration and tick.
    #[must_use]
    pub fn new(target: u64) -> Self {
        Self::with_timing(target, COUNT_UP_DURATION_MS, COUNT_UP_TICK_MS)
    }

    /// Count-up to `target` over `duration_ms`, one frame per `tick_ms`.
    #[must_use]
    pub fn with_timing(target: u64, duration_ms: u32, tick_ms: u32) -> Self {
        let target_f = cast::<u64, f64>(target).unwrap_or(0.0);
        let ticks = f64::from(duration_ms) / f64::from(tick_ms.max(1));
        Self {
            target,
            target_f,
            increment: target_f / ticks.max(1.0),
            current: 0.0,
            finished: false,
        }
    }

    /// Final value of the animation.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }
}

impl Iterator for CountUp {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target_f {
            self.finished = true;
            Some(self.target)
        } else {
            Some(cast::<f64, u64>(self.current.floor()).unwrap_or(0))
        }
    }
}

/// Client rectangle of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A ripple circle positioned inside the clicked button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

impl Ripple {
    /// Circle covering the button, centred on the click point.
    #[must_use]
    pub fn at(button: Rect, client_x: f64, client_y: f64) -> Self {
        let size = button.width.max(button.height);
        Self {
            size,
            x: client_x - button.left - size / 2.0,
            y: client_y - button.top - size / 2.0,
        }
    }

    /// Inline style for the ripple `<span>`.
    #[must_use]
    pub fn css_text(&self) -> String {
        format!(
            "position:absolute;border-radius:50%;background:rgba(255, 255, 255, 0.6);\
             width:{size}px;height:{size}px;left:{x}px;top:{y}px;pointer-events:none;\
             animation:rippleEffect {RIPPLE_LIFETIME_MS}ms ease-out;",
            size = self.size,
            x = self.x,
            y = self.y,
        )
    }
}

/// Lower-cased search query, or `None` when the input is empty.
#[must_use]
pub fn normalize_query(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_lowercase())
    }
}

/// Whether a result's text contains an already-normalised query.
#[must_use]
pub fn matches_query(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(query)
}

/// Width of a focused search input that was `original` pixels wide, or
/// `None` when the viewport is too narrow to widen it.
#[must_use]
pub fn expanded_search_width(original: f64, viewport_width: f64) -> Option<f64> {
    (viewport_width >= SEARCH_EXPAND_MIN_VIEWPORT).then(|| original * SEARCH_EXPAND_FACTOR)
}

/// CSS pixel length.
#[must_use]
pub fn css_px(value: f64) -> String {
    format!("{value}px")
}

/// Whether a notification badge shows a positive count. Only the leading
/// digits are read, so `"3 new"` pulses and `"new"` does not.
#[must_use]
pub fn badge_should_pulse(text: &str) -> bool {
    let leading: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    leading.parse::<u64>().is_ok_and(|count| count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_keeps_functional_effects() {
        let reduced = MotionPolicy::new(true);
        assert!(!reduced.allows(Effect::Reveal));
        assert!(!reduced.allows(Effect::Ripple));
        assert!(!reduced.allows(Effect::CountUp));
        assert!(reduced.allows(Effect::NavbarShadow));
        assert!(reduced.allows(Effect::LazyImages));
        assert!(MotionPolicy::default().allows(Effect::CardStagger));
        assert!(!reduced.allows(Effect::InputShake));
        assert!(!reduced.allows(Effect::BadgePulse));
        assert!(reduced.allows(Effect::FormValidation));
        assert!(reduced.allows(Effect::SearchHighlight));
    }

    #[test]
    fn search_inputs_widen_only_on_wide_viewports() {
        assert_eq!(expanded_search_width(200.0, 767.0), None);
        let widened = expanded_search_width(200.0, 768.0).unwrap();
        assert!((widened - 220.0).abs() < 1e-9);
        assert_eq!(css_px(180.0), "180px");
        assert_eq!(css_px(12.5), "12.5px");
    }

    #[test]
    fn stagger_and_navbar_thresholds() {
        assert_eq!(stagger_delay(0), "0ms");
        assert_eq!(stagger_delay(3), "180ms");
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.5));
    }

    #[test]
    fn count_targets_read_digits_only() {
        assert_eq!(parse_count_target("12,500+"), 12_500);
        assert_eq!(parse_count_target("₹ 3.2 Cr"), 32);
        assert_eq!(parse_count_target("none"), 0);
        assert_eq!(parse_count_target(&"9".repeat(40)), 0);
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn count_up_climbs_monotonically_to_target() {
        let frames: Vec<u64> = CountUp::new(1500).collect();
        assert_eq!(frames.len(), 75);
        assert_eq!(frames.last().copied(), Some(1500));
        assert!(frames.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(frames[0], 20);
    }

    #[test]
    fn count_up_to_zero_is_a_single_frame() {
        assert_eq!(CountUp::new(0).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn ripple_is_centred_on_click() {
        let rect = Rect {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 40.0,
        };
        let ripple = Ripple::at(rect, 60.0, 40.0);
        assert!((ripple.size - 100.0).abs() < f64::EPSILON);
        assert!((ripple.x - 0.0).abs() < f64::EPSILON);
        assert!((ripple.y - -30.0).abs() < f64::EPSILON);
        assert!(ripple.css_text().contains("width:100px"));
        assert!(ripple.css_text().contains("rippleEffect 600ms"));
    }

    #[test]
    fn search_and_badge_helpers() {
        assert_eq!(normalize_query(""), None);
        let query = normalize_query("Birth").unwrap();
        assert!(matches_query("Apply for BIRTH certificate", &query));
        assert!(!matches_query("Trade licence", &query));

        assert!(badge_should_pulse("3"));
        assert!(badge_should_pulse(" 12 new"));
        assert!(!badge_should_pulse("0"));
        assert!(!badge_should_pulse("new"));
    }
}
