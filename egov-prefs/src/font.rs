//! Root font scale expressed as a whole percentage.

use num_traits::cast::cast;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const FONT_SCALE_MIN: u16 = 70;
pub const FONT_SCALE_MAX: u16 = 150;
pub const FONT_SCALE_STEP: u16 = 10;
pub const FONT_SCALE_DEFAULT: u16 = 100;

/// Font scale in percent, always a multiple of [`FONT_SCALE_STEP`] within
/// `[FONT_SCALE_MIN, FONT_SCALE_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FontScale(u16);

impl FontScale {
    pub const MIN: Self = Self(FONT_SCALE_MIN);
    pub const MAX: Self = Self(FONT_SCALE_MAX);
    pub const DEFAULT: Self = Self(FONT_SCALE_DEFAULT);

    /// Build a scale from an arbitrary percentage, clamping it into range and
    /// snapping it down to the step.
    #[must_use]
    pub fn from_percent(percent: i64) -> Self {
        let step = i64::from(FONT_SCALE_STEP);
        let clamped = percent.clamp(i64::from(FONT_SCALE_MIN), i64::from(FONT_SCALE_MAX));
        let snapped = clamped - clamped.rem_euclid(step);
        u16::try_from(snapped).map_or(Self::DEFAULT, Self)
    }

    /// Same as [`FontScale::from_percent`] for fractional input; non-finite
    /// values yield the default scale.
    #[must_use]
    pub fn from_float(percent: f64) -> Self {
        if !percent.is_finite() {
            return Self::DEFAULT;
        }
        let clamped = percent
            .clamp(f64::from(FONT_SCALE_MIN), f64::from(FONT_SCALE_MAX))
            .round();
        cast::<f64, i64>(clamped).map_or(Self::DEFAULT, Self::from_percent)
    }

    /// Scale as a whole percentage.
    #[must_use]
    pub const fn percent(self) -> u16 {
        self.0
    }

    /// One step larger, or `None` when already at the maximum.
    #[must_use]
    pub const fn checked_increase(self) -> Option<Self> {
        if self.0 >= FONT_SCALE_MAX {
            None
        } else {
            Some(Self(self.0 + FONT_SCALE_STEP))
        }
    }

    /// One step smaller, or `None` when already at the minimum.
    #[must_use]
    pub const fn checked_decrease(self) -> Option<Self> {
        if self.0 <= FONT_SCALE_MIN {
            None
        } else {
            Some(Self(self.0 - FONT_SCALE_STEP))
        }
    }

    /// CSS value for the root `font-size` property.
    #[must_use]
    pub fn css_value(self) -> String {
        self.to_string()
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FontScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl<'de> Deserialize<'de> for FontScale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Number::deserialize(deserializer)?;
        Ok(raw.as_i64().map_or_else(
            || raw.as_f64().map_or(Self::DEFAULT, Self::from_float),
            Self::from_percent,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_stops_at_bounds() {
        assert_eq!(FontScale::MAX.checked_increase(), None);
        assert_eq!(FontScale::MIN.checked_decrease(), None);
        assert_eq!(
            FontScale::DEFAULT.checked_increase().map(FontScale::percent),
            Some(110)
        );
        assert_eq!(
            FontScale::DEFAULT.checked_decrease().map(FontScale::percent),
            Some(90)
        );
    }

    #[test]
    fn arbitrary_percentages_clamp_and_snap() {
        assert_eq!(FontScale::from_percent(500).percent(), 150);
        assert_eq!(FontScale::from_percent(-20).percent(), 70);
        assert_eq!(FontScale::from_percent(137).percent(), 130);
        assert_eq!(FontScale::from_float(112.6).percent(), 110);
        assert_eq!(FontScale::from_float(f64::NAN), FontScale::DEFAULT);
    }

    #[test]
    fn deserializes_integers_and_floats() {
        let whole: FontScale = serde_json::from_str("120").unwrap();
        assert_eq!(whole.percent(), 120);
        let frac: FontScale = serde_json::from_str("89.9").unwrap();
        assert_eq!(frac.percent(), 90);
        let huge: FontScale = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(huge, FontScale::MAX);
        assert!(serde_json::from_str::<FontScale>("\"big\"").is_err());
    }

    #[test]
    fn renders_as_css_percentage() {
        assert_eq!(FontScale::from_percent(130).css_value(), "130%");
        assert_eq!(serde_json::to_string(&FontScale::DEFAULT).unwrap(), "100");
    }
}
