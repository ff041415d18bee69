//! Style adapter trait and helpers.
//!
//! The adapter maps a semantic property name onto a target's underlying
//! style representation: it reads the current (number, unit) pair, writes a
//! computed value back, parses text values, and knows whether the host can
//! interpolate a property itself (a "host transition", in which case the
//! engine commits only the end value and performs no per-tick writes).

use serde::{Deserialize, Serialize};

use crate::error::StyleError;
use crate::target::Tweenable;

/// A numeric style value and its unit (`""` for unitless properties).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StyleValue {
    pub number: f64,
    pub unit: String,
}

impl StyleValue {
    pub fn new(number: f64, unit: impl Into<String>) -> Self {
        Self {
            number,
            unit: unit.into(),
        }
    }
}

/// Host transition declaration, installed once per `to` call that touches
/// host-interpolated properties and cleared on completion.
#[derive(Clone, Debug, PartialEq)]
pub struct HostTransition {
    pub duration_ms: f64,
    pub delay_ms: f64,
    /// Timing token of the easing in effect, when one was explicitly passed.
    pub timing: Option<&'static str>,
}

pub trait StyleAdapter {
    /// Current numeric value and unit of `prop` on `target`.
    fn read(&self, target: &dyn Tweenable, prop: &str) -> StyleValue;

    /// Write a computed value (with unit) for `prop` onto `target`.
    fn write(&self, target: &mut dyn Tweenable, prop: &str, value: &StyleValue);

    /// Parse a text value such as `"120px"` into a (number, unit) pair.
    fn parse(&self, prop: &str, raw: &str) -> Result<StyleValue, StyleError>;

    /// Unit to assume for `prop` when no other source supplies one.
    fn default_unit(&self, prop: &str) -> String;

    /// Whether the host compositor can interpolate `prop` on this target.
    fn supports_host_transition(&self, target: &dyn Tweenable, prop: &str) -> bool;

    fn begin_host_transition(&self, target: &mut dyn Tweenable, transition: &HostTransition);

    fn clear_host_transition(&self, target: &mut dyn Tweenable);
}

/// Split a raw style string into its numeric prefix and trailing unit.
/// `"50%"` -> (50, "%"), `"-12.5em"` -> (-12.5, "em"), `"0.4"` -> (0.4, "").
pub fn parse_style_value(raw: &str) -> Result<StyleValue, StyleError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(StyleError::Empty);
    }
    let pos = raw
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+')
        .unwrap_or(raw.len());
    let (num, unit) = raw.split_at(pos);
    let number: f64 = num.parse().map_err(|_| StyleError::NotNumeric {
        raw: raw.to_string(),
    })?;
    Ok(StyleValue::new(number, unit.trim()))
}

/// Style adapter for hosts without a style system: reads zero, writes
/// nowhere and never reports host-transition support. This is the default
/// adapter; engines animating plain objects never reach the style path.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullStyle;

impl StyleAdapter for NullStyle {
    fn read(&self, _target: &dyn Tweenable, prop: &str) -> StyleValue {
        StyleValue::new(0.0, self.default_unit(prop))
    }

    fn write(&self, _target: &mut dyn Tweenable, _prop: &str, _value: &StyleValue) {}

    fn parse(&self, prop: &str, raw: &str) -> Result<StyleValue, StyleError> {
        let mut value = parse_style_value(raw)?;
        if value.unit.is_empty() {
            value.unit = self.default_unit(prop);
        }
        Ok(value)
    }

    fn default_unit(&self, _prop: &str) -> String {
        "px".to_string()
    }

    fn supports_host_transition(&self, _target: &dyn Tweenable, _prop: &str) -> bool {
        false
    }

    fn begin_host_transition(&self, _target: &mut dyn Tweenable, _transition: &HostTransition) {}

    fn clear_host_transition(&self, _target: &mut dyn Tweenable) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_and_unit() {
        assert_eq!(parse_style_value("120px").unwrap(), StyleValue::new(120.0, "px"));
        assert_eq!(parse_style_value("50%").unwrap(), StyleValue::new(50.0, "%"));
        assert_eq!(parse_style_value("-12.5em").unwrap(), StyleValue::new(-12.5, "em"));
        assert_eq!(parse_style_value(" 0.4 ").unwrap(), StyleValue::new(0.4, ""));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert_eq!(parse_style_value(""), Err(StyleError::Empty));
        assert!(matches!(
            parse_style_value("auto"),
            Err(StyleError::NotNumeric { .. })
        ));
    }
}
