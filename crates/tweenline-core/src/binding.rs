//! Binding resolver.
//!
//! Classifies each (target, property, desired value) triple into one of four
//! interpolation strategies, producing the per-property descriptor the
//! per-tick update loop consumes. Classification happens once, in `to`;
//! the hot path only matches on the resulting tag.
//!
//! Order of precedence: accessor member, then plain field, then style.
//! A name matching both an accessor and a field resolves to the accessor.

use serde::{Deserialize, Serialize};

use crate::style::{StyleAdapter, StyleValue};
use crate::target::Tweenable;
use crate::value::Value;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    /// Read/written by invoking an accessor member.
    Accessor,
    /// Read/written through a plain field.
    Field,
    /// Style property the engine interpolates and writes every tick.
    ManualStyle,
    /// Style property committed once; the host compositor interpolates.
    HostTransition,
}

/// Per-property bookkeeping within an `Anim`. For manual strategies
/// `current` tracks the host-visible value; for `HostTransition` it holds
/// the committed target instead of a per-frame snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    pub start: f64,
    pub current: f64,
    pub end: f64,
    pub unit: String,
    pub strategy: Strategy,
}

/// Resolve one property binding. Never fails: an unrecognized name falls
/// through to the style path, and unparseable values degrade to the current
/// value (a no-op tween for that property) rather than aborting.
pub fn resolve(
    target: &mut dyn Tweenable,
    adapter: &dyn StyleAdapter,
    prop: &str,
    desired: &Value,
) -> PropertyDescriptor {
    if let Some(start) = target.accessor(prop, None) {
        return PropertyDescriptor {
            start,
            current: start,
            end: desired.as_number().unwrap_or(start),
            unit: String::new(),
            strategy: Strategy::Accessor,
        };
    }

    if let Some(start) = target.field(prop) {
        return PropertyDescriptor {
            start,
            current: start,
            end: desired.as_number().unwrap_or(start),
            unit: String::new(),
            strategy: Strategy::Field,
        };
    }

    let observed = adapter.read(&*target, prop);
    let (end, unit) = match desired {
        // Text carries its own unit; the parsed unit wins.
        Value::Text(raw) => match adapter.parse(prop, raw) {
            Ok(parsed) => (parsed.number, parsed.unit),
            Err(_) => (
                raw.trim().parse().unwrap_or(observed.number),
                adapter.default_unit(prop),
            ),
        },
        // Plain numbers reuse the currently observed unit.
        Value::Number(n) => (*n, observed.unit.clone()),
    };

    let strategy = if adapter.supports_host_transition(&*target, prop) {
        Strategy::HostTransition
    } else {
        Strategy::ManualStyle
    };

    PropertyDescriptor {
        start: observed.number,
        current: observed.number,
        end,
        unit,
        strategy,
    }
}

/// Convenience for the manual-style write path.
#[inline]
pub(crate) fn style_value(descriptor: &PropertyDescriptor, number: f64) -> StyleValue {
    StyleValue::new(number, descriptor.unit.as_str())
}
