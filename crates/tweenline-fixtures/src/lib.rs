//! Shared test fixtures for tweenline-core: a manually driven frame clock,
//! sample targets covering every binding strategy, and a map-backed style
//! adapter. Integration tests drive the engine deterministically through
//! these instead of a real display clock.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use tweenline_core::{
    parse_style_value, FrameClock, HostTransition, StyleAdapter, StyleError, StyleValue, Tweenable,
    Tweener,
};

#[derive(Debug, Default)]
struct ClockState {
    now_ms: f64,
    pending: bool,
    requests: usize,
    cancels: usize,
}

/// Frame clock under test control. Clones share state, so tests keep one
/// clone and hand another to the engine.
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.state.borrow_mut().now_ms += ms;
    }

    pub fn set(&self, ms: f64) {
        self.state.borrow_mut().now_ms = ms;
    }

    pub fn now(&self) -> f64 {
        self.state.borrow().now_ms
    }

    /// Whether a tick request is outstanding.
    pub fn pending(&self) -> bool {
        self.state.borrow().pending
    }

    /// Total tick requests the engine has made.
    pub fn requests(&self) -> usize {
        self.state.borrow().requests
    }

    /// Total cancellations the engine has issued.
    pub fn cancels(&self) -> usize {
        self.state.borrow().cancels
    }

    /// Consume the pending request, as a host does right before invoking
    /// the tick callback. Returns false when nothing was scheduled.
    pub fn fire(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.pending {
            state.pending = false;
            true
        } else {
            false
        }
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    fn request_tick(&mut self) {
        let mut state = self.state.borrow_mut();
        state.pending = true;
        state.requests += 1;
    }

    fn cancel_tick(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.pending {
            state.pending = false;
            state.cancels += 1;
        }
    }
}

/// Advance the clock by `ms`, fire the pending request and run one tick.
/// Panics when the engine has no tick scheduled: a test stepping a stopped
/// engine is a test bug.
pub fn step(tweener: &mut Tweener, clock: &ManualClock, ms: f64) {
    clock.advance(ms);
    assert!(clock.fire(), "no tick scheduled");
    tweener.tick();
}

/// Plain data target with two numeric fields.
#[derive(Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Tweenable for Point {
    fn accessor(&mut self, _prop: &str, _arg: Option<f64>) -> Option<f64> {
        None
    }

    fn field(&self, prop: &str) -> Option<f64> {
        match prop {
            "x" => Some(self.x),
            "y" => Some(self.y),
            _ => None,
        }
    }

    fn set_field(&mut self, prop: &str, value: f64) -> bool {
        match prop {
            "x" => self.x = value,
            "y" => self.y = value,
            _ => return false,
        }
        true
    }
}

/// Accessor-style target: one combined getter/setter member named "value".
/// Every setter invocation is recorded for assertions.
#[derive(Debug, Default)]
pub struct Dial {
    value: f64,
    pub writes: Vec<f64>,
}

impl Dial {
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Tweenable for Dial {
    fn accessor(&mut self, prop: &str, arg: Option<f64>) -> Option<f64> {
        if prop != "value" {
            return None;
        }
        if let Some(v) = arg {
            self.value = v;
            self.writes.push(v);
        }
        Some(self.value)
    }

    fn field(&self, _prop: &str) -> Option<f64> {
        None
    }

    fn set_field(&mut self, _prop: &str, _value: f64) -> bool {
        false
    }
}

/// Visual element: no accessors, no fields, just a raw style bag.
#[derive(Debug, Default)]
pub struct Element {
    style: HashMap<String, String>,
}

impl Element {
    pub fn style(&self, key: &str) -> Option<&str> {
        self.style.get(key).map(String::as_str)
    }
}

impl Tweenable for Element {
    fn accessor(&mut self, _prop: &str, _arg: Option<f64>) -> Option<f64> {
        None
    }

    fn field(&self, _prop: &str) -> Option<f64> {
        None
    }

    fn set_field(&mut self, _prop: &str, _value: f64) -> bool {
        false
    }

    fn style_get(&self, key: &str) -> Option<String> {
        self.style.get(key).cloned()
    }

    fn style_set(&mut self, key: &str, value: &str) {
        self.style.insert(key.to_string(), value.to_string());
    }

    fn style_remove(&mut self, key: &str) {
        self.style.remove(key);
    }

    fn is_visual(&self) -> bool {
        true
    }
}

/// Style adapter over the [`Element`] style bag, with a property -> default
/// unit table and switchable host-transition support.
pub struct MapStyleAdapter {
    host_transitions: bool,
    units: HashMap<String, String>,
}

impl Default for MapStyleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MapStyleAdapter {
    pub fn new() -> Self {
        let mut units = HashMap::new();
        units.insert("opacity".to_string(), String::new());
        Self {
            host_transitions: false,
            units,
        }
    }

    /// Adapter for a host whose compositor interpolates style properties.
    pub fn with_host_transitions() -> Self {
        Self {
            host_transitions: true,
            ..Self::new()
        }
    }
}

impl StyleAdapter for MapStyleAdapter {
    fn read(&self, target: &dyn Tweenable, prop: &str) -> StyleValue {
        match target.style_get(prop).as_deref().map(parse_style_value) {
            Some(Ok(value)) => value,
            _ => StyleValue::new(0.0, self.default_unit(prop)),
        }
    }

    fn write(&self, target: &mut dyn Tweenable, prop: &str, value: &StyleValue) {
        target.style_set(prop, &format!("{}{}", value.number, value.unit));
    }

    fn parse(&self, prop: &str, raw: &str) -> Result<StyleValue, StyleError> {
        let mut value = parse_style_value(raw)?;
        if value.unit.is_empty() {
            value.unit = self.default_unit(prop);
        }
        Ok(value)
    }

    fn default_unit(&self, prop: &str) -> String {
        self.units
            .get(prop)
            .cloned()
            .unwrap_or_else(|| "px".to_string())
    }

    fn supports_host_transition(&self, target: &dyn Tweenable, _prop: &str) -> bool {
        self.host_transitions && target.is_visual()
    }

    fn begin_host_transition(&self, target: &mut dyn Tweenable, transition: &HostTransition) {
        let mut decl = format!("all {}ms", transition.duration_ms);
        if let Some(timing) = transition.timing {
            decl.push(' ');
            decl.push_str(timing);
        }
        if transition.delay_ms > 0.0 {
            decl.push_str(&format!(" {}ms", transition.delay_ms));
        }
        target.style_set("transition", &decl);
    }

    fn clear_host_transition(&self, target: &mut dyn Tweenable) {
        target.style_remove("transition");
    }
}
