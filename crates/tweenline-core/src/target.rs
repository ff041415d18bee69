//! Target trait: what the engine needs from an animated object.
//!
//! A target exposes up to three surfaces, probed in this order by the
//! binding resolver:
//! - accessor members (a callable that reads with no argument and writes
//!   with one), the getter/setter idiom of the source hosts;
//! - plain numeric fields;
//! - a raw style bag, present only on visual elements. Style values are
//!   opaque text here; a [`StyleAdapter`](crate::style::StyleAdapter) owns
//!   parsing, units and host-transition knowledge.
//!
//! Non-visual targets keep the style defaults and never see style traffic.

pub trait Tweenable {
    /// Invoke an accessor member. `arg: None` reads, `Some(v)` writes and
    /// returns the new value. `None` means `prop` is not an accessor.
    fn accessor(&mut self, prop: &str, arg: Option<f64>) -> Option<f64>;

    /// Read a plain field. `None` means the target has no such field.
    fn field(&self, prop: &str) -> Option<f64>;

    /// Write a plain field. Returns false when the target has no such field.
    fn set_field(&mut self, prop: &str, value: f64) -> bool;

    /// Raw style storage, keyed by host style name.
    fn style_get(&self, key: &str) -> Option<String> {
        let _ = key;
        None
    }

    fn style_set(&mut self, key: &str, value: &str) {
        let _ = (key, value);
    }

    fn style_remove(&mut self, key: &str) {
        let _ = key;
    }

    /// Whether this target is a visual element with a live style bag.
    fn is_visual(&self) -> bool {
        false
    }
}
