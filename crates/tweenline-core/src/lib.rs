//! Tweenline core (host-agnostic tween scheduler)
//!
//! Given a target object and desired end values for named properties, the
//! engine interpolates those properties over time and applies each value
//! back to the target once per display frame until the animation completes
//! or is cancelled. Targets may be plain objects (numeric fields),
//! accessor-style objects (get/set through a callable member) or visual
//! elements with style properties, optionally delegating interpolation to
//! a host compositor when the style adapter reports support.
//!
//! The host supplies a [`FrameClock`]; the engine drives all active
//! instances from that single clock, recycling finished instances through
//! an internal pool.

pub mod anim;
pub mod binding;
pub mod clock;
pub mod config;
pub mod ease;
pub mod engine;
pub mod error;
pub mod ids;
pub mod pool;
pub mod style;
pub mod target;
pub mod value;

// Re-exports for consumers (adapters)
pub use anim::{CompleteFn, TickFn};
pub use binding::{resolve, PropertyDescriptor, Strategy};
pub use clock::FrameClock;
pub use config::Config;
pub use ease::{Ease, EaseFn, IN_CUBIC, IN_OUT_CUBIC, LINEAR, OUT_CUBIC};
pub use engine::{AnimHandle, Tweener};
pub use error::StyleError;
pub use ids::{AnimId, IdAllocator};
pub use style::{parse_style_value, HostTransition, NullStyle, StyleAdapter, StyleValue};
pub use target::Tweenable;
pub use value::Value;
