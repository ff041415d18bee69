//! Anim: the tween state machine.
//!
//! One `Anim` owns a single target's in-flight animation: property
//! descriptors, timing (total duration, elapsed, delay-before, delay-after),
//! the easing function and callback registrations. Instances live in the
//! engine's registry while checked out and in the pool otherwise; the
//! engine drives `advance` once per render pass.
//!
//! States: Idle (pooled, no id) -> Pending (configured, registered,
//! delay-before pending) -> Running -> Completing (delay-after drain) ->
//! Idle again, or Retained-Idle when the instance is marked to persist.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::binding::{self, resolve, PropertyDescriptor, Strategy};
use crate::ease::Ease;
use crate::engine::Tweener;
use crate::ids::AnimId;
use crate::style::{HostTransition, StyleAdapter};
use crate::target::Tweenable;
use crate::value::Value;

/// Tick callback: invoked once per render pass, in registration order,
/// with whatever arguments it captured at registration time.
pub type TickFn = Box<dyn FnMut()>;

/// Completion callback: deferred one scheduling quantum past the tick that
/// completed the tween, and handed the engine so it may start new tweens.
pub type CompleteFn = Box<dyn FnOnce(&mut Tweener)>;

/// Verdict of one per-tick advance.
pub(crate) enum Advance {
    Running,
    /// The tween finished this pass; callbacks are snapshotted and the
    /// instance is already internally settled.
    Complete(Vec<CompleteFn>),
}

pub struct Anim {
    /// Registry key; `None` while pooled.
    pub(crate) id: Option<AnimId>,
    /// Caller-owned target. Dropped on release so pooled instances retain
    /// no caller references.
    pub(crate) target: Option<Rc<RefCell<dyn Tweenable>>>,
    pub(crate) duration: f64,
    pub(crate) elapsed: f64,
    pub(crate) delay_before: f64,
    pub(crate) delay_after: f64,
    pub(crate) properties: HashMap<String, PropertyDescriptor>,
    pub(crate) ease: Ease,
    pub(crate) tick_callbacks: Vec<TickFn>,
    pub(crate) complete_callbacks: Vec<CompleteFn>,
    pub(crate) keep: bool,
    pub(crate) is_running: bool,
    pub(crate) is_complete: bool,
    pub(crate) using_host_transition: bool,
}

impl Default for Anim {
    fn default() -> Self {
        Self::new()
    }
}

impl Anim {
    pub(crate) fn new() -> Self {
        Self {
            id: None,
            target: None,
            duration: 0.0,
            elapsed: 0.0,
            delay_before: 0.0,
            delay_after: 0.0,
            properties: HashMap::new(),
            ease: Ease::default(),
            tick_callbacks: Vec::new(),
            complete_callbacks: Vec::new(),
            keep: false,
            is_running: false,
            is_complete: false,
            using_host_transition: false,
        }
    }

    /// Reset transient animation state, keeping id/target/keep. This is the
    /// deregistration reset: a retained instance ends up Retained-Idle,
    /// ready to be reconfigured.
    pub(crate) fn clear_transient(&mut self) {
        self.duration = 0.0;
        self.elapsed = 0.0;
        self.delay_before = 0.0;
        self.delay_after = 0.0;
        self.properties.clear();
        self.ease = Ease::default();
        self.tick_callbacks.clear();
        self.complete_callbacks.clear();
        self.is_running = false;
        self.is_complete = false;
        self.using_host_transition = false;
    }

    /// Full reset back to as-constructed state, for return to the pool.
    pub(crate) fn reset(&mut self) {
        self.clear_transient();
        self.id = None;
        self.target = None;
        self.keep = false;
    }

    /// Rebuild descriptors for a `to` call. Elapsed restarts at zero; a
    /// pending delay-before is folded into the total duration. Style
    /// properties the host can interpolate are committed immediately under
    /// a transition declaration installed once per call.
    pub(crate) fn configure(
        &mut self,
        props: &[(&str, Value)],
        duration_ms: Option<f64>,
        ease: Option<Ease>,
        adapter: &dyn StyleAdapter,
        default_duration_ms: f64,
    ) {
        let explicit_ease = ease.is_some();
        if let Some(e) = ease {
            self.ease = e;
        }
        let duration = duration_ms.unwrap_or(default_duration_ms);
        self.duration = self.delay_before.max(0.0) + duration;
        self.elapsed = 0.0;
        self.is_complete = false;
        self.properties.clear();
        self.using_host_transition = false;

        let target = match &self.target {
            Some(t) => Rc::clone(t),
            None => return,
        };
        let mut target = target.borrow_mut();

        for (name, desired) in props {
            let mut descriptor = resolve(&mut *target, adapter, name, desired);
            if descriptor.strategy == Strategy::HostTransition {
                if !self.using_host_transition {
                    adapter.begin_host_transition(
                        &mut *target,
                        &HostTransition {
                            duration_ms: self.duration,
                            delay_ms: self.delay_before,
                            timing: if explicit_ease { self.ease.css } else { None },
                        },
                    );
                    self.using_host_transition = true;
                }
                adapter.write(
                    &mut *target,
                    name,
                    &binding::style_value(&descriptor, descriptor.end),
                );
                descriptor.current = descriptor.end;
            }
            self.properties.insert(name.to_string(), descriptor);
        }
    }

    /// Advance by this tick's elapsed delta. Runs to completion before any
    /// other instance is touched; nothing suspends mid-advance.
    pub(crate) fn advance(
        &mut self,
        delta: f64,
        adapter: &dyn StyleAdapter,
        frame_interval_ms: f64,
    ) -> Advance {
        self.elapsed += delta;
        // Interpolation time never exceeds the total duration.
        let dur = self.elapsed.min(self.duration);

        if self.delay_before > 0.0 {
            self.delay_before -= delta;
            // Snap a sub-frame remainder to zero; variable frame deltas
            // never land on exactly zero otherwise.
            if self.delay_before < frame_interval_ms {
                self.delay_before = 0.0;
            }
        }

        if !self.is_complete && self.delay_before <= 0.0 {
            if let Some(target) = self.target.clone() {
                let mut target = target.borrow_mut();
                let ease = self.ease;
                let duration = self.duration;
                for (name, p) in self.properties.iter_mut() {
                    if p.strategy == Strategy::HostTransition {
                        continue;
                    }
                    let start = p.start;
                    let delta_v = p.end - start;
                    let value = (ease.f)(dur, start, delta_v, duration);
                    p.current = value;
                    match p.strategy {
                        Strategy::Accessor => {
                            target.accessor(name, Some(value));
                        }
                        Strategy::Field => {
                            target.set_field(name, value);
                        }
                        Strategy::ManualStyle => {
                            adapter.write(&mut *target, name, &binding::style_value(p, value));
                        }
                        Strategy::HostTransition => unreachable!(),
                    }
                }
            }
        }

        // Tick callbacks run after property writes, in registration order.
        // The target borrow is released first: callbacks commonly share it.
        for callback in self.tick_callbacks.iter_mut() {
            callback();
        }

        if self.elapsed >= self.duration {
            self.is_complete = true;
            if self.delay_after > 0.0 {
                // Fold the after-delay into the duration exactly once; the
                // completion pass repeats at the extended boundary.
                self.duration += self.delay_after;
                self.delay_after = 0.0;
            } else {
                if self.using_host_transition {
                    if let Some(target) = self.target.clone() {
                        adapter.clear_host_transition(&mut *target.borrow_mut());
                    }
                    self.using_host_transition = false;
                }
                let callbacks = std::mem::take(&mut self.complete_callbacks);
                self.tick_callbacks.clear();
                self.properties.clear();
                return Advance::Complete(callbacks);
            }
        }

        Advance::Running
    }
}
