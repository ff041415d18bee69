//! Tweener: registry, render loop and public control surface.
//!
//! The engine is an explicit process-scoped state object (injectable for
//! testing, never a module-scope singleton). It owns the active-instance
//! registry, the instance pool, the style adapter, the frame clock and the
//! deferred-callback queue. All scheduling is single-threaded and
//! cooperative: the host's frame clock fires, the host calls `tick`, and
//! one render pass advances every running instance by the wall-clock delta
//! since the previous pass.
//!
//! Completion callbacks are not invoked inside the render pass. They are
//! queued and drained strictly after the pass finishes, so a callback that
//! re-enters the engine (e.g. starting a new tween on the same target)
//! never observes transient cleanup state or corrupts the pass iteration.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::anim::{Advance, Anim, CompleteFn};
use crate::binding;
use crate::clock::FrameClock;
use crate::config::Config;
use crate::ease::Ease;
use crate::ids::{AnimId, IdAllocator};
use crate::pool::Pool;
use crate::style::{NullStyle, StyleAdapter};
use crate::target::Tweenable;
use crate::value::Value;

pub struct Tweener {
    cfg: Config,
    ids: IdAllocator,
    /// All checked-out instances, running or retained-idle, keyed by id.
    anims: HashMap<AnimId, Anim>,
    /// Number of registered (running) instances. Never negative.
    active: usize,
    pool: Pool,
    adapter: Box<dyn StyleAdapter>,
    clock: Box<dyn FrameClock>,
    /// Completion callbacks awaiting the next scheduling quantum.
    deferred: Vec<CompleteFn>,
    /// Whether a frame-clock subscription is live.
    running: bool,
    last_ms: f64,
}

impl Tweener {
    /// Engine with no style system; style-less hosts animate accessors and
    /// fields only.
    pub fn new(cfg: Config, clock: Box<dyn FrameClock>) -> Self {
        Self::with_adapter(cfg, clock, Box::new(NullStyle))
    }

    pub fn with_adapter(
        cfg: Config,
        clock: Box<dyn FrameClock>,
        adapter: Box<dyn StyleAdapter>,
    ) -> Self {
        Self {
            pool: Pool::new(cfg.pool_size, cfg.pool_cap),
            cfg,
            ids: IdAllocator::new(),
            anims: HashMap::new(),
            active: 0,
            adapter,
            clock,
            deferred: Vec::new(),
            running: false,
            last_ms: 0.0,
        }
    }

    /// Check an instance out of the pool, bound to `target`. Set `keep` to
    /// retain the instance across completions instead of recycling it.
    pub fn animate(&mut self, target: Rc<RefCell<dyn Tweenable>>, keep: bool) -> AnimHandle<'_> {
        let mut anim = self.pool.acquire();
        let id = self.ids.alloc();
        anim.id = Some(id);
        anim.target = Some(target);
        anim.keep = keep;
        self.anims.insert(id, anim);
        log::trace!("anim {id:?} checked out (keep={keep})");
        AnimHandle { tweener: self, id }
    }

    /// Re-acquire a control handle for a checked-out instance.
    pub fn anim(&mut self, id: AnimId) -> Option<AnimHandle<'_>> {
        if self.anims.contains_key(&id) {
            Some(AnimHandle { tweener: self, id })
        } else {
            None
        }
    }

    /// Animate from existing values to `props` over `duration_ms`
    /// (default when `None`). Re-configuring before completion replaces all
    /// descriptors and restarts elapsed time without a second registration.
    pub fn to(
        &mut self,
        id: AnimId,
        props: &[(&str, Value)],
        duration_ms: Option<f64>,
        ease: Option<Ease>,
    ) {
        let Some(anim) = self.anims.get_mut(&id) else {
            return;
        };
        anim.configure(
            props,
            duration_ms,
            ease,
            &*self.adapter,
            self.cfg.default_duration_ms,
        );
        self.register(id);
    }

    /// Delay the start (not yet running: extends the total duration and
    /// gates property writes) or the completion (running: drained once the
    /// original duration elapses) of an animation.
    pub fn delay(&mut self, id: AnimId, duration_ms: f64) {
        if duration_ms <= 0.0 {
            return;
        }
        let Some(anim) = self.anims.get_mut(&id) else {
            return;
        };
        if !anim.is_running {
            anim.duration += duration_ms;
            anim.delay_before = duration_ms;
            self.register(id);
        } else {
            anim.delay_after = duration_ms;
        }
    }

    /// Current interpolated value of `prop`, or `None` when the instance is
    /// not active or does not animate that property.
    pub fn get_property(&self, id: AnimId, prop: &str) -> Option<f64> {
        let anim = self.anims.get(&id)?;
        if !anim.is_running {
            return None;
        }
        anim.properties.get(prop).map(|p| p.current)
    }

    /// Redirect a running tween's end value mid-flight. Interpolation keeps
    /// the original start and elapsed time, so the value curve bends toward
    /// the new end without re-baselining (a velocity discontinuity the
    /// source behavior exhibits on purpose). Host-transition descriptors
    /// re-commit immediately so the compositor retargets too.
    pub fn set_property(&mut self, id: AnimId, prop: &str, value: Value) {
        let Some(anim) = self.anims.get_mut(&id) else {
            return;
        };
        if !anim.is_running {
            return;
        }
        let Some(descriptor) = anim.properties.get_mut(prop) else {
            return;
        };
        match &value {
            Value::Number(n) => descriptor.end = *n,
            Value::Text(raw) => match self.adapter.parse(prop, raw) {
                Ok(parsed) => {
                    descriptor.end = parsed.number;
                    descriptor.unit = parsed.unit;
                }
                Err(_) => {
                    if let Some(n) = value.as_number() {
                        descriptor.end = n;
                    } else {
                        return;
                    }
                }
            },
        }
        if descriptor.strategy == binding::Strategy::HostTransition {
            descriptor.current = descriptor.end;
            let committed = binding::style_value(descriptor, descriptor.end);
            if let Some(target) = anim.target.clone() {
                self.adapter
                    .write(&mut *target.borrow_mut(), prop, &committed);
            }
        }
    }

    /// Append a tick callback; all registrations run each pass, in order.
    pub fn on_tick(&mut self, id: AnimId, callback: impl FnMut() + 'static) {
        if let Some(anim) = self.anims.get_mut(&id) {
            anim.tick_callbacks.push(Box::new(callback));
        }
    }

    /// Append a completion callback; invoked once, one scheduling quantum
    /// after the tick that completed the tween.
    pub fn on_complete(&mut self, id: AnimId, callback: impl FnOnce(&mut Tweener) + 'static) {
        if let Some(anim) = self.anims.get_mut(&id) {
            anim.complete_callbacks.push(Box::new(callback));
        }
    }

    /// Stop a tween: retained instances deregister and settle to
    /// Retained-Idle; everything else is released back to the pool.
    pub fn stop(&mut self, id: AnimId) {
        let keep = match self.anims.get(&id) {
            Some(anim) => anim.keep,
            None => return,
        };
        if keep {
            self.deregister(id);
        } else {
            self.destroy(id);
        }
    }

    /// Release an instance back to the pool regardless of its retain flag.
    /// The caller's id is dead afterwards.
    pub fn destroy(&mut self, id: AnimId) {
        let Some(mut anim) = self.anims.remove(&id) else {
            return;
        };
        if anim.is_running {
            anim.is_running = false;
            self.active -= 1;
            self.stop_loop_if_idle();
        }
        log::trace!("anim {id:?} destroyed; {} active", self.active);
        self.pool.release(anim);
    }

    /// Host entry point for a fired frame-clock tick: computes the
    /// wall-clock delta since the previous pass and runs one render pass.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        let delta = now - self.last_ms;
        self.last_ms = now;
        self.render(delta);
    }

    /// One render pass: advance every running instance by `delta`
    /// milliseconds, re-request the clock iff still running, then drain
    /// deferred completion callbacks. Iteration order is unspecified.
    pub fn render(&mut self, delta: f64) {
        let ids: Vec<AnimId> = self
            .anims
            .iter()
            .filter(|(_, anim)| anim.is_running)
            .map(|(id, _)| *id)
            .collect();

        for id in ids {
            let verdict = {
                let Some(anim) = self.anims.get_mut(&id) else {
                    continue;
                };
                if !anim.is_running {
                    continue;
                }
                anim.advance(delta, &*self.adapter, self.cfg.frame_interval_ms)
            };
            if let Advance::Complete(callbacks) = verdict {
                // Deregister/recycle before the callbacks ever run, so a
                // re-entrant callback sees a settled instance.
                let keep = self.anims.get(&id).map(|a| a.keep).unwrap_or(false);
                if keep {
                    self.deregister(id);
                } else {
                    self.destroy(id);
                }
                self.deferred.extend(callbacks);
            }
        }

        if self.running {
            self.clock.request_tick();
        }

        let tasks = std::mem::take(&mut self.deferred);
        for callback in tasks {
            callback(self);
        }
    }

    /// Add to the render loop; the first registration starts the
    /// frame-clock subscription.
    fn register(&mut self, id: AnimId) {
        let Some(anim) = self.anims.get_mut(&id) else {
            return;
        };
        if anim.is_running {
            return;
        }
        anim.is_running = true;
        self.active += 1;
        log::trace!("anim {id:?} registered; {} active", self.active);
        if !self.running {
            self.running = true;
            self.last_ms = self.clock.now_ms();
            self.clock.request_tick();
            log::debug!("frame loop started");
        }
    }

    /// Remove from the render loop, resetting transient state but keeping
    /// the id/target binding. Deregistering the last active instance
    /// cancels the frame-clock subscription.
    fn deregister(&mut self, id: AnimId) {
        let Some(anim) = self.anims.get_mut(&id) else {
            return;
        };
        if !anim.is_running {
            return;
        }
        anim.clear_transient();
        self.active -= 1;
        log::trace!("anim {id:?} deregistered; {} active", self.active);
        self.stop_loop_if_idle();
    }

    fn stop_loop_if_idle(&mut self) {
        if self.active == 0 && self.running {
            self.running = false;
            self.clock.cancel_tick();
            log::debug!("frame loop stopped");
        }
    }

    /// Whether the instance is currently registered in the render loop.
    pub fn is_active(&self, id: AnimId) -> bool {
        self.anims.get(&id).map(|a| a.is_running).unwrap_or(false)
    }

    /// Whether the instance is checked out (active or retained-idle).
    pub fn is_checked_out(&self, id: AnimId) -> bool {
        self.anims.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Whether a frame-clock subscription is live.
    pub fn is_ticking(&self) -> bool {
        self.running
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }
}

/// Fluent control surface over one checked-out instance. Chain
/// configuration calls and drop the handle; the id stays valid for later
/// control via [`Tweener::anim`].
pub struct AnimHandle<'t> {
    tweener: &'t mut Tweener,
    id: AnimId,
}

impl<'t> AnimHandle<'t> {
    pub fn id(&self) -> AnimId {
        self.id
    }

    pub fn to(
        self,
        props: &[(&str, Value)],
        duration_ms: Option<f64>,
        ease: Option<Ease>,
    ) -> Self {
        self.tweener.to(self.id, props, duration_ms, ease);
        self
    }

    pub fn delay(self, duration_ms: f64) -> Self {
        self.tweener.delay(self.id, duration_ms);
        self
    }

    pub fn get_property(&self, prop: &str) -> Option<f64> {
        self.tweener.get_property(self.id, prop)
    }

    pub fn set_property(self, prop: &str, value: impl Into<Value>) -> Self {
        self.tweener.set_property(self.id, prop, value.into());
        self
    }

    pub fn on_tick(self, callback: impl FnMut() + 'static) -> Self {
        self.tweener.on_tick(self.id, callback);
        self
    }

    pub fn on_complete(self, callback: impl FnOnce(&mut Tweener) + 'static) -> Self {
        self.tweener.on_complete(self.id, callback);
        self
    }

    pub fn stop(self) {
        self.tweener.stop(self.id);
    }

    /// Destroy the instance; the handle (and its id) must be discarded.
    pub fn destroy(self) {
        self.tweener.destroy(self.id);
    }
}
