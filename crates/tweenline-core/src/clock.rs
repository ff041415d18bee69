//! Frame clock trait.
//!
//! The host supplies the clock: `request_tick` asks it to run the scheduler
//! once "soon" (ideally next display refresh; no interval is guaranteed),
//! after which the host calls [`Tweener::tick`](crate::engine::Tweener::tick).
//! The engine re-requests after each pass while any instance is active and
//! cancels when the last one deregisters, so an idle engine never polls.

pub trait FrameClock {
    /// Current wall-clock time in milliseconds.
    fn now_ms(&self) -> f64;

    /// Schedule one tick callback.
    fn request_tick(&mut self);

    /// Revoke a pending tick request, if any.
    fn cancel_tick(&mut self);
}
