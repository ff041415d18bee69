//! Instance pool.
//!
//! Bounds allocation churn under sustained animation load: released
//! instances are fully reset and reused by the next `animate` call.
//! Releases beyond `pool_cap` drop the instance instead of growing the
//! pool without limit.

use crate::anim::Anim;

#[derive(Default)]
pub struct Pool {
    idle: Vec<Anim>,
    cap: usize,
}

impl Pool {
    pub fn new(initial: usize, cap: usize) -> Self {
        let mut idle = Vec::with_capacity(initial.min(cap));
        for _ in 0..initial.min(cap) {
            idle.push(Anim::new());
        }
        Self { idle, cap }
    }

    /// Hand out a fresh-state instance, preferring a pooled one.
    pub fn acquire(&mut self) -> Anim {
        self.idle.pop().unwrap_or_default()
    }

    /// Reset and return an instance. A recycled instance is
    /// indistinguishable from a newly constructed one.
    pub fn release(&mut self, mut anim: Anim) {
        if self.idle.len() < self.cap {
            anim.reset();
            self.idle.push(anim);
        }
    }

    pub fn len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_prefers_pooled_instances() {
        let mut pool = Pool::new(2, 4);
        assert_eq!(pool.len(), 2);
        let a = pool.acquire();
        assert_eq!(pool.len(), 1);
        pool.release(a);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn release_beyond_cap_drops() {
        let mut pool = Pool::new(0, 1);
        pool.release(Anim::new());
        pool.release(Anim::new());
        assert_eq!(pool.len(), 1);
    }
}
