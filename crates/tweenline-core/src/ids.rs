//! Identifiers and a simple allocator for checked-out tween instances.

use serde::{Deserialize, Serialize};

/// Registry key for one checked-out `Anim`. Pooled instances carry no id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimId(pub u32);

/// Monotonic allocator for AnimId. Ids start at 1 and are opaque externally.
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> AnimId {
        let id = AnimId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic_from_one() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc(), AnimId(1));
        assert_eq!(alloc.alloc(), AnimId(2));
        alloc.reset();
        assert_eq!(alloc.alloc(), AnimId(1));
    }
}
