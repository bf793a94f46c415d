//! Bookkeeping for the bounded floating-emoji population.

use std::collections::VecDeque;

/// Maximum simultaneously-live floating elements.
pub const POOL_CAPACITY: usize = 10;

/// How far above the container's top edge an oversized element may
/// protrude, in pixels.
pub const MAX_TOP_OVERFLOW_PX: f64 = 16.0;

/// Insertion-ordered set of live floating-element ids.
///
/// The DOM owns the elements themselves; this tracks which ids are
/// alive so the oldest can be evicted when the population is full.
#[derive(Debug)]
pub struct FloatingPool {
    live: VecDeque<u64>,
    capacity: usize,
}

impl Default for FloatingPool {
    fn default() -> Self {
        Self::new(POOL_CAPACITY)
    }
}

impl FloatingPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            live: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Registers a new element. Returns the evicted oldest id when the
    /// pool was already at capacity.
    pub fn insert(&mut self, id: u64) -> Option<u64> {
        let evicted = if self.live.len() >= self.capacity {
            self.live.pop_front()
        } else {
            None
        };
        self.live.push_back(id);
        evicted
    }

    /// Drops an id when its animation finishes (or it was evicted).
    pub fn remove(&mut self, id: u64) {
        self.live.retain(|&x| x != id);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Picks a vertical offset for a floating element.
///
/// `rand01` is a uniform sample in [0, 1). When the element fits, the
/// offset is uniform over the free span. When it is taller than the
/// container it is centered instead, with the resulting negative
/// offset clamped to [`MAX_TOP_OVERFLOW_PX`] above the top edge.
pub fn vertical_offset(container_height: f64, element_height: f64, rand01: f64) -> f64 {
    let span = container_height - element_height;
    if span < 0.0 {
        (span / 2.0).max(-MAX_TOP_OVERFLOW_PX)
    } else {
        (rand01 * span).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_never_exceeds_capacity() {
        let mut pool = FloatingPool::new(3);
        for id in 0..10 {
            pool.insert(id);
            assert!(pool.len() <= 3);
        }
    }

    #[test]
    fn test_pool_evicts_oldest_first() {
        let mut pool = FloatingPool::new(2);
        assert_eq!(pool.insert(1), None);
        assert_eq!(pool.insert(2), None);
        assert_eq!(pool.insert(3), Some(1));
        assert_eq!(pool.insert(4), Some(2));
    }

    #[test]
    fn test_pool_remove_frees_a_slot() {
        let mut pool = FloatingPool::new(2);
        pool.insert(1);
        pool.insert(2);
        pool.remove(1);
        assert_eq!(pool.insert(3), None);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_offset_uniform_within_span() {
        assert_eq!(vertical_offset(100.0, 24.0, 0.0), 0.0);
        assert_eq!(vertical_offset(100.0, 24.0, 0.5), 38.0);
        assert!(vertical_offset(100.0, 24.0, 0.999) <= 76.0);
    }

    #[test]
    fn test_oversized_element_centers_with_clamped_overflow() {
        // slightly oversized: centered
        assert_eq!(vertical_offset(20.0, 24.0, 0.5), -2.0);
        // grossly oversized: clamped near the top edge
        assert_eq!(vertical_offset(20.0, 200.0, 0.5), -MAX_TOP_OVERFLOW_PX);
    }
}
