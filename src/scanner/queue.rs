//! Shared port work queue.

use crate::types::{Port, PortRange};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ordered set of ports still waiting for a probe.
///
/// Every port pushed by [`populate`](Self::populate) is handed out by exactly one
/// [`try_dequeue`](Self::try_dequeue) call, no matter how many workers drain the
/// queue concurrently. Dequeueing never waits for more work: an empty queue
/// returns `None` immediately.
#[derive(Debug, Default)]
pub struct WorkQueue {
    pending: Mutex<VecDeque<Port>>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue already holding every port of `range`.
    pub fn from_range(range: PortRange) -> Self {
        let queue = Self::new();
        queue.populate(range);
        queue
    }

    /// Append every port of `range`, ascending.
    ///
    /// Must finish before any worker starts draining.
    pub fn populate(&self, range: PortRange) {
        let mut pending = self.lock();
        pending.reserve(range.len());
        pending.extend(range.iter());
    }

    /// Take the next pending port, if any.
    pub fn try_dequeue(&self) -> Option<Port> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the deque half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Port>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_populate_is_ascending_and_inclusive() {
        let queue = WorkQueue::from_range(PortRange::from_bounds(79, 81).unwrap());
        assert_eq!(queue.len(), 3);
        let drained: Vec<u16> = std::iter::from_fn(|| queue.try_dequeue())
            .map(Port::as_u16)
            .collect();
        assert_eq!(drained, vec![79, 80, 81]);
    }

    #[test]
    fn test_empty_queue_returns_none() {
        let queue = WorkQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.try_dequeue(), None);
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn test_concurrent_drain_is_exactly_once() {
        let range = PortRange::from_bounds(1, 20_000).unwrap();
        let queue = Arc::new(WorkQueue::from_range(range));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut taken = Vec::new();
                    while let Some(port) = queue.try_dequeue() {
                        taken.push(port.as_u16());
                    }
                    taken
                })
            })
            .collect();

        let mut all: Vec<u16> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();

        let expected: Vec<u16> = (1..=20_000).collect();
        assert_eq!(all, expected);
        assert!(queue.is_empty());
    }
}
