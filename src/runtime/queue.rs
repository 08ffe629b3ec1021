//! Action queue: Cross-thread FIFO drained by the loop thread.
//!
//! Producers on any thread append through a [`QueueHandle`]; the loop owns
//! the [`ActionQueue`] and removes one entry at a time. Removal never blocks,
//! and an entry is out of the queue before the caller runs it.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// FIFO of pending work, consumed on the loop thread.
pub struct ActionQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> ActionQueue<T> {
    /// Create an empty, unbounded queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Append an entry. Never blocks.
    #[inline]
    pub fn push(&self, item: T) {
        // The queue holds its own receiver, so the channel cannot be
        // disconnected while `self` is alive.
        let _ = self.tx.send(item);
    }

    /// Scheduling hint: `true` if nothing is queued right now.
    ///
    /// A concurrent push may land right after this returns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Number of queued entries at this instant.
    #[inline]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Remove the oldest entry, or `None` if the queue is empty.
    #[inline]
    pub fn pop_front(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// A producer handle that can be moved to other threads.
    pub fn handle(&self) -> QueueHandle<T> {
        QueueHandle {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Default for ActionQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ActionQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionQueue")
            .field("len", &self.len())
            .finish()
    }
}

/// Producer side of an [`ActionQueue`].
pub struct QueueHandle<T> {
    tx: Sender<T>,
}

impl<T> QueueHandle<T> {
    /// Append an entry.
    ///
    /// Returns `false` if the queue has been dropped; the entry is discarded.
    #[inline]
    pub fn push(&self, item: T) -> bool {
        self.tx.send(item).is_ok()
    }
}

impl<T> Clone for QueueHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> std::fmt::Debug for QueueHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = ActionQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop_front(), Some(1));
        assert_eq!(queue.pop_front(), Some(2));
        assert_eq!(queue.pop_front(), Some(3));
        assert_eq!(queue.pop_front(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_handle_pushes_from_other_threads() {
        let queue = ActionQueue::new();
        let workers: Vec<_> = (0..4)
            .map(|id| {
                let handle = queue.handle();
                thread::spawn(move || {
                    for n in 0..100 {
                        assert!(handle.push((id, n)));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(queue.len(), 400);
        let mut last = [None::<i32>; 4];
        while let Some((id, n)) = queue.pop_front() {
            // Per-producer order is preserved.
            assert!(last[id].map_or(true, |prev| prev < n));
            last[id] = Some(n);
        }
        assert!(last.iter().all(|n| *n == Some(99)));
    }

    #[test]
    fn test_push_after_drop_is_discarded() {
        let queue = ActionQueue::new();
        let handle = queue.handle();
        drop(queue);
        assert!(!handle.push(42));
    }

    #[test]
    fn test_boxed_closures() {
        let queue: ActionQueue<Box<dyn FnOnce(&mut Vec<u8>) + Send>> = ActionQueue::new();
        queue.handle().push(Box::new(|log| log.push(1)));
        queue.push(Box::new(|log| log.push(2)));

        let mut log = Vec::new();
        while let Some(action) = queue.pop_front() {
            action(&mut log);
        }
        assert_eq!(log, vec![1, 2]);
    }
}
