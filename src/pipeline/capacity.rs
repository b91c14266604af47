//! Counting semaphore bounding concurrent ffmpeg processes
//!
//! A bounded channel holds one message per occupied slot: sending acquires,
//! receiving releases. Acquisition races against cancellation.

use super::cancel::CancellationToken;
use crossbeam_channel::{bounded, select, Receiver, Sender};

/// Fixed-size pool of execution slots
#[derive(Debug)]
pub struct CapacityPool {
    acquire: Sender<()>,
    release: Receiver<()>,
    capacity: usize,
}

/// An occupied slot, freed on drop
#[derive(Debug)]
pub struct SlotGuard<'a> {
    pool: &'a CapacityPool,
}

impl CapacityPool {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (acquire, release) = bounded(capacity);
        Self {
            acquire,
            release,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently held
    pub fn in_use(&self) -> usize {
        self.release.len()
    }

    /// Block until a slot is free or `cancel` fires.
    ///
    /// Returns `None` when cancelled, including when cancellation was already
    /// signalled or lands while a slot was being granted.
    pub fn acquire(&self, cancel: &CancellationToken) -> Option<SlotGuard<'_>> {
        if cancel.is_cancelled() {
            return None;
        }

        let granted = select! {
            send(self.acquire, ()) -> res => res.is_ok(),
            recv(cancel.receiver()) -> _ => false,
        };
        if !granted {
            return None;
        }

        let guard = SlotGuard { pool: self };
        if cancel.is_cancelled() {
            // Dropping the guard hands the slot back
            return None;
        }
        Some(guard)
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        let _ = self.pool.release.try_recv();
    }
}
