// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! ## Overview
//!
//! UI interactions such as long-press deadlines and double-tap windows need
//! timers, but a reusable interaction crate cannot assume a clock. This crate
//! provides a [`TimerQueue`]: the host supplies monotonic millisecond
//! timestamps (on input samples, vsync ticks, or an idle loop) and drains
//! whatever became due. Nothing here blocks, sleeps, or reads a clock.
//!
//! ## Ordering
//!
//! Expired entries drain in deadline order. Entries sharing a deadline drain
//! in scheduling order, so a queue doubles as a FIFO for same-tick work.
//!
//! ## Minimal example
//!
//! ```
//! use thicket_timing::TimerQueue;
//!
//! let mut timers: TimerQueue<&str> = TimerQueue::new();
//! let press = timers.schedule(300, "long-press");
//! timers.schedule(200, "double-tap window");
//!
//! // Nothing is due yet at t=100.
//! assert_eq!(timers.pop_expired(100), None);
//! assert_eq!(timers.next_deadline(), Some(200));
//!
//! // The double-tap window fires first, the long-press deadline after.
//! assert_eq!(timers.pop_expired(300).map(|(_, p)| p), Some("double-tap window"));
//! assert_eq!(timers.pop_expired(300).map(|(_, p)| p), Some("long-press"));
//! assert!(timers.is_empty());
//!
//! // Cancelling a handle that already fired is a no-op.
//! assert!(!timers.cancel(press));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Identity of one scheduled timer.
///
/// Returned by [`TimerQueue::schedule`] and used to [`cancel`](TimerQueue::cancel)
/// before expiry. Handles are never reused by the queue that issued them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct TimerEntry<T> {
    handle: TimerHandle,
    deadline: u64,
    payload: T,
}

/// A deadline-ordered queue of pending timers.
///
/// ## Usage
///
/// - [`schedule`](Self::schedule) a payload for an absolute millisecond
///   deadline; store the returned [`TimerHandle`] if you may need to cancel.
/// - [`cancel`](Self::cancel) removes a pending entry; cancelling an expired
///   or unknown handle is a no-op returning `false`.
/// - Drain with [`pop_expired`](Self::pop_expired) in a loop whenever the
///   host clock advances; each call yields the earliest due entry.
/// - [`next_deadline`](Self::next_deadline) tells the host when to wake.
///
/// Timestamps are whatever monotonic milliseconds the host uses; the queue
/// only compares them.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<TimerEntry<T>>,
    next_handle: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Schedules `payload` to become due at the absolute time `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(TimerEntry {
            handle,
            deadline,
            payload,
        });
        handle
    }

    /// Cancels a pending timer.
    ///
    /// Returns `true` if the entry was still pending. Cancelling a handle
    /// that already expired or was never issued returns `false`.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the earliest entry whose deadline is at or before
    /// `now`, or `None` if nothing is due.
    ///
    /// Call in a loop to drain everything due at a given instant. Entries
    /// with equal deadlines come back in scheduling order.
    pub fn pop_expired(&mut self, now: u64) -> Option<(TimerHandle, T)> {
        let mut best: Option<usize> = None;
        for (i, e) in self.entries.iter().enumerate() {
            if e.deadline > now {
                continue;
            }
            // Strict `<` keeps the earliest-scheduled entry among equal
            // deadlines, since handles are issued in scheduling order.
            match best {
                None => best = Some(i),
                Some(j) if e.deadline < self.entries[j].deadline => best = Some(i),
                Some(_) => {}
            }
        }
        let entry = self.entries.remove(best?);
        Some((entry.handle, entry.payload))
    }

    /// Returns the earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Returns the number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all pending entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn empty_queue_has_nothing_due() {
        let mut q: TimerQueue<u32> = TimerQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.pop_expired(u64::MAX), None);
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn entries_drain_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(30, "c");
        q.schedule(10, "a");
        q.schedule(20, "b");

        let mut fired = Vec::new();
        while let Some((_, p)) = q.pop_expired(100) {
            fired.push(p);
        }
        assert_eq!(fired, ["a", "b", "c"]);
    }

    #[test]
    fn equal_deadlines_drain_in_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(50, 1);
        q.schedule(50, 2);
        q.schedule(50, 3);

        assert_eq!(q.pop_expired(50).map(|(_, p)| p), Some(1));
        assert_eq!(q.pop_expired(50).map(|(_, p)| p), Some(2));
        assert_eq!(q.pop_expired(50).map(|(_, p)| p), Some(3));
    }

    #[test]
    fn not_due_entries_stay_queued() {
        let mut q = TimerQueue::new();
        q.schedule(200, ());
        assert_eq!(q.pop_expired(199), None);
        assert_eq!(q.len(), 1);
        assert!(q.pop_expired(200).is_some());
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_removes_pending_entry() {
        let mut q = TimerQueue::new();
        let h = q.schedule(100, "x");
        assert!(q.cancel(h));
        assert_eq!(q.pop_expired(1000), None);
    }

    #[test]
    fn cancel_after_expiry_is_noop() {
        let mut q = TimerQueue::new();
        let h = q.schedule(100, "x");
        assert!(q.pop_expired(100).is_some());
        assert!(!q.cancel(h));
    }

    #[test]
    fn handles_are_not_reused() {
        let mut q = TimerQueue::new();
        let a = q.schedule(1, ());
        assert!(q.pop_expired(1).is_some());
        let b = q.schedule(1, ());
        assert_ne!(a, b);
    }

    #[test]
    fn next_deadline_tracks_minimum() {
        let mut q = TimerQueue::new();
        q.schedule(300, ());
        let h = q.schedule(150, ());
        assert_eq!(q.next_deadline(), Some(150));
        q.cancel(h);
        assert_eq!(q.next_deadline(), Some(300));
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        q.schedule(1, ());
        q.schedule(2, ());
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop_expired(u64::MAX), None);
    }
}
