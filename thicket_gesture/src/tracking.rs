// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared recognizer state helpers: pointer tracking and deadlines.
//!
//! These are the composable cores of the recognizer hierarchy. A concrete
//! recognizer embeds a [`TrackingState`] to manage its arena entries and
//! router routes, and optionally a [`DeadlineState`] when it needs a timer
//! armed on contact and cancelled on resolution.

use smallvec::SmallVec;
use thicket_arena::{ArenaEntry, Disposition};
use thicket_pointer::PointerId;
use thicket_timing::TimerHandle;

use crate::recognizer::{RecognizerCx, RecognizerId};

/// Arena entries and router routes for the pointers one recognizer tracks.
///
/// On a qualifying contact the recognizer calls [`begin`](Self::begin),
/// which registers with the arena and the router and stores the returned
/// entry keyed by pointer. [`resolve`](Self::resolve) forwards a disposition
/// to every entry held — a recognizer may in principle track more than one
/// pointer at a time, though the concrete recognizers here track one.
#[derive(Debug, Default)]
pub struct TrackingState {
    entries: SmallVec<[ArenaEntry<RecognizerId>; 1]>,
}

impl TrackingState {
    /// Creates an empty tracking state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `pointer`: joins its arena and adds a router route.
    ///
    /// A pointer already tracked is not re-registered.
    pub fn begin(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        if self.is_tracking(pointer) {
            return;
        }
        let entry = cx.join_arena(pointer);
        cx.add_route(pointer);
        self.entries.push(entry);
    }

    /// Stops tracking `pointer` and removes its router route.
    pub fn stop(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        let before = self.entries.len();
        self.entries.retain(|e| e.pointer() != pointer);
        if self.entries.len() != before {
            cx.remove_route(pointer);
        }
    }

    /// Stops tracking every pointer.
    pub fn stop_all(&mut self, cx: &mut RecognizerCx<'_>) {
        for entry in self.entries.drain(..) {
            cx.remove_route(entry.pointer());
        }
    }

    /// Forwards `disposition` to every entry held.
    pub fn resolve(&mut self, disposition: Disposition, cx: &mut RecognizerCx<'_>) {
        for entry in &self.entries {
            cx.resolve(*entry, disposition);
        }
    }

    /// Forwards `disposition` for a single tracked pointer, if present.
    pub fn resolve_pointer(
        &mut self,
        pointer: PointerId,
        disposition: Disposition,
        cx: &mut RecognizerCx<'_>,
    ) {
        if let Some(entry) = self.entries.iter().find(|e| e.pointer() == pointer) {
            cx.resolve(*entry, disposition);
        }
    }

    /// Returns `true` while `pointer` is tracked.
    #[must_use]
    pub fn is_tracking(&self, pointer: PointerId) -> bool {
        self.entries.iter().any(|e| e.pointer() == pointer)
    }

    /// Returns `true` when no pointer is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A timer armed on contact and cancelled on resolution.
///
/// Owners arm it from `add_pointer` and disarm it from both
/// `accept_gesture` and `reject_gesture`; if it fires first, the owner's
/// `timer_fired` hook decides what the elapsed deadline means.
#[derive(Debug, Default)]
pub struct DeadlineState {
    timer: Option<TimerHandle>,
}

impl DeadlineState {
    /// Creates a disarmed deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the deadline `delay_ms` from the context's now, replacing any
    /// previously armed timer.
    pub fn arm(&mut self, pointer: PointerId, delay_ms: u64, cx: &mut RecognizerCx<'_>) {
        self.disarm(cx);
        self.timer = Some(cx.schedule_after(delay_ms, pointer));
    }

    /// Cancels the timer if armed.
    pub fn disarm(&mut self, cx: &mut RecognizerCx<'_>) {
        if let Some(handle) = self.timer.take() {
            cx.cancel_timer(handle);
        }
    }

    /// Returns `true` while the timer is armed and has not been observed to
    /// fire.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Marks the deadline as elapsed (the owner saw `timer_fired`).
    pub fn mark_elapsed(&mut self) {
        self.timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{ME, TestWorld};
    use thicket_arena::Disposition;

    const P0: PointerId = PointerId::MOUSE;

    #[test]
    fn begin_registers_arena_and_route() {
        let mut world = TestWorld::new();
        let mut tracking = TrackingState::new();

        tracking.begin(P0, &mut world.cx(0));

        assert!(tracking.is_tracking(P0));
        assert_eq!(world.router.routes_for(P0), &[ME]);
        assert_eq!(world.arenas.members(P0), Some(&[ME][..]));
    }

    #[test]
    fn begin_twice_is_noop() {
        let mut world = TestWorld::new();
        let mut tracking = TrackingState::new();

        tracking.begin(P0, &mut world.cx(0));
        tracking.begin(P0, &mut world.cx(1));

        assert_eq!(world.router.routes_for(P0), &[ME]);
    }

    #[test]
    fn stop_removes_route_and_entry() {
        let mut world = TestWorld::new();
        let mut tracking = TrackingState::new();

        tracking.begin(P0, &mut world.cx(0));
        tracking.stop(P0, &mut world.cx(1));

        assert!(!tracking.is_tracking(P0));
        assert!(tracking.is_empty());
        assert!(!world.router.has_routes(P0));
    }

    // `resolve` must forward the disposition to every held entry.
    #[test]
    fn resolve_forwards_to_every_entry() {
        let mut world = TestWorld::new();
        let mut tracking = TrackingState::new();
        let p1 = PointerId::from_touch(0);

        tracking.begin(P0, &mut world.cx(0));
        tracking.begin(p1, &mut world.cx(0));
        tracking.resolve(Disposition::Rejected, &mut world.cx(1));

        assert_eq!(world.deferred.len(), 2);
    }

    #[test]
    fn deadline_arm_and_disarm() {
        let mut world = TestWorld::new();
        let mut deadline = DeadlineState::new();

        deadline.arm(P0, 300, &mut world.cx(100));
        assert!(deadline.is_armed());
        assert_eq!(world.timers.next_deadline(), Some(400));

        deadline.disarm(&mut world.cx(150));
        assert!(!deadline.is_armed());
        assert!(world.timers.is_empty());
    }

    #[test]
    fn rearming_replaces_the_previous_timer() {
        let mut world = TestWorld::new();
        let mut deadline = DeadlineState::new();

        deadline.arm(P0, 300, &mut world.cx(0));
        deadline.arm(P0, 200, &mut world.cx(50));

        assert_eq!(world.timers.len(), 1);
        assert_eq!(world.timers.next_deadline(), Some(250));
    }
}
