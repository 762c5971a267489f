// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recognizer capability seam: the shared trait, the closed variant set,
//! and the context handle recognizers act through.
//!
//! ## Context discipline
//!
//! Recognizers never hold references into the router, arena table, or timer
//! queue. During each call they receive a [`RecognizerCx`], built by the
//! dispatch layer over its own state. Operations that cannot cascade
//! (routing, arena registration, holds, timers) apply immediately;
//! operations that can cascade into other recognizers (`resolve`, `release`)
//! are queued and pumped by the dispatch layer after the call returns, so a
//! win that rejects losers — whose handlers may resolve further — runs as a
//! deterministic worklist instead of re-entrant calls.

use alloc::collections::VecDeque;

use thicket_arena::{ArenaEntry, ArenaSet, Disposition};
use thicket_pointer::{PointerEvent, PointerId, PointerRouter};
use thicket_timing::{TimerHandle, TimerQueue};

use crate::config::GestureConfig;

/// Identity of one recognizer within a dispatch layer's registry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RecognizerId(u32);

impl RecognizerId {
    /// Creates an id from a raw registry index.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw registry index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Payload of a recognizer timer: who to call back, for which pointer.
#[derive(Copy, Clone, Debug)]
pub struct TimerTask {
    /// The recognizer whose [`GestureRecognizer::timer_fired`] runs.
    pub recognizer: RecognizerId,
    /// The pointer the timer was armed for.
    pub pointer: PointerId,
}

/// An arena operation whose delivery can cascade into other recognizers.
///
/// Queued through [`RecognizerCx`] and applied by the dispatch layer once
/// the current recognizer call has returned.
#[derive(Copy, Clone, Debug)]
pub enum ArenaOp {
    /// Forward a disposition through an entry.
    Resolve(ArenaEntry<RecognizerId>, Disposition),
    /// Release a hold, running a deferred sweep if one is pending.
    Release(PointerId),
}

/// The world as one recognizer may touch it during one call.
///
/// Built by the dispatch layer per recognizer invocation; see the module
/// docs for which operations apply immediately and which are deferred.
pub struct RecognizerCx<'a> {
    me: RecognizerId,
    now: u64,
    config: &'a GestureConfig,
    router: &'a mut PointerRouter<RecognizerId>,
    arenas: &'a mut ArenaSet<RecognizerId>,
    timers: &'a mut TimerQueue<TimerTask>,
    deferred: &'a mut VecDeque<ArenaOp>,
}

impl core::fmt::Debug for RecognizerCx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecognizerCx")
            .field("me", &self.me)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl<'a> RecognizerCx<'a> {
    /// Assembles a context. Called by the dispatch layer only.
    pub fn new(
        me: RecognizerId,
        now: u64,
        config: &'a GestureConfig,
        router: &'a mut PointerRouter<RecognizerId>,
        arenas: &'a mut ArenaSet<RecognizerId>,
        timers: &'a mut TimerQueue<TimerTask>,
        deferred: &'a mut VecDeque<ArenaOp>,
    ) -> Self {
        Self {
            me,
            now,
            config,
            router,
            arenas,
            timers,
            deferred,
        }
    }

    /// The identity of the recognizer being called.
    #[must_use]
    pub fn me(&self) -> RecognizerId {
        self.me
    }

    /// Host time of the sample (or timer) being processed, in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// The hub's interaction parameters.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        self.config
    }

    /// Registers this recognizer in the arena for `pointer`.
    pub fn join_arena(&mut self, pointer: PointerId) -> ArenaEntry<RecognizerId> {
        self.arenas.add(pointer, self.me)
    }

    /// Subscribes this recognizer to every subsequent event of `pointer`.
    pub fn add_route(&mut self, pointer: PointerId) {
        self.router.add_route(pointer, self.me);
    }

    /// Unsubscribes this recognizer from `pointer`.
    pub fn remove_route(&mut self, pointer: PointerId) {
        self.router.remove_route(pointer, self.me);
    }

    /// Queues a disposition for `entry`; delivered after this call returns.
    pub fn resolve(&mut self, entry: ArenaEntry<RecognizerId>, disposition: Disposition) {
        self.deferred.push_back(ArenaOp::Resolve(entry, disposition));
    }

    /// Defers the sweep of `pointer`'s arena past its pointer-up.
    pub fn hold(&mut self, pointer: PointerId) {
        self.arenas.hold(pointer);
    }

    /// Queues the release of a hold; a pending sweep runs on delivery.
    pub fn release(&mut self, pointer: PointerId) {
        self.deferred.push_back(ArenaOp::Release(pointer));
    }

    /// Arms a timer that calls this recognizer back for `pointer` after
    /// `delay_ms`.
    pub fn schedule_after(&mut self, delay_ms: u64, pointer: PointerId) -> TimerHandle {
        self.timers.schedule(
            self.now + delay_ms,
            TimerTask {
                recognizer: self.me,
                pointer,
            },
        )
    }

    /// Cancels a previously armed timer. Cancelling an expired timer is a
    /// no-op.
    pub fn cancel_timer(&mut self, handle: TimerHandle) {
        self.timers.cancel(handle);
    }
}

/// The capability every gesture recognizer implements.
///
/// A recognizer is a stateful consumer: it registers for pointers it finds
/// interesting, competes in the arena, and translates the raw lifecycle into
/// semantic callbacks. All methods receive a [`RecognizerCx`]; see the
/// module docs for the call discipline.
pub trait GestureRecognizer {
    /// Returns `false` when no callback is configured, so the dispatch layer
    /// never registers this recognizer for a pointer it would ignore.
    fn is_interested(&self) -> bool;

    /// Offers a contact-opening event found during the hit-test pass. The
    /// recognizer registers with the arena and router here if it wants the
    /// pointer.
    fn add_pointer(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>);

    /// Delivers a routed event for a pointer this recognizer tracks.
    fn handle_event(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>);

    /// The arena resolved in this recognizer's favor for `pointer`.
    fn accept_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>);

    /// The arena resolved against this recognizer for `pointer`. Terminal:
    /// the recognizer participates again only via a fresh contact.
    fn reject_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>);

    /// A timer armed through [`RecognizerCx::schedule_after`] elapsed.
    fn timer_fired(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>);
}

/// The closed set of recognizers shipped with this crate.
///
/// New gesture kinds slot in as further variants behind the same
/// [`GestureRecognizer`] capability.
#[derive(Debug)]
pub enum Recognizer {
    /// Tap: down and up within slop, deferred until the arena agrees.
    Tap(crate::TapRecognizer),
    /// Double tap: two taps within a time window and slop distance.
    DoubleTap(crate::DoubleTapRecognizer),
    /// Long press: press held past a deadline.
    LongPress(crate::LongPressRecognizer),
    /// Single-finger pan: claims the pointer on first movement.
    Pan(crate::PanRecognizer),
    /// Two-finger pan/zoom: claims its contact unconditionally.
    PanZoom(crate::PanZoomRecognizer),
}

macro_rules! each_variant {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Recognizer::Tap($inner) => $body,
            Recognizer::DoubleTap($inner) => $body,
            Recognizer::LongPress($inner) => $body,
            Recognizer::Pan($inner) => $body,
            Recognizer::PanZoom($inner) => $body,
        }
    };
}

impl GestureRecognizer for Recognizer {
    fn is_interested(&self) -> bool {
        each_variant!(self, r => r.is_interested())
    }

    fn add_pointer(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        each_variant!(self, r => r.add_pointer(event, cx));
    }

    fn handle_event(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        each_variant!(self, r => r.handle_event(event, cx));
    }

    fn accept_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        each_variant!(self, r => r.accept_gesture(pointer, cx));
    }

    fn reject_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        each_variant!(self, r => r.reject_gesture(pointer, cx));
    }

    fn timer_fired(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        each_variant!(self, r => r.timer_fired(pointer, cx));
    }
}

impl From<crate::TapRecognizer> for Recognizer {
    fn from(r: crate::TapRecognizer) -> Self {
        Self::Tap(r)
    }
}

impl From<crate::DoubleTapRecognizer> for Recognizer {
    fn from(r: crate::DoubleTapRecognizer) -> Self {
        Self::DoubleTap(r)
    }
}

impl From<crate::LongPressRecognizer> for Recognizer {
    fn from(r: crate::LongPressRecognizer) -> Self {
        Self::LongPress(r)
    }
}

impl From<crate::PanRecognizer> for Recognizer {
    fn from(r: crate::PanRecognizer) -> Self {
        Self::Pan(r)
    }
}

impl From<crate::PanZoomRecognizer> for Recognizer {
    fn from(r: crate::PanZoomRecognizer) -> Self {
        Self::PanZoom(r)
    }
}

/// Runs one user-supplied callback, isolating a panic so it cannot corrupt
/// arena bookkeeping mid-dispatch. Without `std` the guard is a
/// pass-through.
pub(crate) fn guarded(name: &str, f: impl FnOnce()) {
    #[cfg(feature = "std")]
    {
        if std::panic::catch_unwind(core::panic::AssertUnwindSafe(f)).is_err() {
            log::error!("gesture callback `{name}` panicked; continuing dispatch");
        }
    }
    #[cfg(not(feature = "std"))]
    {
        let _ = name;
        f();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TapRecognizer;

    #[test]
    fn enum_forwards_interest() {
        let tap: Recognizer = TapRecognizer::new().into();
        assert!(!tap.is_interested());

        let mut with_callback = TapRecognizer::new();
        with_callback.set_on_tap(|| {});
        let tap: Recognizer = with_callback.into();
        assert!(tap.is_interested());
    }

    #[cfg(feature = "std")]
    #[test]
    fn guarded_isolates_a_panicking_callback() {
        use alloc::rc::Rc;
        use core::cell::Cell;

        let ran_after = Rc::new(Cell::new(false));
        guarded("boom", || panic!("user callback failure"));
        // Dispatch continues past the isolated panic.
        let flag = ran_after.clone();
        guarded("ok", move || flag.set(true));
        assert!(ran_after.get());
    }
}
