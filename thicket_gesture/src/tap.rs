// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap recognizer: down and up in place, deferred until the arena agrees.
//!
//! A tap never reports a press the user might see revoked: `on_tap_down`
//! fires only once the arena has accepted this recognizer. An up that
//! arrives before acceptance is buffered, not discarded — winning the sweep
//! afterwards replays it as `on_tap_up` then `on_tap`. Losing the arena (or
//! a cancel) after the down was reported fires `on_tap_cancel`.

use alloc::boxed::Box;
use kurbo::Point;
use thicket_arena::Disposition;
use thicket_pointer::{PointerButtons, PointerEvent, PointerId, PointerPhase};

use crate::recognizer::{GestureRecognizer, RecognizerCx, guarded};
use crate::tracking::TrackingState;

/// Details for a reported press.
#[derive(Clone, Debug)]
pub struct TapDownDetails {
    /// Down position, in device pixels.
    pub position: Point,
    /// Buttons held at the down.
    pub buttons: PointerButtons,
}

/// Details for a reported release.
#[derive(Clone, Debug)]
pub struct TapUpDetails {
    /// Up position, in device pixels.
    pub position: Point,
}

/// Recognizes a tap: a down and an up within slop tolerance.
///
/// Movement beyond slop never reaches this recognizer as a move; the
/// normalizer reports it as a cancel.
#[derive(Default)]
pub struct TapRecognizer {
    tracking: TrackingState,
    /// Details captured at the down, delivered once the arena accepts.
    pending_down: Option<TapDownDetails>,
    /// An up that arrived before acceptance, replayed on the win.
    buffered_up: Option<TapUpDetails>,
    sent_down: bool,
    won: bool,
    on_tap_down: Option<Box<dyn FnMut(&TapDownDetails)>>,
    on_tap_up: Option<Box<dyn FnMut(&TapUpDetails)>>,
    on_tap: Option<Box<dyn FnMut()>>,
    on_tap_cancel: Option<Box<dyn FnMut()>>,
}

impl core::fmt::Debug for TapRecognizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TapRecognizer")
            .field("tracking", &self.tracking)
            .field("sent_down", &self.sent_down)
            .field("won", &self.won)
            .finish_non_exhaustive()
    }
}

impl TapRecognizer {
    /// Creates a recognizer with no callbacks configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback for a confirmed press.
    pub fn set_on_tap_down(&mut self, f: impl FnMut(&TapDownDetails) + 'static) {
        self.on_tap_down = Some(Box::new(f));
    }

    /// Sets the callback for the release of a confirmed press.
    pub fn set_on_tap_up(&mut self, f: impl FnMut(&TapUpDetails) + 'static) {
        self.on_tap_up = Some(Box::new(f));
    }

    /// Sets the callback for a completed tap.
    pub fn set_on_tap(&mut self, f: impl FnMut() + 'static) {
        self.on_tap = Some(Box::new(f));
    }

    /// Sets the callback for a press revoked after `on_tap_down` fired.
    pub fn set_on_tap_cancel(&mut self, f: impl FnMut() + 'static) {
        self.on_tap_cancel = Some(Box::new(f));
    }

    fn fire_down(&mut self) {
        if self.sent_down {
            return;
        }
        if let Some(details) = self.pending_down.clone()
            && let Some(cb) = self.on_tap_down.as_mut()
        {
            guarded("on_tap_down", || cb(&details));
        }
        self.sent_down = true;
    }

    fn fire_up_and_tap(&mut self, details: &TapUpDetails) {
        if let Some(cb) = self.on_tap_up.as_mut() {
            guarded("on_tap_up", || cb(details));
        }
        if let Some(cb) = self.on_tap.as_mut() {
            guarded("on_tap", || cb());
        }
    }

    fn fire_cancel(&mut self) {
        if let Some(cb) = self.on_tap_cancel.as_mut() {
            guarded("on_tap_cancel", || cb());
        }
    }

    fn reset(&mut self) {
        self.pending_down = None;
        self.buffered_up = None;
        self.sent_down = false;
        self.won = false;
    }
}

impl GestureRecognizer for TapRecognizer {
    fn is_interested(&self) -> bool {
        self.on_tap.is_some()
            || self.on_tap_down.is_some()
            || self.on_tap_up.is_some()
            || self.on_tap_cancel.is_some()
    }

    fn add_pointer(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if event.phase != PointerPhase::Down || !self.tracking.is_empty() {
            return;
        }
        self.tracking.begin(event.pointer, cx);
        self.pending_down = Some(TapDownDetails {
            position: event.position,
            buttons: event.buttons,
        });
    }

    fn handle_event(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if !self.tracking.is_tracking(event.pointer) {
            return;
        }
        match event.phase {
            PointerPhase::Up => {
                let details = TapUpDetails {
                    position: event.position,
                };
                if self.won {
                    self.fire_up_and_tap(&details);
                    self.tracking.stop(event.pointer, cx);
                    self.reset();
                } else {
                    // Not accepted yet: hold on to the up. Winning the
                    // sweep replays it; losing discards it.
                    self.buffered_up = Some(details);
                }
            }
            PointerPhase::Cancel => {
                if self.sent_down {
                    self.fire_cancel();
                }
                self.tracking.resolve_pointer(event.pointer, Disposition::Rejected, cx);
                self.tracking.stop(event.pointer, cx);
                self.reset();
            }
            _ => {}
        }
    }

    fn accept_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        self.won = true;
        self.fire_down();
        if let Some(up) = self.buffered_up.take() {
            self.fire_up_and_tap(&up);
            self.tracking.stop(pointer, cx);
            self.reset();
        }
    }

    fn reject_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        if self.sent_down {
            self.fire_cancel();
        }
        self.tracking.stop(pointer, cx);
        self.reset();
    }

    fn timer_fired(&mut self, _pointer: PointerId, _cx: &mut RecognizerCx<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{ME, TestWorld, event};
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use thicket_arena::ArenaEvent;

    const P0: PointerId = PointerId::MOUSE;

    fn logging_tap(log: &Rc<RefCell<Vec<&'static str>>>) -> TapRecognizer {
        let mut tap = TapRecognizer::new();
        let l = log.clone();
        tap.set_on_tap_down(move |_| l.borrow_mut().push("down"));
        let l = log.clone();
        tap.set_on_tap_up(move |_| l.borrow_mut().push("up"));
        let l = log.clone();
        tap.set_on_tap(move || l.borrow_mut().push("tap"));
        let l = log.clone();
        tap.set_on_tap_cancel(move || l.borrow_mut().push("cancel"));
        tap
    }

    #[test]
    fn not_interested_without_callbacks() {
        assert!(!TapRecognizer::new().is_interested());
        let mut tap = TapRecognizer::new();
        tap.set_on_tap(|| {});
        assert!(tap.is_interested());
    }

    #[test]
    fn down_callback_waits_for_the_arena() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = TestWorld::new();
        let mut tap = logging_tap(&log);

        tap.add_pointer(&event(P0, PointerPhase::Down, 5.0, 5.0, 0), &mut world.cx(0));
        assert!(log.borrow().is_empty());

        tap.accept_gesture(P0, &mut world.cx(1));
        assert_eq!(*log.borrow(), ["down"]);
    }

    // An up before acceptance is buffered, then replayed on the win.
    #[test]
    fn buffered_up_replays_after_win() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = TestWorld::new();
        let mut tap = logging_tap(&log);

        tap.add_pointer(&event(P0, PointerPhase::Down, 5.0, 5.0, 0), &mut world.cx(0));
        tap.handle_event(&event(P0, PointerPhase::Up, 6.0, 5.0, 40), &mut world.cx(40));
        assert!(log.borrow().is_empty());

        tap.accept_gesture(P0, &mut world.cx(40));
        assert_eq!(*log.borrow(), ["down", "up", "tap"]);
        assert!(!world.router.has_routes(P0));
    }

    #[test]
    fn loss_before_down_fires_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = TestWorld::new();
        let mut tap = logging_tap(&log);

        tap.add_pointer(&event(P0, PointerPhase::Down, 5.0, 5.0, 0), &mut world.cx(0));
        tap.reject_gesture(P0, &mut world.cx(10));
        assert!(log.borrow().is_empty());
        assert!(!world.router.has_routes(P0));
    }

    #[test]
    fn cancel_after_down_fires_tap_cancel() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = TestWorld::new();
        let mut tap = logging_tap(&log);

        tap.add_pointer(&event(P0, PointerPhase::Down, 5.0, 5.0, 0), &mut world.cx(0));
        tap.accept_gesture(P0, &mut world.cx(1));
        tap.handle_event(&event(P0, PointerPhase::Cancel, 30.0, 5.0, 20), &mut world.cx(20));

        assert_eq!(*log.borrow(), ["down", "cancel"]);
    }

    #[test]
    fn up_after_acceptance_completes_immediately() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = TestWorld::new();
        let mut tap = logging_tap(&log);

        tap.add_pointer(&event(P0, PointerPhase::Down, 5.0, 5.0, 0), &mut world.cx(0));
        tap.accept_gesture(P0, &mut world.cx(1));
        tap.handle_event(&event(P0, PointerPhase::Up, 6.0, 5.0, 40), &mut world.cx(40));

        assert_eq!(*log.borrow(), ["down", "up", "tap"]);
    }

    // Down then up with no competition: the single-member close accepts the
    // tap, and the full callback sequence runs in order, once each.
    #[test]
    fn solo_tap_through_the_arena() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = TestWorld::new();
        let mut tap = logging_tap(&log);

        tap.add_pointer(&event(P0, PointerPhase::Down, 5.0, 5.0, 0), &mut world.cx(0));
        let verdicts = world.arenas.close(P0);
        assert_eq!(verdicts, [ArenaEvent::Accepted(ME)]);
        tap.accept_gesture(P0, &mut world.cx(0));
        tap.handle_event(&event(P0, PointerPhase::Up, 6.0, 5.0, 40), &mut world.cx(40));

        assert_eq!(*log.borrow(), ["down", "up", "tap"]);
    }
}
