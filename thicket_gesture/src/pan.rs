// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan recognizer: claims the pointer on first movement, then streams
//! deltas.
//!
//! The eager accept is what lets a drag pre-empt a tap on the same target:
//! the first move after the down resolves the whole arena in the pan's
//! favor, before any up or sweep. Movement observed before the win is
//! accumulated and delivered with `on_pan_start`, so no motion is lost.

use alloc::boxed::Box;
use kurbo::{Point, Vec2};
use thicket_arena::Disposition;
use thicket_pointer::{PointerEvent, PointerId, PointerPhase};

use crate::recognizer::{GestureRecognizer, RecognizerCx, guarded};
use crate::tracking::TrackingState;

/// Details for the start of a pan.
#[derive(Clone, Debug)]
pub struct PanStartDetails {
    /// Position where the pan was recognized, in device pixels.
    pub position: Point,
}

/// Details for one pan movement.
#[derive(Clone, Debug)]
pub struct PanUpdateDetails {
    /// Current position, in device pixels.
    pub position: Point,
    /// Movement since the previous update, in device pixels.
    pub delta: Vec2,
}

/// Details for the end of a pan.
#[derive(Clone, Debug)]
pub struct PanEndDetails {
    /// Position where the pan ended, in device pixels.
    pub position: Point,
}

/// Recognizes a single-finger pan (drag).
#[derive(Default)]
pub struct PanRecognizer {
    tracking: TrackingState,
    won: bool,
    /// Motion observed before the arena win, replayed with the start.
    pending_delta: Vec2,
    last_position: Option<Point>,
    on_pan_start: Option<Box<dyn FnMut(&PanStartDetails)>>,
    on_pan_update: Option<Box<dyn FnMut(&PanUpdateDetails)>>,
    on_pan_end: Option<Box<dyn FnMut(&PanEndDetails)>>,
}

impl core::fmt::Debug for PanRecognizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PanRecognizer")
            .field("tracking", &self.tracking)
            .field("won", &self.won)
            .finish_non_exhaustive()
    }
}

impl PanRecognizer {
    /// Creates a recognizer with no callbacks configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback for the start of a pan.
    pub fn set_on_pan_start(&mut self, f: impl FnMut(&PanStartDetails) + 'static) {
        self.on_pan_start = Some(Box::new(f));
    }

    /// Sets the callback for each pan movement.
    pub fn set_on_pan_update(&mut self, f: impl FnMut(&PanUpdateDetails) + 'static) {
        self.on_pan_update = Some(Box::new(f));
    }

    /// Sets the callback for the end of a pan.
    pub fn set_on_pan_end(&mut self, f: impl FnMut(&PanEndDetails) + 'static) {
        self.on_pan_end = Some(Box::new(f));
    }

    fn fire_update(&mut self, details: &PanUpdateDetails) {
        if let Some(cb) = self.on_pan_update.as_mut() {
            guarded("on_pan_update", || cb(details));
        }
    }

    fn fire_end(&mut self, position: Point) {
        if let Some(cb) = self.on_pan_end.as_mut() {
            let details = PanEndDetails { position };
            guarded("on_pan_end", || cb(&details));
        }
    }

    fn reset(&mut self) {
        self.won = false;
        self.pending_delta = Vec2::ZERO;
        self.last_position = None;
    }
}

impl GestureRecognizer for PanRecognizer {
    fn is_interested(&self) -> bool {
        self.on_pan_start.is_some() || self.on_pan_update.is_some() || self.on_pan_end.is_some()
    }

    fn add_pointer(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if event.phase != PointerPhase::Down || !self.tracking.is_empty() {
            return;
        }
        self.tracking.begin(event.pointer, cx);
        self.last_position = Some(event.position);
        self.pending_delta = Vec2::ZERO;
    }

    fn handle_event(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if !self.tracking.is_tracking(event.pointer) {
            return;
        }
        match event.phase {
            PointerPhase::Move => {
                self.last_position = Some(event.position);
                if self.won {
                    let details = PanUpdateDetails {
                        position: event.position,
                        delta: event.delta,
                    };
                    self.fire_update(&details);
                } else {
                    // First qualifying movement: claim the whole arena now.
                    self.pending_delta += event.delta;
                    self.tracking.resolve_pointer(event.pointer, Disposition::Accepted, cx);
                }
            }
            PointerPhase::Up => {
                if self.won {
                    self.fire_end(event.position);
                }
                // After an eager win the arena is long gone and this is the
                // bookkeeping formality that ends our own participation;
                // before a win it is a real withdrawal.
                self.tracking.resolve_pointer(event.pointer, Disposition::Rejected, cx);
                self.tracking.stop(event.pointer, cx);
                self.reset();
            }
            PointerPhase::Cancel => {
                if self.won {
                    // The contact was reclassified out from under an active
                    // pan; end the stream the same way an up would.
                    self.fire_end(event.position);
                }
                self.tracking.resolve_pointer(event.pointer, Disposition::Rejected, cx);
                self.tracking.stop(event.pointer, cx);
                self.reset();
            }
            _ => {}
        }
    }

    fn accept_gesture(&mut self, _pointer: PointerId, _cx: &mut RecognizerCx<'_>) {
        self.won = true;
        if let Some(position) = self.last_position {
            if let Some(cb) = self.on_pan_start.as_mut() {
                let details = PanStartDetails { position };
                guarded("on_pan_start", || cb(&details));
            }
            if self.pending_delta != Vec2::ZERO {
                let details = PanUpdateDetails {
                    position,
                    delta: self.pending_delta,
                };
                self.pending_delta = Vec2::ZERO;
                self.fire_update(&details);
            }
        }
    }

    fn reject_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        self.tracking.stop(pointer, cx);
        self.reset();
    }

    fn timer_fired(&mut self, _pointer: PointerId, _cx: &mut RecognizerCx<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{ME, TestWorld, event, move_event};
    use alloc::rc::Rc;
    use alloc::vec::Vec as AVec;
    use core::cell::RefCell;
    use thicket_arena::ArenaEvent;

    use crate::recognizer::RecognizerId;

    const P0: PointerId = PointerId::MOUSE;
    // A second arena member so the close does not hand the pan a default win.
    const RIVAL: RecognizerId = RecognizerId::new(99);

    fn logging_pan(log: &Rc<RefCell<AVec<&'static str>>>) -> PanRecognizer {
        let mut pan = PanRecognizer::new();
        let l = log.clone();
        pan.set_on_pan_start(move |_| l.borrow_mut().push("start"));
        let l = log.clone();
        pan.set_on_pan_update(move |_| l.borrow_mut().push("update"));
        let l = log.clone();
        pan.set_on_pan_end(move |_| l.borrow_mut().push("end"));
        pan
    }

    #[test]
    fn first_move_claims_the_whole_arena() {
        let log = Rc::new(RefCell::new(AVec::new()));
        let mut world = TestWorld::new();
        let mut pan = logging_pan(&log);

        pan.add_pointer(&event(P0, PointerPhase::Down, 0.0, 0.0, 0), &mut world.cx(0));
        world.arenas.add(P0, RIVAL);
        assert!(world.arenas.close(P0).is_empty());

        pan.handle_event(&move_event(P0, 4.0, 0.0, 4.0, 0.0, 16), &mut world.cx(16));
        let verdicts = world.pump();
        assert!(verdicts.contains(&ArenaEvent::Accepted(ME)));
        assert!(verdicts.contains(&ArenaEvent::Rejected(RIVAL)));
    }

    // Motion observed before the win is replayed with the start.
    #[test]
    fn start_replays_buffered_motion() {
        let log = Rc::new(RefCell::new(AVec::new()));
        let deltas: Rc<RefCell<AVec<Vec2>>> = Rc::new(RefCell::new(AVec::new()));
        let mut world = TestWorld::new();
        let mut pan = logging_pan(&log);
        let d = deltas.clone();
        pan.set_on_pan_update(move |u| d.borrow_mut().push(u.delta));

        pan.add_pointer(&event(P0, PointerPhase::Down, 0.0, 0.0, 0), &mut world.cx(0));
        world.arenas.add(P0, RIVAL);
        world.arenas.close(P0);

        pan.handle_event(&move_event(P0, 4.0, 3.0, 4.0, 3.0, 16), &mut world.cx(16));
        world.pump();
        pan.accept_gesture(P0, &mut world.cx(16));

        assert_eq!(*log.borrow(), ["start"]);
        assert_eq!(*deltas.borrow(), [Vec2::new(4.0, 3.0)]);
    }

    #[test]
    fn updates_stream_after_the_win() {
        let log = Rc::new(RefCell::new(AVec::new()));
        let mut world = TestWorld::new();
        let mut pan = logging_pan(&log);

        pan.add_pointer(&event(P0, PointerPhase::Down, 0.0, 0.0, 0), &mut world.cx(0));
        pan.accept_gesture(P0, &mut world.cx(1));
        pan.handle_event(&move_event(P0, 5.0, 0.0, 5.0, 0.0, 16), &mut world.cx(16));
        pan.handle_event(&move_event(P0, 9.0, 0.0, 4.0, 0.0, 32), &mut world.cx(32));

        assert_eq!(*log.borrow(), ["start", "update", "update"]);
    }

    #[test]
    fn up_fires_end_and_stops_tracking() {
        let log = Rc::new(RefCell::new(AVec::new()));
        let mut world = TestWorld::new();
        let mut pan = logging_pan(&log);

        pan.add_pointer(&event(P0, PointerPhase::Down, 0.0, 0.0, 0), &mut world.cx(0));
        pan.accept_gesture(P0, &mut world.cx(1));
        pan.handle_event(&event(P0, PointerPhase::Up, 5.0, 0.0, 40), &mut world.cx(40));

        assert_eq!(*log.borrow(), ["start", "end"]);
        assert!(!world.router.has_routes(P0));
        // The formality reject found no live arena to act on.
        assert!(world.pump().is_empty());
    }

    #[test]
    fn cancel_while_active_ends_the_stream() {
        let log = Rc::new(RefCell::new(AVec::new()));
        let mut world = TestWorld::new();
        let mut pan = logging_pan(&log);

        pan.add_pointer(&event(P0, PointerPhase::Down, 0.0, 0.0, 0), &mut world.cx(0));
        pan.accept_gesture(P0, &mut world.cx(1));
        pan.handle_event(&event(P0, PointerPhase::Cancel, 30.0, 0.0, 40), &mut world.cx(40));

        assert_eq!(*log.borrow(), ["start", "end"]);
        assert!(!world.router.has_routes(P0));
    }

    #[test]
    fn loss_resets_silently() {
        let log = Rc::new(RefCell::new(AVec::new()));
        let mut world = TestWorld::new();
        let mut pan = logging_pan(&log);

        pan.add_pointer(&event(P0, PointerPhase::Down, 0.0, 0.0, 0), &mut world.cx(0));
        pan.reject_gesture(P0, &mut world.cx(10));

        assert!(log.borrow().is_empty());
        assert!(!world.router.has_routes(P0));
    }
}
