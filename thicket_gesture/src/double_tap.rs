// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double-tap recognizer: two taps within a time window and slop distance.
//!
//! Two-phase. The first down arms the window timer and remembers its
//! position; the first up cannot simply let the arena sweep — the decision
//! window must outlive the pointer — so the recognizer asks the arena to
//! hold that pointer. A second down arriving while the window is open
//! accepts immediately; the gesture itself completes on the second up,
//! provided it lands within slop distance of the first tap. On success both
//! taps' entries are accepted, so the first arena resolves in this
//! recognizer's favor instead of handing a stale win to a competing tap.
//!
//! Any cancel or move before resolution, and the window expiring, reject
//! everything outstanding and release held pointers, letting competitors
//! win via the normal sweep.

use alloc::boxed::Box;
use kurbo::Point;
use thicket_arena::Disposition;
use thicket_pointer::{PointerEvent, PointerId, PointerPhase};

use crate::recognizer::{GestureRecognizer, RecognizerCx, guarded};
use crate::tracking::{DeadlineState, TrackingState};

/// Details for a recognized double tap.
#[derive(Clone, Debug)]
pub struct DoubleTapDetails {
    /// Position of the second tap's up, in device pixels.
    pub position: Point,
}

/// Recognizes two taps in quick succession at the same spot.
#[derive(Default)]
pub struct DoubleTapRecognizer {
    tracking: TrackingState,
    window: DeadlineState,
    /// Down position of the first tap; present while an attempt is live.
    first_position: Option<Point>,
    first_up_seen: bool,
    /// Pointer whose sweep we deferred with a hold.
    held: Option<PointerId>,
    /// Pointer considered the second tap.
    second: Option<PointerId>,
    on_double_tap: Option<Box<dyn FnMut(&DoubleTapDetails)>>,
}

impl core::fmt::Debug for DoubleTapRecognizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DoubleTapRecognizer")
            .field("tracking", &self.tracking)
            .field("first_position", &self.first_position)
            .field("first_up_seen", &self.first_up_seen)
            .finish_non_exhaustive()
    }
}

impl DoubleTapRecognizer {
    /// Creates a recognizer with no callbacks configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback for a recognized double tap.
    pub fn set_on_double_tap(&mut self, f: impl FnMut(&DoubleTapDetails) + 'static) {
        self.on_double_tap = Some(Box::new(f));
    }

    fn attempt_live(&self) -> bool {
        self.first_position.is_some() || !self.tracking.is_empty()
    }

    /// Rejects everything outstanding and returns to the idle state.
    fn reject_and_reset(&mut self, cx: &mut RecognizerCx<'_>) {
        self.tracking.resolve(Disposition::Rejected, cx);
        self.clear(cx);
    }

    /// Drops all transient state; outstanding entries must already be
    /// resolved one way or the other.
    fn clear(&mut self, cx: &mut RecognizerCx<'_>) {
        self.window.disarm(cx);
        if let Some(pointer) = self.held.take() {
            cx.release(pointer);
        }
        self.tracking.stop_all(cx);
        self.first_position = None;
        self.first_up_seen = false;
        self.second = None;
    }
}

impl GestureRecognizer for DoubleTapRecognizer {
    fn is_interested(&self) -> bool {
        self.on_double_tap.is_some()
    }

    fn add_pointer(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if event.phase != PointerPhase::Down {
            return;
        }
        if self.first_position.is_some() {
            // A second down inside the window claims the pointer outright;
            // after the window lapsed the attempt has already been reset.
            if self.window.is_armed() {
                self.tracking.begin(event.pointer, cx);
                self.second = Some(event.pointer);
                self.tracking.resolve_pointer(event.pointer, Disposition::Accepted, cx);
            }
        } else {
            self.tracking.begin(event.pointer, cx);
            self.first_position = Some(event.position);
            let window = cx.config().double_tap_window_ms;
            self.window.arm(event.pointer, window, cx);
        }
    }

    fn handle_event(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if !self.tracking.is_tracking(event.pointer) {
            return;
        }
        match event.phase {
            PointerPhase::Up => {
                if self.second == Some(event.pointer) && self.first_up_seen {
                    let within_slop = self
                        .first_position
                        .is_some_and(|first| first.distance(event.position) <= cx.config().touch_slop);
                    if within_slop {
                        // Accept both taps' entries: the held first arena
                        // resolves in our favor rather than falling to a
                        // competing tap at release.
                        self.tracking.resolve(Disposition::Accepted, cx);
                        if let Some(cb) = self.on_double_tap.as_mut() {
                            let details = DoubleTapDetails {
                                position: event.position,
                            };
                            guarded("on_double_tap", || cb(&details));
                        }
                        self.clear(cx);
                    } else {
                        self.reject_and_reset(cx);
                    }
                } else if !self.first_up_seen {
                    // First tap completed; keep the decision window open
                    // past this pointer's sweep.
                    self.first_up_seen = true;
                    cx.hold(event.pointer);
                    self.held = Some(event.pointer);
                }
            }
            PointerPhase::Move | PointerPhase::Cancel => {
                self.reject_and_reset(cx);
            }
            _ => {}
        }
    }

    fn accept_gesture(&mut self, _pointer: PointerId, _cx: &mut RecognizerCx<'_>) {
        // Arena wins carry no user-visible effect of their own; the double
        // tap fires on the second up.
    }

    fn reject_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        if !self.attempt_live() {
            return;
        }
        // Losing any tracked pointer ends the whole attempt.
        self.tracking.stop(pointer, cx);
        self.reject_and_reset(cx);
    }

    fn timer_fired(&mut self, _pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        self.window.mark_elapsed();
        if self.attempt_live() {
            // No second tap in time: withdraw and let the held sweep run.
            self.reject_and_reset(cx);
        }
    }
}
