// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long-press recognizer: a press held past a deadline.
//!
//! The deadline timer is armed on the down and cancelled when the
//! recognizer's participation ends: a losing reject, or an up/cancel before
//! recognition. Acceptance of the *gesture* only ever comes from the
//! deadline hook — an early arena win (for example as the lone member at
//! close) is remembered, the deadline keeps running, and `on_long_press`
//! fires when it elapses.

use alloc::boxed::Box;
use kurbo::Point;
use thicket_arena::Disposition;
use thicket_pointer::{PointerEvent, PointerId, PointerPhase};

use crate::recognizer::{GestureRecognizer, RecognizerCx, guarded};
use crate::tracking::{DeadlineState, TrackingState};

/// Details for a recognized long press.
#[derive(Clone, Debug)]
pub struct LongPressDetails {
    /// Down position of the press, in device pixels.
    pub position: Point,
}

/// Recognizes a press held past the configured deadline.
#[derive(Default)]
pub struct LongPressRecognizer {
    tracking: TrackingState,
    deadline: DeadlineState,
    pressed_at: Option<Point>,
    won: bool,
    elapsed: bool,
    fired: bool,
    on_long_press: Option<Box<dyn FnMut(&LongPressDetails)>>,
}

impl core::fmt::Debug for LongPressRecognizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LongPressRecognizer")
            .field("tracking", &self.tracking)
            .field("won", &self.won)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

impl LongPressRecognizer {
    /// Creates a recognizer with no callbacks configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback for a recognized long press.
    pub fn set_on_long_press(&mut self, f: impl FnMut(&LongPressDetails) + 'static) {
        self.on_long_press = Some(Box::new(f));
    }

    /// Fires `on_long_press` once the recognizer both owns the arena and has
    /// outlived the deadline, in either order.
    fn maybe_fire(&mut self) {
        if !self.won || !self.elapsed || self.fired {
            return;
        }
        self.fired = true;
        if let Some(position) = self.pressed_at
            && let Some(cb) = self.on_long_press.as_mut()
        {
            let details = LongPressDetails { position };
            guarded("on_long_press", || cb(&details));
        }
    }

    fn reset(&mut self) {
        self.pressed_at = None;
        self.won = false;
        self.elapsed = false;
        self.fired = false;
    }
}

impl GestureRecognizer for LongPressRecognizer {
    fn is_interested(&self) -> bool {
        self.on_long_press.is_some()
    }

    fn add_pointer(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if event.phase != PointerPhase::Down || !self.tracking.is_empty() {
            return;
        }
        self.tracking.begin(event.pointer, cx);
        self.pressed_at = Some(event.position);
        let delay = cx.config().long_press_deadline_ms;
        self.deadline.arm(event.pointer, delay, cx);
    }

    fn handle_event(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if !self.tracking.is_tracking(event.pointer) {
            return;
        }
        match event.phase {
            PointerPhase::Up | PointerPhase::Cancel => {
                self.deadline.disarm(cx);
                if self.fired {
                    // The press already completed; just stop following the
                    // pointer.
                    self.tracking.stop(event.pointer, cx);
                    self.reset();
                } else {
                    self.tracking.resolve_pointer(event.pointer, Disposition::Rejected, cx);
                    self.tracking.stop(event.pointer, cx);
                    self.reset();
                }
            }
            _ => {}
        }
    }

    fn accept_gesture(&mut self, _pointer: PointerId, _cx: &mut RecognizerCx<'_>) {
        self.won = true;
        self.maybe_fire();
    }

    fn reject_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        self.deadline.disarm(cx);
        self.tracking.stop(pointer, cx);
        self.reset();
    }

    fn timer_fired(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        self.deadline.mark_elapsed();
        self.elapsed = true;
        if self.won {
            self.maybe_fire();
        } else if self.tracking.is_tracking(pointer) {
            // Claim the arena; `on_long_press` fires when the win arrives.
            self.tracking.resolve_pointer(pointer, Disposition::Accepted, cx);
        }
    }
}
