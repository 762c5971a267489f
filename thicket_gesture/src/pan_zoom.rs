// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pan/zoom recognizer.
//!
//! A pan/zoom contact is already classified by the platform, so there is
//! nothing to disambiguate: the recognizer accepts unconditionally on the
//! start event. Each update reports instantaneous scale (current over
//! baseline inter-finger distance) and rotation (change in the `atan2`
//! angle of the inter-finger vector) relative to the previous sample; the
//! baselines then reset so the next update is again a per-sample delta.

use alloc::boxed::Box;
use kurbo::{Point, Vec2};
use thicket_arena::Disposition;
use thicket_pointer::{PointerEvent, PointerId, PointerPhase, TouchSet};

use crate::recognizer::{GestureRecognizer, RecognizerCx, guarded};
use crate::tracking::TrackingState;

/// Details for the start of a pan/zoom.
#[derive(Clone, Debug)]
pub struct PanZoomStartDetails {
    /// Contact centroid, in device pixels.
    pub focal: Point,
}

/// Details for one pan/zoom update. All values are deltas against the
/// previous sample, not against the start of the gesture.
#[derive(Clone, Debug)]
pub struct PanZoomUpdateDetails {
    /// Contact centroid, in device pixels.
    pub focal: Point,
    /// Centroid movement since the previous sample.
    pub focal_delta: Vec2,
    /// Inter-finger distance ratio against the previous sample; `1.0` means
    /// no zoom.
    pub scale: f64,
    /// Inter-finger angle change since the previous sample, in radians.
    pub rotation: f64,
}

/// Details for the end of a pan/zoom.
#[derive(Clone, Debug)]
pub struct PanZoomEndDetails {
    /// Final contact centroid, in device pixels.
    pub focal: Point,
}

/// Inter-finger distance and angle of one sample's touch set.
fn span_of(touches: &TouchSet) -> Option<(f64, f64)> {
    if touches.len() < 2 {
        return None;
    }
    let v = touches[1] - touches[0];
    Some((v.hypot(), v.atan2()))
}

/// Recognizes a two-finger pan/zoom delivered as pan-zoom phased samples.
#[derive(Default)]
pub struct PanZoomRecognizer {
    tracking: TrackingState,
    /// Baseline (distance, angle) the next update is measured against.
    baseline: Option<(f64, f64)>,
    /// Centroid of the start sample, reported with the win.
    start_focal: Option<Point>,
    on_pan_zoom_start: Option<Box<dyn FnMut(&PanZoomStartDetails)>>,
    on_pan_zoom_update: Option<Box<dyn FnMut(&PanZoomUpdateDetails)>>,
    on_pan_zoom_end: Option<Box<dyn FnMut(&PanZoomEndDetails)>>,
}

impl core::fmt::Debug for PanZoomRecognizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PanZoomRecognizer")
            .field("tracking", &self.tracking)
            .field("baseline", &self.baseline)
            .finish_non_exhaustive()
    }
}

impl PanZoomRecognizer {
    /// Creates a recognizer with no callbacks configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback for the start of a pan/zoom.
    pub fn set_on_pan_zoom_start(&mut self, f: impl FnMut(&PanZoomStartDetails) + 'static) {
        self.on_pan_zoom_start = Some(Box::new(f));
    }

    /// Sets the callback for each pan/zoom update.
    pub fn set_on_pan_zoom_update(&mut self, f: impl FnMut(&PanZoomUpdateDetails) + 'static) {
        self.on_pan_zoom_update = Some(Box::new(f));
    }

    /// Sets the callback for the end of a pan/zoom.
    pub fn set_on_pan_zoom_end(&mut self, f: impl FnMut(&PanZoomEndDetails) + 'static) {
        self.on_pan_zoom_end = Some(Box::new(f));
    }

    fn reset(&mut self) {
        self.baseline = None;
        self.start_focal = None;
    }
}

impl GestureRecognizer for PanZoomRecognizer {
    fn is_interested(&self) -> bool {
        self.on_pan_zoom_start.is_some()
            || self.on_pan_zoom_update.is_some()
            || self.on_pan_zoom_end.is_some()
    }

    fn add_pointer(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if event.phase != PointerPhase::PanZoomStart || !self.tracking.is_empty() {
            return;
        }
        self.tracking.begin(event.pointer, cx);
        self.baseline = span_of(&event.touches);
        self.start_focal = Some(event.position);
        // Nothing competes for an already-classified pan/zoom contact.
        self.tracking.resolve_pointer(event.pointer, Disposition::Accepted, cx);
    }

    fn handle_event(&mut self, event: &PointerEvent, cx: &mut RecognizerCx<'_>) {
        if !self.tracking.is_tracking(event.pointer) {
            return;
        }
        match event.phase {
            PointerPhase::PanZoomUpdate => {
                let current = span_of(&event.touches);
                let (scale, rotation) = match (self.baseline, current) {
                    (Some((base_d, base_a)), Some((cur_d, cur_a))) if base_d > 0.0 => {
                        (cur_d / base_d, cur_a - base_a)
                    }
                    _ => (1.0, 0.0),
                };
                // Reset the baselines so the next update is again a delta
                // against this sample.
                if current.is_some() {
                    self.baseline = current;
                }
                if let Some(cb) = self.on_pan_zoom_update.as_mut() {
                    let details = PanZoomUpdateDetails {
                        focal: event.position,
                        focal_delta: event.delta,
                        scale,
                        rotation,
                    };
                    guarded("on_pan_zoom_update", || cb(&details));
                }
            }
            PointerPhase::PanZoomEnd | PointerPhase::Cancel => {
                if let Some(cb) = self.on_pan_zoom_end.as_mut() {
                    let details = PanZoomEndDetails {
                        focal: event.position,
                    };
                    guarded("on_pan_zoom_end", || cb(&details));
                }
                self.tracking.stop(event.pointer, cx);
                self.reset();
            }
            _ => {}
        }
    }

    fn accept_gesture(&mut self, _pointer: PointerId, _cx: &mut RecognizerCx<'_>) {
        if let Some(focal) = self.start_focal
            && let Some(cb) = self.on_pan_zoom_start.as_mut()
        {
            let details = PanZoomStartDetails { focal };
            guarded("on_pan_zoom_start", || cb(&details));
        }
    }

    fn reject_gesture(&mut self, pointer: PointerId, cx: &mut RecognizerCx<'_>) {
        self.tracking.stop(pointer, cx);
        self.reset();
    }

    fn timer_fired(&mut self, _pointer: PointerId, _cx: &mut RecognizerCx<'_>) {}
}
