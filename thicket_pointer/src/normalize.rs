// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalizer: raw platform samples in, typed pointer events out.
//!
//! ## Usage
//!
//! 1) Construct a [`PointerNormalizer`] and set the device-pixel ratio when
//!    the host window learns it (and again whenever it changes).
//! 2) Feed every raw sample through [`PointerNormalizer::normalize`], in
//!    arrival order, and dispatch the returned [`PointerEvent`].
//!
//! ## Cancel synthesis
//!
//! A would-be move is reported as a [`Cancel`](PointerPhase::Cancel) when all
//! of the following hold: a down position was recorded for the pointer, the
//! pointer has not been classified as a pan/zoom, and the Euclidean distance
//! from the down position exceeds the slop tolerance (scaled). The down
//! record is cleared afterwards, so the heuristic fires at most once per
//! contact. The decision is local to the sample; the normalizer never
//! consults gesture state.

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::event::{PointerButtons, PointerEvent, PointerId, PointerPhase, TouchSet};

/// Distance in device-independent pixels a contact may wander from its down
/// position and still count as the same press.
///
/// This is a default, not an invariant: override it with
/// [`PointerNormalizer::with_slop`] when a platform convention differs.
pub const TOUCH_SLOP: f64 = 18.0;

/// Change kind of a raw platform sample.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RawKind {
    /// Contact began.
    Down,
    /// Contact moved while down.
    Move,
    /// Contact ended.
    Up,
    /// Pointer moved with no active contact.
    Hover,
    /// The platform cancelled the contact.
    Cancel,
    /// Two-finger pan/zoom began.
    PanZoomStart,
    /// Two-finger pan/zoom updated.
    PanZoomUpdate,
    /// Two-finger pan/zoom ended.
    PanZoomEnd,
}

/// A raw, platform-abstracted input sample in device-independent units.
///
/// The input boundary of the stack: a platform adapter fills these from
/// native mouse, touch, or trackpad callbacks and hands them to the binding
/// in arrival order.
#[derive(Clone, Debug)]
pub struct RawSample {
    /// Change kind.
    pub kind: RawKind,
    /// Platform per-touch identifier; `None` for mouse input.
    pub pointer: Option<u32>,
    /// Position in device-independent pixels.
    pub position: Point,
    /// Contact positions for pan/zoom kinds, in platform delivery order.
    pub touches: TouchSet,
    /// Buttons held during the sample.
    pub buttons: PointerButtons,
    /// Host-supplied monotonic milliseconds.
    pub timestamp: u64,
}

impl RawSample {
    /// A mouse sample.
    #[must_use]
    pub fn mouse(kind: RawKind, position: Point, timestamp: u64) -> Self {
        Self {
            kind,
            pointer: None,
            position,
            touches: SmallVec::new(),
            buttons: PointerButtons::PRIMARY,
            timestamp,
        }
    }

    /// A single-touch sample with a platform touch identifier.
    #[must_use]
    pub fn touch(kind: RawKind, touch: u32, position: Point, timestamp: u64) -> Self {
        Self {
            kind,
            pointer: Some(touch),
            position,
            touches: SmallVec::new(),
            buttons: PointerButtons::PRIMARY,
            timestamp,
        }
    }

    /// A two-finger pan/zoom sample; the position is the contact centroid.
    #[must_use]
    pub fn pan_zoom(kind: RawKind, touches: TouchSet, timestamp: u64) -> Self {
        let n = touches.len().max(1) as f64;
        let sum = touches
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        Self {
            kind,
            pointer: None,
            position: (sum / n).to_point(),
            touches,
            buttons: PointerButtons::PRIMARY,
            timestamp,
        }
    }

    /// Overrides the button set.
    #[must_use]
    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

#[derive(Debug)]
struct ContactState {
    /// Down position, present until Up/Cancel or until the slop heuristic
    /// fires for this contact.
    origin: Option<Point>,
    /// Last scaled position, for delta computation.
    last: Point,
    /// Set once the contact is classified as a two-finger pan/zoom.
    pan_zoom: bool,
}

/// Converts raw platform samples into typed [`PointerEvent`]s.
///
/// Applies device-pixel scaling to positions, deltas, and touch sets,
/// maintains per-pointer movement deltas, and synthesizes a single
/// [`Cancel`](PointerPhase::Cancel) for contacts that drift beyond the slop
/// tolerance (see module docs). State for a contact is dropped as soon as
/// the contact ends.
#[derive(Debug)]
pub struct PointerNormalizer {
    scale: f64,
    slop: f64,
    contacts: HashMap<PointerId, ContactState>,
}

impl Default for PointerNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerNormalizer {
    /// Creates a normalizer with the default slop tolerance ([`TOUCH_SLOP`])
    /// and a device-pixel ratio of `1.0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            slop: TOUCH_SLOP,
            contacts: HashMap::new(),
        }
    }

    /// Creates a normalizer with a custom slop tolerance, in
    /// device-independent pixels.
    #[must_use]
    pub fn with_slop(slop: f64) -> Self {
        Self {
            slop,
            ..Self::new()
        }
    }

    /// Sets the device-pixel ratio applied to all subsequent samples.
    pub fn set_device_pixel_ratio(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Returns the active device-pixel ratio.
    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.scale
    }

    /// Converts one raw sample into a normalized pointer event.
    ///
    /// Samples must be fed in arrival order; deltas are computed against the
    /// previous sample of the same pointer id.
    pub fn normalize(&mut self, sample: &RawSample) -> PointerEvent {
        let pointer = sample
            .pointer
            .map_or(PointerId::MOUSE, PointerId::from_touch);
        let position = self.scale_point(sample.position);
        let touches: TouchSet = sample.touches.iter().map(|&p| self.scale_point(p)).collect();

        let (phase, delta) = match sample.kind {
            RawKind::Down => {
                self.contacts.insert(
                    pointer,
                    ContactState {
                        origin: Some(position),
                        last: position,
                        pan_zoom: false,
                    },
                );
                (PointerPhase::Down, Vec2::ZERO)
            }
            RawKind::Move => {
                let state = self.contacts.entry(pointer).or_insert(ContactState {
                    origin: None,
                    last: position,
                    pan_zoom: false,
                });
                let delta = position - state.last;
                state.last = position;
                if let Some(origin) = state.origin
                    && !state.pan_zoom
                    && origin.distance(position) > self.slop * self.scale
                {
                    // Reclassify as a cancel; clearing the origin makes this
                    // a once-per-contact decision.
                    state.origin = None;
                    (PointerPhase::Cancel, delta)
                } else {
                    (PointerPhase::Move, delta)
                }
            }
            RawKind::Up => {
                let delta = self.take_delta(pointer, position);
                self.contacts.remove(&pointer);
                (PointerPhase::Up, delta)
            }
            RawKind::Hover => {
                let state = self.contacts.entry(pointer).or_insert(ContactState {
                    origin: None,
                    last: position,
                    pan_zoom: false,
                });
                let delta = position - state.last;
                state.last = position;
                (PointerPhase::Hover, delta)
            }
            RawKind::Cancel => {
                let delta = self.take_delta(pointer, position);
                self.contacts.remove(&pointer);
                (PointerPhase::Cancel, delta)
            }
            RawKind::PanZoomStart => {
                let state = self.contacts.entry(pointer).or_insert(ContactState {
                    origin: None,
                    last: position,
                    pan_zoom: true,
                });
                state.pan_zoom = true;
                state.last = position;
                (PointerPhase::PanZoomStart, Vec2::ZERO)
            }
            RawKind::PanZoomUpdate => {
                let state = self.contacts.entry(pointer).or_insert(ContactState {
                    origin: None,
                    last: position,
                    pan_zoom: true,
                });
                let delta = position - state.last;
                state.last = position;
                (PointerPhase::PanZoomUpdate, delta)
            }
            RawKind::PanZoomEnd => {
                let delta = self.take_delta(pointer, position);
                self.contacts.remove(&pointer);
                (PointerPhase::PanZoomEnd, delta)
            }
        };

        PointerEvent {
            pointer,
            phase,
            position,
            delta,
            buttons: sample.buttons,
            touches,
            timestamp: sample.timestamp,
        }
    }

    fn scale_point(&self, p: Point) -> Point {
        (p.to_vec2() * self.scale).to_point()
    }

    fn take_delta(&self, pointer: PointerId, position: Point) -> Vec2 {
        self.contacts
            .get(&pointer)
            .map_or(Vec2::ZERO, |s| position - s.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn mouse(kind: RawKind, x: f64, y: f64, ts: u64) -> RawSample {
        RawSample::mouse(kind, Point::new(x, y), ts)
    }

    #[test]
    fn device_pixel_ratio_scales_positions_and_deltas() {
        let mut n = PointerNormalizer::new();
        n.set_device_pixel_ratio(2.0);

        let down = n.normalize(&mouse(RawKind::Down, 10.0, 20.0, 0));
        assert_eq!(down.position, Point::new(20.0, 40.0));
        assert_eq!(down.delta, Vec2::ZERO);

        let moved = n.normalize(&mouse(RawKind::Move, 12.0, 20.0, 16));
        assert_eq!(moved.position, Point::new(24.0, 40.0));
        assert_eq!(moved.delta, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn deltas_accumulate_per_pointer() {
        let mut n = PointerNormalizer::new();
        n.normalize(&RawSample::touch(RawKind::Down, 0, Point::new(0.0, 0.0), 0));
        n.normalize(&RawSample::touch(RawKind::Down, 1, Point::new(100.0, 0.0), 0));

        let a = n.normalize(&RawSample::touch(RawKind::Move, 0, Point::new(3.0, 4.0), 1));
        let b = n.normalize(&RawSample::touch(RawKind::Move, 1, Point::new(101.0, 0.0), 1));
        assert_eq!(a.delta, Vec2::new(3.0, 4.0));
        assert_eq!(b.delta, Vec2::new(1.0, 0.0));
        assert_ne!(a.pointer, b.pointer);
    }

    // Move beyond the slop tolerance becomes exactly one Cancel; the down
    // record is cleared so later moves pass through unchanged.
    #[test]
    fn slop_exceeded_synthesizes_cancel_once() {
        let mut n = PointerNormalizer::new();
        n.normalize(&mouse(RawKind::Down, 0.0, 0.0, 0));

        let within = n.normalize(&mouse(RawKind::Move, 10.0, 0.0, 1));
        assert_eq!(within.phase, PointerPhase::Move);

        let beyond = n.normalize(&mouse(RawKind::Move, 25.0, 0.0, 2));
        assert_eq!(beyond.phase, PointerPhase::Cancel);

        // Heuristic fired; the same distance no longer cancels.
        let after = n.normalize(&mouse(RawKind::Move, 60.0, 0.0, 3));
        assert_eq!(after.phase, PointerPhase::Move);
    }

    #[test]
    fn slop_threshold_is_scaled() {
        let mut n = PointerNormalizer::new();
        n.set_device_pixel_ratio(2.0);
        n.normalize(&mouse(RawKind::Down, 0.0, 0.0, 0));

        // 17 logical px = 34 device px, still within 18 * 2.
        let within = n.normalize(&mouse(RawKind::Move, 17.0, 0.0, 1));
        assert_eq!(within.phase, PointerPhase::Move);

        let beyond = n.normalize(&mouse(RawKind::Move, 19.0, 0.0, 2));
        assert_eq!(beyond.phase, PointerPhase::Cancel);
    }

    #[test]
    fn custom_slop_is_respected() {
        let mut n = PointerNormalizer::with_slop(5.0);
        n.normalize(&mouse(RawKind::Down, 0.0, 0.0, 0));
        let beyond = n.normalize(&mouse(RawKind::Move, 6.0, 0.0, 1));
        assert_eq!(beyond.phase, PointerPhase::Cancel);
    }

    #[test]
    fn pan_zoom_contacts_are_exempt_from_cancel_synthesis() {
        let mut n = PointerNormalizer::new();
        n.normalize(&RawSample::pan_zoom(
            RawKind::PanZoomStart,
            smallvec![Point::new(0.0, 0.0), Point::new(40.0, 0.0)],
            0,
        ));
        let update = n.normalize(&RawSample::pan_zoom(
            RawKind::PanZoomUpdate,
            smallvec![Point::new(100.0, 0.0), Point::new(140.0, 0.0)],
            1,
        ));
        assert_eq!(update.phase, PointerPhase::PanZoomUpdate);
        assert_eq!(update.delta, Vec2::new(100.0, 0.0));
        assert_eq!(update.touches.len(), 2);
    }

    #[test]
    fn up_drops_contact_state() {
        let mut n = PointerNormalizer::new();
        n.normalize(&mouse(RawKind::Down, 0.0, 0.0, 0));
        n.normalize(&mouse(RawKind::Up, 1.0, 0.0, 1));

        // A fresh down restarts the slop window from the new origin.
        n.normalize(&mouse(RawKind::Down, 100.0, 0.0, 2));
        let moved = n.normalize(&mouse(RawKind::Move, 110.0, 0.0, 3));
        assert_eq!(moved.phase, PointerPhase::Move);
    }

    #[test]
    fn hover_tracks_deltas_without_a_contact() {
        let mut n = PointerNormalizer::new();
        let first = n.normalize(&mouse(RawKind::Hover, 5.0, 5.0, 0));
        assert_eq!(first.delta, Vec2::ZERO);
        let second = n.normalize(&mouse(RawKind::Hover, 8.0, 9.0, 1));
        assert_eq!(second.delta, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn pan_zoom_centroid_is_the_sample_position() {
        let s = RawSample::pan_zoom(
            RawKind::PanZoomStart,
            smallvec![Point::new(0.0, 0.0), Point::new(10.0, 20.0)],
            0,
        );
        assert_eq!(s.position, Point::new(5.0, 10.0));
    }
}
