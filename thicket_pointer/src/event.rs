// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer identities, buttons, phases, and the normalized event value.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Identifier for one physical pointer contact.
///
/// Mouse input uses the single constant [`PointerId::MOUSE`] for its whole
/// lifetime; each simultaneous touch contact gets its own id via
/// [`PointerId::from_touch`]. Ids are how the router, the arena manager, and
/// recognizers correlate the events of one contact.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PointerId(u32);

impl PointerId {
    /// The id shared by all mouse samples.
    pub const MOUSE: Self = Self(0);

    /// Maps a platform per-touch identifier onto a pointer id.
    ///
    /// Touch ids are offset so they never collide with [`Self::MOUSE`].
    #[must_use]
    pub const fn from_touch(raw: u32) -> Self {
        Self(raw + 1)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

bitflags::bitflags! {
    /// Mouse buttons held during a sample.
    ///
    /// Touch contacts report [`PointerButtons::PRIMARY`] while down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Left mouse button, or any touch contact.
        const PRIMARY   = 0b0000_0001;
        /// Right mouse button.
        const SECONDARY = 0b0000_0010;
        /// Middle mouse button.
        const MIDDLE    = 0b0000_0100;
    }
}

/// Lifecycle phase of a normalized pointer event.
///
/// This is a closed set: every event a consumer can receive is one of these,
/// carried on [`PointerEvent::phase`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerPhase {
    /// Contact began.
    Down,
    /// Contact moved while down.
    Move,
    /// Contact ended normally.
    Up,
    /// Pointer moved without an active contact (mouse only).
    Hover,
    /// Contact ended abnormally; terminal for the contact.
    Cancel,
    /// A two-finger pan/zoom sequence began.
    PanZoomStart,
    /// A two-finger pan/zoom sequence updated.
    PanZoomUpdate,
    /// A two-finger pan/zoom sequence ended.
    PanZoomEnd,
}

impl PointerPhase {
    /// Returns `true` for phases that open a contact and trigger hit testing.
    #[must_use]
    pub fn begins_contact(self) -> bool {
        matches!(self, Self::Down | Self::PanZoomStart)
    }

    /// Returns `true` for phases after which the contact no longer exists.
    #[must_use]
    pub fn ends_contact(self) -> bool {
        matches!(self, Self::Up | Self::Cancel | Self::PanZoomEnd)
    }
}

/// The per-contact positions of a pan/zoom sample, in delivery order.
pub type TouchSet = SmallVec<[Point; 2]>;

/// One normalized pointer lifecycle event.
///
/// Produced by [`PointerNormalizer::normalize`](crate::PointerNormalizer::normalize)
/// and never mutated afterwards. Positions and deltas are in device pixels;
/// the normalizer has already applied the device-pixel ratio.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    /// The contact this event belongs to.
    pub pointer: PointerId,
    /// Lifecycle phase.
    pub phase: PointerPhase,
    /// Position in device pixels.
    pub position: Point,
    /// Movement since the previous sample of this pointer, in device pixels.
    pub delta: Vec2,
    /// Buttons held during the sample.
    pub buttons: PointerButtons,
    /// Individual contact positions for pan/zoom phases; empty otherwise.
    pub touches: TouchSet,
    /// Host-supplied monotonic milliseconds.
    pub timestamp: u64,
}
