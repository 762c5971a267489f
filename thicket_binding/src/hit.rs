// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hit-test collaborator contract.
//!
//! The binding does not walk any scene tree itself. The host supplies a
//! [`HitTest`] implementation — a box tree, a spatial index, a hard-coded
//! list — and the binding consumes the ordered result: build once per
//! contact-opening event, cache per pointer id, reuse until the contact
//! ends.

use alloc::vec::Vec;
use kurbo::Point;

/// One hit along the path, front-most first.
///
/// The target key is how the binding finds the recognizers attached to the
/// hit; events of the contact are then delivered through those recognizers'
/// handlers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HitEntry<K> {
    /// The interactive target that was hit.
    pub target: K,
}

/// The ordered, front-to-back result of one hit test.
#[derive(Clone, Debug)]
pub struct HitTestResult<K> {
    entries: Vec<HitEntry<K>>,
}

impl<K> Default for HitTestResult<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> HitTestResult<K> {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a hit target; callers add in front-to-back order.
    pub fn add(&mut self, target: K) {
        self.entries.push(HitEntry { target });
    }

    /// The accumulated entries, front-most first.
    #[must_use]
    pub fn entries(&self) -> &[HitEntry<K>] {
        &self.entries
    }

    /// Returns `true` when nothing was hit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Supplies the ordered interactive targets under a position.
///
/// Implemented by the host over whatever spatial structure it owns. Called
/// by [`GestureHub::handle_sample`](crate::GestureHub::handle_sample) once
/// per contact-opening event (and per hover sample); never for the moves
/// and the up of an active contact, which reuse the cached path.
pub trait HitTest<K> {
    /// Fills `result` with the targets under `position`, front-to-back.
    fn hit_test(&mut self, result: &mut HitTestResult<K>, position: Point);
}
