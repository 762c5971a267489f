// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable interaction parameters.

use thicket_pointer::TOUCH_SLOP;

/// Default window within which a second tap counts as a double tap.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 200;

/// Default press duration before a long-press is recognized.
pub const LONG_PRESS_DEADLINE_MS: u64 = 300;

/// Interaction parameters shared by all recognizers of one hub.
///
/// These are conventions, not invariants of the arbitration algorithm;
/// override any of them to match a platform. Distances are in the same
/// units as normalized event positions.
#[derive(Clone, Debug)]
pub struct GestureConfig {
    /// Maximum distance two related positions may differ and still count as
    /// "the same spot" (second-tap distance check). The normalizer applies
    /// its own slop for cancel synthesis.
    pub touch_slop: f64,
    /// Window within which a second tap counts as a double tap.
    pub double_tap_window_ms: u64,
    /// Press duration before a long-press is recognized.
    pub long_press_deadline_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            long_press_deadline_ms: LONG_PRESS_DEADLINE_MS,
        }
    }
}
