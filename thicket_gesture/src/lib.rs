// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Gesture: recognizers that turn pointer lifecycles into semantic
//! callbacks.
//!
//! ## Overview
//!
//! A recognizer is a small state machine that competes for pointer contacts
//! in a [`thicket_arena::ArenaSet`] and, once it owns a contact, translates
//! raw deltas into callbacks such as `on_tap` or `on_pan_update`. This crate
//! ships the closed set used by the binding layer:
//!
//! - [`TapRecognizer`]: down and up in place; the press callback is deferred
//!   until the arena agrees, so a tap that loses to a drag never shows a
//!   half-fired press.
//! - [`DoubleTapRecognizer`]: two taps within a time window and slop
//!   distance, using the arena's hold mechanism to survive the first up.
//! - [`LongPressRecognizer`]: a press held past a deadline.
//! - [`PanRecognizer`]: claims the pointer on first movement and streams
//!   per-move deltas.
//! - [`PanZoomRecognizer`]: two-finger pan/zoom with per-sample scale and
//!   rotation deltas.
//!
//! All of them implement [`GestureRecognizer`] and are carried by the
//! [`Recognizer`] enum; new gesture kinds slot in as additional variants
//! behind the same capability.
//!
//! ## Wiring
//!
//! Recognizers do not own the router, arena table, or timers. The dispatch
//! layer (see `thicket_binding`) hands each call a [`RecognizerCx`] built
//! over its own state and pumps the deferred arena operations afterwards.
//! A recognizer with no callback configured reports itself not interested
//! via [`GestureRecognizer::is_interested`] and is never registered for a
//! pointer.
//!
//! ## Callback failure isolation
//!
//! User callbacks run individually guarded (under the `std` feature): a
//! panicking handler is logged and skipped, and dispatch continues, so a
//! broken callback can at worst lose its own gesture — never corrupt arena
//! bookkeeping.
//!
//! This crate is `no_std` and uses `alloc`; the `std` feature enables the
//! panic guard.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod config;
mod double_tap;
mod long_press;
mod pan;
mod pan_zoom;
mod recognizer;
mod tap;
#[cfg(test)]
mod test_util;
mod tracking;

pub use config::{DOUBLE_TAP_WINDOW_MS, GestureConfig, LONG_PRESS_DEADLINE_MS};
pub use double_tap::{DoubleTapDetails, DoubleTapRecognizer};
pub use long_press::{LongPressDetails, LongPressRecognizer};
pub use pan::{PanEndDetails, PanRecognizer, PanStartDetails, PanUpdateDetails};
pub use pan_zoom::{
    PanZoomEndDetails, PanZoomRecognizer, PanZoomStartDetails, PanZoomUpdateDetails,
};
pub use recognizer::{
    ArenaOp, GestureRecognizer, Recognizer, RecognizerCx, RecognizerId, TimerTask,
};
pub use tap::{TapDownDetails, TapRecognizer, TapUpDetails};
pub use tracking::{DeadlineState, TrackingState};
