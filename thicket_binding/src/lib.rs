// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Binding: the orchestrator that turns raw pointer samples into
//! resolved gestures.
//!
//! ## Overview
//!
//! [`GestureHub`] ties the rest of the stack together: the
//! `thicket_pointer` normalizer and router, the `thicket_arena`
//! disambiguation protocol, the `thicket_gesture` recognizers, and the
//! host's hit testing behind the [`HitTest`] trait. The host owns a hub,
//! attaches recognizers to its hit-test target keys, and feeds every raw
//! input sample through [`GestureHub::handle_sample`]; recognizer callbacks
//! fire synchronously from inside that call.
//!
//! ## Lifecycle guarantees
//!
//! - One hit test per contact: the path found at the down is cached and
//!   reused for the contact's moves and its up, then dropped. A path exists
//!   for a pointer id exactly while that pointer is active.
//! - The arena for a pointer closes when the down dispatch pass completes
//!   and is swept when the pointer comes up; holds placed by recognizers
//!   defer the sweep.
//! - At most one recognizer is ever accepted per contact.
//! - Samples dispatch strictly in arrival order; timers fire interleaved in
//!   timestamp order.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use thicket_binding::{GestureHub, HitTest, HitTestResult};
//! use thicket_gesture::TapRecognizer;
//! use thicket_pointer::{RawKind, RawSample};
//! # use std::cell::Cell;
//! # use std::rc::Rc;
//!
//! // A host surface with a single full-screen target.
//! struct Surface;
//! impl HitTest<u32> for Surface {
//!     fn hit_test(&mut self, result: &mut HitTestResult<u32>, _position: Point) {
//!         result.add(1);
//!     }
//! }
//!
//! let mut hub: GestureHub<u32> = GestureHub::new();
//! let taps = Rc::new(Cell::new(0));
//! let counter = taps.clone();
//! let mut tap = TapRecognizer::new();
//! tap.set_on_tap(move || counter.set(counter.get() + 1));
//! hub.attach(1, tap);
//!
//! let mut surface = Surface;
//! hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Down, Point::new(5.0, 5.0), 0));
//! hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Up, Point::new(6.0, 5.0), 40));
//! assert_eq!(taps.get(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`; the `std` feature (default)
//! additionally isolates panics from user callbacks.

#![no_std]

extern crate alloc;

mod hit;
mod hub;

pub use hit::{HitEntry, HitTest, HitTestResult};
pub use hub::GestureHub;
