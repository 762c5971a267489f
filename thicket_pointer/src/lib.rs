// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Pointer: pointer event normalization and per-pointer routing.
//!
//! ## Overview
//!
//! This crate is the input edge of the Thicket gesture stack. A platform
//! adapter feeds it [`RawSample`] values (mouse events, touch list entries,
//! trackpad pan/zoom phases) in device-independent units; the
//! [`PointerNormalizer`] turns each into one immutable [`PointerEvent`] in
//! device pixels, with per-pointer movement deltas and a slop-based cancel
//! heuristic. The [`PointerRouter`] then lets any interested party keep
//! following a contact it has seen once, independent of hit testing.
//!
//! ## Units
//!
//! Every position and delta on a [`PointerEvent`] has already been multiplied
//! by the active device-pixel ratio. Downstream consumers never mix units.
//!
//! ## Cancel synthesis
//!
//! A contact that wanders more than the slop tolerance away from its down
//! position without being classified as a pan/zoom is reported as a
//! [`Cancel`](PointerPhase::Cancel) instead of a move, once per contact. See
//! [`PointerNormalizer`] for the exact rule.
//!
//! ## Routing
//!
//! The router computes delivery order; it does not call anything. A dispatch
//! layer snapshots [`PointerRouter::routes_for`] and invokes handlers itself,
//! which keeps delivery deterministic even when handlers unregister routes
//! mid-event.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use thicket_pointer::{PointerNormalizer, PointerPhase, RawKind, RawSample};
//!
//! let mut normalizer = PointerNormalizer::new();
//! normalizer.set_device_pixel_ratio(2.0);
//!
//! let down = normalizer.normalize(&RawSample::mouse(RawKind::Down, Point::new(10.0, 10.0), 0));
//! assert_eq!(down.phase, PointerPhase::Down);
//! assert_eq!(down.position, Point::new(20.0, 20.0));
//!
//! let moved = normalizer.normalize(&RawSample::mouse(RawKind::Move, Point::new(14.0, 10.0), 16));
//! assert_eq!(moved.phase, PointerPhase::Move);
//! assert_eq!(moved.delta.x, 8.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod normalize;
mod router;

pub use event::{PointerButtons, PointerEvent, PointerId, PointerPhase, TouchSet};
pub use normalize::{PointerNormalizer, RawKind, RawSample, TOUCH_SLOP};
pub use router::PointerRouter;
