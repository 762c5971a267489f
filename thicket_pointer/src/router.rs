// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router: pointer-id-keyed fan-out, independent of hit testing.
//!
//! ## Overview
//!
//! A recognizer discovers a contact exactly once, during the hit-test pass
//! for its down event. To keep receiving that contact's moves and its up, it
//! registers a route here; every subsequent event of the pointer id is then
//! delivered to all of its routes, in registration order, regardless of what
//! the pointer is currently over.
//!
//! The router computes delivery order; it never invokes anything. The
//! dispatch layer snapshots [`PointerRouter::routes_for`] before delivering,
//! so a handler that unregisters mid-event cannot skew the order for the
//! event in flight.
//!
//! ## Minimal example
//!
//! ```
//! use thicket_pointer::{PointerId, PointerRouter};
//!
//! let mut router: PointerRouter<u32> = PointerRouter::new();
//! let p = PointerId::from_touch(0);
//! router.add_route(p, 7);
//! router.add_route(p, 9);
//! assert_eq!(router.routes_for(p), &[7, 9]);
//!
//! router.remove_route(p, 7);
//! assert_eq!(router.routes_for(p), &[9]);
//! ```

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::event::PointerId;

/// Per-pointer fan-out table.
///
/// `R` is the route key: any small copyable identifier the dispatch layer
/// can turn back into a handler (typically a recognizer id). A pointer may
/// carry any number of routes; delivery order is registration order.
#[derive(Debug)]
pub struct PointerRouter<R> {
    routes: HashMap<PointerId, SmallVec<[R; 2]>>,
}

impl<R: Copy + Eq> Default for PointerRouter<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Eq> PointerRouter<R> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registers `route` for every subsequent event of `pointer`.
    ///
    /// Registering the same route twice for one pointer is a no-op; the
    /// original registration order is kept.
    pub fn add_route(&mut self, pointer: PointerId, route: R) {
        let routes = self.routes.entry(pointer).or_default();
        if !routes.contains(&route) {
            routes.push(route);
        }
    }

    /// Unregisters `route` from `pointer`. Unknown routes are ignored.
    pub fn remove_route(&mut self, pointer: PointerId, route: R) {
        if let Some(routes) = self.routes.get_mut(&pointer) {
            routes.retain(|r| *r != route);
            if routes.is_empty() {
                self.routes.remove(&pointer);
            }
        }
    }

    /// Returns the routes registered for `pointer`, in registration order.
    #[must_use]
    pub fn routes_for(&self, pointer: PointerId) -> &[R] {
        self.routes.get(&pointer).map_or(&[], |r| r.as_slice())
    }

    /// Returns `true` if `pointer` has at least one route.
    #[must_use]
    pub fn has_routes(&self, pointer: PointerId) -> bool {
        self.routes.contains_key(&pointer)
    }

    /// Drops every route of `pointer`.
    pub fn clear_pointer(&mut self, pointer: PointerId) {
        self.routes.remove(&pointer);
    }
}
