// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Thicket demos.

use kurbo::{Point, Rect};
use thicket_binding::{HitTest, HitTestResult};

/// A toy hit-test surface: a flat list of labelled rectangles, checked
/// front-to-back in insertion order.
///
/// Real hosts implement [`HitTest`] over their own scene structure; this is
/// just enough surface for the demos to click on.
#[derive(Debug, Default)]
pub struct DemoSurface {
    regions: Vec<(Rect, u32)>,
}

impl DemoSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rectangular target in front of the existing ones.
    pub fn add_region(&mut self, rect: Rect, target: u32) {
        self.regions.push((rect, target));
    }
}

impl HitTest<u32> for DemoSurface {
    fn hit_test(&mut self, result: &mut HitTestResult<u32>, position: Point) {
        for &(rect, target) in &self.regions {
            if rect.contains(position) {
                result.add(target);
            }
        }
    }
}
