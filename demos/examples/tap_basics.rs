// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feed a scripted tap and a scripted double tap through a [`GestureHub`]
//! and print the callbacks as they fire.
//!
//! Run with `RUST_LOG=debug` to also see the arena's own resolution log.

use kurbo::{Point, Rect};
use thicket_binding::GestureHub;
use thicket_demos::DemoSurface;
use thicket_gesture::{DoubleTapRecognizer, TapRecognizer};
use thicket_pointer::{RawKind, RawSample};

fn main() {
    env_logger::init();

    let mut surface = DemoSurface::new();
    surface.add_region(Rect::new(0.0, 0.0, 100.0, 100.0), 1);

    let mut hub: GestureHub<u32> = GestureHub::new();

    let mut tap = TapRecognizer::new();
    tap.set_on_tap_down(|d| println!("tap down at {:?}", d.position));
    tap.set_on_tap_up(|d| println!("tap up at {:?}", d.position));
    tap.set_on_tap(|| println!("tap!"));
    tap.set_on_tap_cancel(|| println!("tap cancelled"));
    hub.attach(1, tap);

    let mut double = DoubleTapRecognizer::new();
    double.set_on_double_tap(|d| println!("double tap at {:?}", d.position));
    hub.attach(1, double);

    // A single tap: the double-tap window has to expire before the tap is
    // allowed to win.
    println!("-- single tap --");
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Down, Point::new(50.0, 50.0), 0));
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Up, Point::new(50.0, 50.0), 40));
    hub.advance_to(300);

    // Two quick taps at the same spot: one double tap, no single-tap noise.
    println!("-- double tap --");
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Down, Point::new(50.0, 50.0), 1000));
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Up, Point::new(50.0, 50.0), 1040));
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Down, Point::new(51.0, 50.0), 1120));
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Up, Point::new(51.0, 50.0), 1160));
    hub.advance_to(1500);
}
