// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tap and a pan competing on the same target: small presses tap, any
//! movement turns the contact into a drag.

use kurbo::{Point, Rect};
use thicket_binding::GestureHub;
use thicket_demos::DemoSurface;
use thicket_gesture::{PanRecognizer, TapRecognizer};
use thicket_pointer::{RawKind, RawSample};

fn main() {
    env_logger::init();

    let mut surface = DemoSurface::new();
    surface.add_region(Rect::new(0.0, 0.0, 200.0, 200.0), 1);

    let mut hub: GestureHub<u32> = GestureHub::new();

    let mut tap = TapRecognizer::new();
    tap.set_on_tap(|| println!("tap!"));
    hub.attach(1, tap);

    let mut pan = PanRecognizer::new();
    pan.set_on_pan_start(|d| println!("pan start at {:?}", d.position));
    pan.set_on_pan_update(|u| println!("pan by {:?}", u.delta));
    pan.set_on_pan_end(|_| println!("pan end"));
    hub.attach(1, pan);

    println!("-- press and release in place --");
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Down, Point::new(20.0, 20.0), 0));
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Up, Point::new(20.0, 20.0), 40));

    println!("-- press and drag --");
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Down, Point::new(20.0, 20.0), 500));
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Move, Point::new(26.0, 20.0), 516));
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Move, Point::new(33.0, 22.0), 532));
    hub.handle_sample(&mut surface, RawSample::mouse(RawKind::Up, Point::new(33.0, 22.0), 548));
}
