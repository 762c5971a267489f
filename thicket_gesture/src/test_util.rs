// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for recognizer unit tests: a stand-in for the
//! dispatch layer's state, plus event constructors.

use alloc::collections::VecDeque;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use thicket_arena::{ArenaEvent, ArenaSet};
use thicket_pointer::{PointerButtons, PointerEvent, PointerId, PointerPhase, PointerRouter};
use thicket_timing::TimerQueue;

use crate::config::GestureConfig;
use crate::recognizer::{ArenaOp, RecognizerCx, RecognizerId, TimerTask};

pub(crate) const ME: RecognizerId = RecognizerId::new(0);

/// The mutable state a binding would own, for driving one recognizer by
/// hand in tests.
pub(crate) struct TestWorld {
    pub(crate) config: GestureConfig,
    pub(crate) router: PointerRouter<RecognizerId>,
    pub(crate) arenas: ArenaSet<RecognizerId>,
    pub(crate) timers: TimerQueue<TimerTask>,
    pub(crate) deferred: VecDeque<ArenaOp>,
}

impl TestWorld {
    pub(crate) fn new() -> Self {
        Self {
            config: GestureConfig::default(),
            router: PointerRouter::new(),
            arenas: ArenaSet::new(),
            timers: TimerQueue::new(),
            deferred: VecDeque::new(),
        }
    }

    pub(crate) fn cx(&mut self, now: u64) -> RecognizerCx<'_> {
        RecognizerCx::new(
            ME,
            now,
            &self.config,
            &mut self.router,
            &mut self.arenas,
            &mut self.timers,
            &mut self.deferred,
        )
    }

    /// Applies queued arena operations, returning the deliveries a binding
    /// would dispatch.
    pub(crate) fn pump(&mut self) -> alloc::vec::Vec<ArenaEvent<RecognizerId>> {
        let mut out = alloc::vec::Vec::new();
        while let Some(op) = self.deferred.pop_front() {
            match op {
                ArenaOp::Resolve(entry, disposition) => {
                    out.extend(self.arenas.resolve(entry, disposition));
                }
                ArenaOp::Release(pointer) => {
                    out.extend(self.arenas.release(pointer));
                }
            }
        }
        out
    }
}

pub(crate) fn event(pointer: PointerId, phase: PointerPhase, x: f64, y: f64, ts: u64) -> PointerEvent {
    PointerEvent {
        pointer,
        phase,
        position: Point::new(x, y),
        delta: Vec2::ZERO,
        buttons: PointerButtons::PRIMARY,
        touches: SmallVec::new(),
        timestamp: ts,
    }
}

pub(crate) fn move_event(pointer: PointerId, x: f64, y: f64, dx: f64, dy: f64, ts: u64) -> PointerEvent {
    PointerEvent {
        delta: Vec2::new(dx, dy),
        ..event(pointer, PointerPhase::Move, x, y, ts)
    }
}
