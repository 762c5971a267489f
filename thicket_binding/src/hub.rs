// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hub: the one object that owns all mutable gesture state.
//!
//! ## Per-sample pipeline
//!
//! Samples drain strictly first-in-first-out. For each one, in order:
//!
//! 1. Fire timers due at or before the sample's timestamp.
//! 2. Normalize the raw sample into a [`PointerEvent`].
//! 3. Dispatch by phase:
//!    - contact-opening (down, pan/zoom start): hit test, cache the path,
//!      offer the event to every interested recognizer attached along it,
//!      then close the arena;
//!    - moves and contact-ending events: deliver to a snapshot of the
//!      pointer's routes, in registration order;
//!    - up (and pan/zoom end): afterwards sweep the arena and drop the
//!      cached path; a cancel drops the path without a sweep;
//!    - hover with no active contact: fresh, uncached hit test only.
//! 4. Pump deferred arena operations to a fixed point, delivering
//!    accept/reject verdicts as they emerge.
//!
//! All of this happens synchronously inside
//! [`handle_sample`](GestureHub::handle_sample); re-entrant calls (a
//! callback feeding a synthetic sample back in) enqueue and are drained by
//! the outer call, preserving arrival order.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use thicket_arena::{ArenaEvent, ArenaSet};
use thicket_gesture::{
    ArenaOp, GestureConfig, GestureRecognizer, Recognizer, RecognizerCx, RecognizerId, TimerTask,
};
use thicket_pointer::{
    PointerEvent, PointerId, PointerNormalizer, PointerPhase, PointerRouter, RawSample,
};
use thicket_timing::TimerQueue;

use crate::hit::{HitTest, HitTestResult};

/// The top-level gesture orchestrator.
///
/// `K` is the host's hit-test target key (a node id, a widget id). Attach
/// recognizers to targets, then feed raw samples through
/// [`handle_sample`](Self::handle_sample) together with the host's
/// [`HitTest`] implementation. Everything mutable — router, arena table,
/// timers, hit-path cache, recognizer registry — hangs off this instance;
/// there are no ambient singletons.
pub struct GestureHub<K> {
    config: GestureConfig,
    normalizer: PointerNormalizer,
    router: PointerRouter<RecognizerId>,
    arenas: ArenaSet<RecognizerId>,
    timers: TimerQueue<TimerTask>,
    deferred: VecDeque<ArenaOp>,
    recognizers: Vec<Option<Recognizer>>,
    next_id: u32,
    attachments: HashMap<K, SmallVec<[RecognizerId; 2]>>,
    hit_paths: HashMap<PointerId, Vec<K>>,
    queue: VecDeque<RawSample>,
    draining: bool,
    now: u64,
}

impl<K> core::fmt::Debug for GestureHub<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureHub")
            .field("recognizers", &self.recognizers.len())
            .field("active_pointers", &self.hit_paths.len())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash> Default for GestureHub<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> GestureHub<K> {
    /// Creates a hub with the default [`GestureConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Creates a hub with explicit interaction parameters.
    #[must_use]
    pub fn with_config(config: GestureConfig) -> Self {
        let normalizer = PointerNormalizer::with_slop(config.touch_slop);
        Self {
            config,
            normalizer,
            router: PointerRouter::new(),
            arenas: ArenaSet::new(),
            timers: TimerQueue::new(),
            deferred: VecDeque::new(),
            recognizers: Vec::new(),
            next_id: 0,
            attachments: HashMap::new(),
            hit_paths: HashMap::new(),
            queue: VecDeque::new(),
            draining: false,
            now: 0,
        }
    }

    /// The hub's interaction parameters.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Sets the device-pixel ratio applied to all subsequent samples.
    pub fn set_device_pixel_ratio(&mut self, scale: f64) {
        self.normalizer.set_device_pixel_ratio(scale);
    }

    /// Attaches a recognizer to a hit-test target.
    ///
    /// Attachment order matters: it decides registration order within one
    /// target, and registration order is the arena's sweep tie-break.
    pub fn attach(&mut self, target: K, recognizer: impl Into<Recognizer>) -> RecognizerId {
        let id = RecognizerId::new(self.next_id);
        self.next_id += 1;
        self.recognizers.push(Some(recognizer.into()));
        self.attachments.entry(target).or_default().push(id);
        id
    }

    /// Removes a recognizer. Ids are never reused; deliveries already in
    /// flight for the removed recognizer are silently skipped.
    pub fn detach(&mut self, id: RecognizerId) {
        if let Some(slot) = self.recognizers.get_mut(id.raw() as usize) {
            *slot = None;
        }
        for ids in self.attachments.values_mut() {
            ids.retain(|r| *r != id);
        }
        self.attachments.retain(|_, ids| !ids.is_empty());
    }

    /// The cached hit path for `pointer`, present exactly while the pointer
    /// is between its down and its up or cancel.
    #[must_use]
    pub fn active_path(&self, pointer: PointerId) -> Option<&[K]> {
        self.hit_paths.get(&pointer).map(|p| p.as_slice())
    }

    /// Feeds one raw platform sample through the pipeline.
    ///
    /// Samples enqueue and drain strictly first-in-first-out; a re-entrant
    /// call from inside a callback enqueues for the outer drain.
    pub fn handle_sample(&mut self, surface: &mut impl HitTest<K>, sample: RawSample) {
        self.queue.push_back(sample);
        if self.draining {
            return;
        }
        self.draining = true;
        while let Some(next) = self.queue.pop_front() {
            self.dispatch_sample(surface, next);
        }
        self.draining = false;
    }

    /// Fires every timer due at or before `now`. Call from the host's idle
    /// loop so deadlines elapse on a motionless pointer.
    pub fn advance_to(&mut self, now: u64) {
        self.now = self.now.max(now);
        while let Some((_, task)) = self.timers.pop_expired(now) {
            self.with_recognizer(task.recognizer, |r, cx| r.timer_fired(task.pointer, cx));
            self.pump();
        }
    }

    fn dispatch_sample(&mut self, surface: &mut impl HitTest<K>, sample: RawSample) {
        // Deadlines that elapsed before this sample fire first, so a timer
        // and a sample land in timestamp order.
        self.advance_to(sample.timestamp);
        let event = self.normalizer.normalize(&sample);
        match event.phase {
            PointerPhase::Down | PointerPhase::PanZoomStart => {
                let mut result = HitTestResult::new();
                surface.hit_test(&mut result, event.position);
                let path: Vec<K> = result.entries().iter().map(|e| e.target).collect();
                log::debug!(
                    "contact {:?} opened over {} hit targets",
                    event.pointer,
                    path.len()
                );
                for &target in &path {
                    let ids: SmallVec<[RecognizerId; 2]> =
                        self.attachments.get(&target).cloned().unwrap_or_default();
                    for id in ids {
                        self.offer(id, &event);
                    }
                }
                self.hit_paths.insert(event.pointer, path);
                let verdicts = self.arenas.close(event.pointer);
                self.deliver(event.pointer, verdicts);
                self.pump();
            }
            PointerPhase::Move | PointerPhase::PanZoomUpdate => {
                self.route(&event);
            }
            PointerPhase::Up | PointerPhase::PanZoomEnd => {
                self.route(&event);
                self.hit_paths.remove(&event.pointer);
                let verdicts = self.arenas.sweep(event.pointer);
                self.deliver(event.pointer, verdicts);
                self.pump();
            }
            PointerPhase::Cancel => {
                self.route(&event);
                // No sweep on cancel: recognizers withdraw themselves and
                // the arena resolves (or empties) through those rejects.
                self.hit_paths.remove(&event.pointer);
            }
            PointerPhase::Hover => {
                // No contact, no cache, no arena: the hit test itself is the
                // product, for hosts that track hover through their
                // `HitTest` implementation.
                let mut result = HitTestResult::new();
                surface.hit_test(&mut result, event.position);
                log::trace!("hover over {} targets", result.entries().len());
            }
        }
    }

    /// Offers a contact-opening event to one attached recognizer.
    ///
    /// Deliberately does not pump: dispositions queued during the
    /// registration pass (a pan/zoom's unconditional accept, a double-tap's
    /// second-down accept) wait until after `close`, so an early win cannot
    /// resolve the arena out from under candidates still registering.
    fn offer(&mut self, id: RecognizerId, event: &PointerEvent) {
        self.with_recognizer(id, |r, cx| {
            if r.is_interested() {
                r.add_pointer(event, cx);
            }
        });
    }

    /// Delivers an event to the pointer's routes, in registration order.
    ///
    /// The route list is snapshotted first: handlers may unregister (or
    /// resolve arenas) mid-delivery without skewing this event's order.
    fn route(&mut self, event: &PointerEvent) {
        let routes: SmallVec<[RecognizerId; 2]> =
            SmallVec::from_slice(self.router.routes_for(event.pointer));
        for id in routes {
            self.with_recognizer(id, |r, cx| r.handle_event(event, cx));
            self.pump();
        }
    }

    /// Applies deferred arena operations until none remain, delivering the
    /// verdicts they produce (which may defer further operations).
    fn pump(&mut self) {
        while let Some(op) = self.deferred.pop_front() {
            let (pointer, verdicts) = match op {
                ArenaOp::Resolve(entry, disposition) => {
                    (entry.pointer(), self.arenas.resolve(entry, disposition))
                }
                ArenaOp::Release(pointer) => (pointer, self.arenas.release(pointer)),
            };
            self.deliver(pointer, verdicts);
        }
    }

    fn deliver(&mut self, pointer: PointerId, verdicts: Vec<ArenaEvent<RecognizerId>>) {
        for verdict in verdicts {
            match verdict {
                ArenaEvent::Accepted(id) => {
                    self.with_recognizer(id, |r, cx| r.accept_gesture(pointer, cx));
                }
                ArenaEvent::Rejected(id) => {
                    self.with_recognizer(id, |r, cx| r.reject_gesture(pointer, cx));
                }
            }
        }
    }

    /// Checks a recognizer out of the registry, runs `f` with a fresh
    /// context over the hub's state, and checks it back in. Detached ids
    /// are skipped.
    fn with_recognizer(
        &mut self,
        id: RecognizerId,
        f: impl FnOnce(&mut Recognizer, &mut RecognizerCx<'_>),
    ) {
        let idx = id.raw() as usize;
        let Some(slot) = self.recognizers.get_mut(idx) else {
            return;
        };
        let Some(mut recognizer) = slot.take() else {
            return;
        };
        let mut cx = RecognizerCx::new(
            id,
            self.now,
            &self.config,
            &mut self.router,
            &mut self.arenas,
            &mut self.timers,
            &mut self.deferred,
        );
        f(&mut recognizer, &mut cx);
        if let Some(slot) = self.recognizers.get_mut(idx) {
            *slot = Some(recognizer);
        }
    }
}
