// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Arena: per-pointer arbitration between competing gesture
//! recognizers.
//!
//! ## Overview
//!
//! When a pointer goes down over a tree of interactive targets, several
//! recognizers may plausibly own the contact: a tap, a drag, a long-press.
//! Each one that wants the pointer registers as a *member* of that pointer's
//! arena. The arena then guarantees that at most one member ever wins, no
//! matter how the competition plays out: an early self-accept, everyone else
//! backing out, or a forced sweep when the pointer comes back up.
//!
//! ## Protocol
//!
//! For each pointer id, in order:
//!
//! 1. [`ArenaSet::add`] during the down dispatch pass — members register in
//!    hit order. Registration order is part of the contract: it decides the
//!    sweep tie-break.
//! 2. [`ArenaSet::close`] once the down dispatch pass finishes. A lone
//!    member wins on the spot; an empty arena is discarded with no winner.
//! 3. Members resolve themselves through their [`ArenaEntry`] with
//!    [`ArenaSet::resolve`]: `Accepted` wins the whole arena immediately
//!    (legal even before close — the pre-emptive win drags use); `Rejected`
//!    drops the member out, and the last member standing wins.
//! 4. [`ArenaSet::sweep`] on pointer up forces a decision: the
//!    earliest-registered survivor wins, everyone else loses.
//! 5. [`ArenaSet::hold`] / [`ArenaSet::release`] stretch the decision window
//!    past the up, for recognizers that need to wait (a possible second
//!    tap). A sweep requested while held runs exactly once, at release.
//!
//! ## Delivery
//!
//! The manager owns the pointer → arena table exclusively and never calls
//! into members. Every mutating operation returns the list of
//! [`ArenaEvent`]s — `Accepted`/`Rejected` per member — that the caller must
//! deliver. This keeps re-entrancy at the dispatch layer, where it can be
//! sequenced deterministically.
//!
//! ## Minimal example
//!
//! ```
//! use thicket_arena::{ArenaEvent, ArenaSet, Disposition};
//! use thicket_pointer::PointerId;
//!
//! let mut arenas: ArenaSet<&str> = ArenaSet::new();
//! let p = PointerId::MOUSE;
//!
//! let _tap = arenas.add(p, "tap");
//! let pan = arenas.add(p, "pan");
//! assert!(arenas.close(p).is_empty()); // two members: no decision yet
//!
//! // The pan backs out; the tap is the last member standing and wins.
//! let events = arenas.resolve(pan, Disposition::Rejected);
//! assert!(events.contains(&ArenaEvent::Rejected("pan")));
//! assert!(events.contains(&ArenaEvent::Accepted("tap")));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;
use thicket_pointer::PointerId;

/// A member's self-reported outcome for one pointer's competition.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Disposition {
    /// The member claims the pointer for itself.
    Accepted,
    /// The member withdraws from the competition.
    Rejected,
}

/// A notification the caller must deliver to a member.
///
/// Returned by the mutating operations of [`ArenaSet`]. For any one
/// pointer's arena lifetime, at most one `Accepted` is ever emitted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ArenaEvent<M> {
    /// The member owns the pointer; stream the gesture to it.
    Accepted(M),
    /// The member lost; it must reset and wait for a fresh contact.
    Rejected(M),
}

/// Capability handle for one `(pointer, member)` registration.
///
/// Returned by [`ArenaSet::add`]; the member's only way to report a
/// [`Disposition`] back into its arena. Resolving an entry whose arena is
/// gone (or whose registration was stale) is a silent no-op — timers
/// legitimately fire after natural resolution.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ArenaEntry<M> {
    pointer: PointerId,
    member: M,
}

impl<M: Copy> ArenaEntry<M> {
    /// The pointer this entry is registered for.
    #[must_use]
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// The member this entry belongs to.
    #[must_use]
    pub fn member(&self) -> M {
        self.member
    }
}

#[derive(Debug)]
struct Arena<M> {
    /// Competing members, in registration order. Order is the sweep
    /// tie-break.
    members: SmallVec<[M; 4]>,
    is_open: bool,
    is_held: bool,
    pending_sweep: bool,
    /// Recorded when a member self-rejects while the arena is still open.
    /// No resolution path reads it; see [`ArenaSet::eager_winner`].
    eager_winner: Option<M>,
}

impl<M> Arena<M> {
    fn new() -> Self {
        Self {
            members: SmallVec::new(),
            is_open: true,
            is_held: false,
            pending_sweep: false,
            eager_winner: None,
        }
    }
}

/// The manager: one arena per active pointer id.
///
/// `M` is the member key — any small copyable identifier the dispatch layer
/// can turn back into a recognizer. The table is owned exclusively by this
/// type; members observe it only through entries and delivered
/// [`ArenaEvent`]s.
#[derive(Debug)]
pub struct ArenaSet<M> {
    arenas: HashMap<PointerId, Arena<M>>,
}

impl<M> Default for ArenaSet<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ArenaSet<M> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arenas: HashMap::new(),
        }
    }
}

impl<M: Copy + Eq + core::fmt::Debug> ArenaSet<M> {
    /// Registers `member` into the arena for `pointer`, creating the arena
    /// on first registration.
    ///
    /// Registering into an arena that has already closed is a no-op; the
    /// returned entry is stale and resolving it does nothing.
    pub fn add(&mut self, pointer: PointerId, member: M) -> ArenaEntry<M> {
        let arena = self.arenas.entry(pointer).or_insert_with(Arena::new);
        if arena.is_open && !arena.members.contains(&member) {
            arena.members.push(member);
        }
        ArenaEntry { pointer, member }
    }

    /// Closes the arena for `pointer` to new members.
    ///
    /// Called exactly once per pointer, after the down dispatch pass has
    /// given every candidate a chance to register. A lone member wins
    /// immediately; an empty arena is discarded with no winner. Closing a
    /// pointer with no arena (for example after a pre-emptive win already
    /// resolved it) is a no-op.
    pub fn close(&mut self, pointer: PointerId) -> Vec<ArenaEvent<M>> {
        let Some(arena) = self.arenas.get_mut(&pointer) else {
            return Vec::new();
        };
        arena.is_open = false;
        self.try_resolve_default(pointer)
    }

    /// Applies a member's disposition, reported through its entry.
    ///
    /// - `Rejected`: the member leaves its arena (and is notified). If the
    ///   arena is closed and exactly one member remains, that member wins.
    ///   If the arena is still open, the rejecting member is recorded as the
    ///   eager winner; nothing reads that record (see
    ///   [`Self::eager_winner`]).
    /// - `Accepted`: resolves the whole arena in favor of the member, even
    ///   while the arena is still open (the pre-emptive win).
    ///
    /// Resolving against a missing arena or a stale entry returns no events.
    pub fn resolve(&mut self, entry: ArenaEntry<M>, disposition: Disposition) -> Vec<ArenaEvent<M>> {
        let ArenaEntry { pointer, member } = entry;
        let Some(arena) = self.arenas.get_mut(&pointer) else {
            return Vec::new();
        };
        let Some(idx) = arena.members.iter().position(|m| *m == member) else {
            return Vec::new();
        };
        match disposition {
            Disposition::Rejected => {
                arena.members.remove(idx);
                let mut events = Vec::new();
                events.push(ArenaEvent::Rejected(member));
                if arena.is_open {
                    // Remembered as a presumptive fallback; dead state by
                    // observation, kept for parity with the protocol.
                    arena.eager_winner.get_or_insert(member);
                } else {
                    events.extend(self.try_resolve_default(pointer));
                }
                events
            }
            Disposition::Accepted => self.resolve_in_favor_of(pointer, member),
        }
    }

    /// Forces a resolution for `pointer`, normally on pointer up.
    ///
    /// The earliest-registered member wins; all others are rejected; the
    /// arena is discarded. If the arena is held, the sweep is deferred until
    /// [`Self::release`]. Sweeping a missing arena is a no-op; sweeping a
    /// still-open arena is a caller contract violation and is refused with
    /// a warning.
    pub fn sweep(&mut self, pointer: PointerId) -> Vec<ArenaEvent<M>> {
        let Some(arena) = self.arenas.get_mut(&pointer) else {
            return Vec::new();
        };
        if arena.is_open {
            log::warn!("refusing to sweep still-open arena for {pointer:?}; close it first");
            return Vec::new();
        }
        if arena.is_held {
            arena.pending_sweep = true;
            return Vec::new();
        }
        let Some(arena) = self.arenas.remove(&pointer) else {
            return Vec::new();
        };
        let mut members = arena.members.into_iter();
        let Some(winner) = members.next() else {
            return Vec::new();
        };
        log::debug!("arena for {pointer:?} swept in favor of {winner:?}");
        let mut events = Vec::new();
        events.push(ArenaEvent::Accepted(winner));
        events.extend(members.map(ArenaEvent::Rejected));
        events
    }

    /// Prevents the arena for `pointer` from being swept until
    /// [`Self::release`] is called.
    pub fn hold(&mut self, pointer: PointerId) {
        if let Some(arena) = self.arenas.get_mut(&pointer) {
            arena.is_held = true;
        }
    }

    /// Releases a hold placed by [`Self::hold`].
    ///
    /// If a sweep was requested while the arena was held, it runs now,
    /// exactly once.
    pub fn release(&mut self, pointer: PointerId) -> Vec<ArenaEvent<M>> {
        let Some(arena) = self.arenas.get_mut(&pointer) else {
            return Vec::new();
        };
        arena.is_held = false;
        if arena.pending_sweep {
            arena.pending_sweep = false;
            self.sweep(pointer)
        } else {
            Vec::new()
        }
    }

    /// Returns `true` while an arena exists for `pointer`.
    #[must_use]
    pub fn contains(&self, pointer: PointerId) -> bool {
        self.arenas.contains_key(&pointer)
    }

    /// Returns the current members of `pointer`'s arena, in registration
    /// order, if the arena exists.
    #[must_use]
    pub fn members(&self, pointer: PointerId) -> Option<&[M]> {
        self.arenas.get(&pointer).map(|a| a.members.as_slice())
    }

    /// Returns the recorded eager winner for `pointer`'s arena, if any.
    ///
    /// Bookkeeping only: the record is written when a member self-rejects
    /// while the arena is still open, and no resolution path ever consults
    /// it.
    #[must_use]
    pub fn eager_winner(&self, pointer: PointerId) -> Option<M> {
        self.arenas.get(&pointer).and_then(|a| a.eager_winner)
    }

    /// Resolves in favor of the last member standing once the arena has
    /// closed; discards an emptied arena.
    fn try_resolve_default(&mut self, pointer: PointerId) -> Vec<ArenaEvent<M>> {
        let Some(arena) = self.arenas.get(&pointer) else {
            return Vec::new();
        };
        match arena.members.len() {
            0 => {
                self.arenas.remove(&pointer);
                Vec::new()
            }
            1 => {
                let winner = arena.members[0];
                self.arenas.remove(&pointer);
                log::debug!("arena for {pointer:?} resolved by default to {winner:?}");
                let mut events = Vec::new();
                events.push(ArenaEvent::Accepted(winner));
                events
            }
            _ => Vec::new(),
        }
    }

    /// Resolves the whole arena in favor of `winner`: losers are rejected,
    /// the winner accepted, the arena discarded.
    fn resolve_in_favor_of(&mut self, pointer: PointerId, winner: M) -> Vec<ArenaEvent<M>> {
        let Some(arena) = self.arenas.remove(&pointer) else {
            return Vec::new();
        };
        log::debug!("arena for {pointer:?} resolved in favor of {winner:?}");
        let mut events: Vec<ArenaEvent<M>> = arena
            .members
            .iter()
            .filter(|m| **m != winner)
            .map(|m| ArenaEvent::Rejected(*m))
            .collect();
        events.push(ArenaEvent::Accepted(winner));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    const P: PointerId = PointerId::MOUSE;

    fn accepted<M: Copy + Eq>(events: &[ArenaEvent<M>]) -> Vec<M> {
        events
            .iter()
            .filter_map(|e| match e {
                ArenaEvent::Accepted(m) => Some(*m),
                ArenaEvent::Rejected(_) => None,
            })
            .collect()
    }

    fn rejected<M: Copy + Eq>(events: &[ArenaEvent<M>]) -> Vec<M> {
        events
            .iter()
            .filter_map(|e| match e {
                ArenaEvent::Rejected(m) => Some(*m),
                ArenaEvent::Accepted(_) => None,
            })
            .collect()
    }

    #[test]
    fn close_with_single_member_accepts_immediately() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        let events = arenas.close(P);
        assert_eq!(accepted(&events), vec!["tap"]);
        assert!(!arenas.contains(P));
    }

    #[test]
    fn close_with_no_members_discards_without_winner() {
        let mut arenas: ArenaSet<&str> = ArenaSet::new();
        let entry = arenas.add(P, "tap");
        // The lone candidate withdraws while the arena is still open.
        arenas.resolve(entry, Disposition::Rejected);
        let events = arenas.close(P);
        assert!(events.is_empty());
        assert!(!arenas.contains(P));
    }

    #[test]
    fn close_with_competition_defers_decision() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        arenas.add(P, "pan");
        assert!(arenas.close(P).is_empty());
        assert_eq!(arenas.members(P), Some(&["tap", "pan"][..]));
    }

    #[test]
    fn add_after_close_is_stale() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        arenas.add(P, "pan");
        arenas.close(P);

        let late = arenas.add(P, "late");
        assert_eq!(arenas.members(P), Some(&["tap", "pan"][..]));
        // A stale entry cannot win the arena.
        assert!(arenas.resolve(late, Disposition::Accepted).is_empty());
        assert!(arenas.contains(P));
    }

    #[test]
    fn accept_resolves_in_favor_rejecting_others() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        let pan = arenas.add(P, "pan");
        arenas.add(P, "press");
        arenas.close(P);

        let events = arenas.resolve(pan, Disposition::Accepted);
        assert_eq!(accepted(&events), vec!["pan"]);
        assert_eq!(rejected(&events), vec!["tap", "press"]);
        assert!(!arenas.contains(P));
    }

    #[test]
    fn accept_while_open_is_a_preemptive_win() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        let zoom = arenas.add(P, "zoom");

        let events = arenas.resolve(zoom, Disposition::Accepted);
        assert_eq!(accepted(&events), vec!["zoom"]);
        assert_eq!(rejected(&events), vec!["tap"]);

        // The later close of the already-resolved arena is a no-op.
        assert!(arenas.close(P).is_empty());
    }

    #[test]
    fn reject_down_to_one_member_after_close_wins() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        let press = arenas.add(P, "press");
        arenas.close(P);

        let events = arenas.resolve(press, Disposition::Rejected);
        assert_eq!(rejected(&events), vec!["press"]);
        assert_eq!(accepted(&events), vec!["tap"]);
        assert!(!arenas.contains(P));
    }

    #[test]
    fn reject_while_open_records_eager_winner_without_resolving() {
        let mut arenas = ArenaSet::new();
        let tap = arenas.add(P, "tap");
        arenas.add(P, "pan");

        let events = arenas.resolve(tap, Disposition::Rejected);
        assert_eq!(rejected(&events), vec!["tap"]);
        assert_eq!(accepted(&events), Vec::<&str>::new());
        // Recorded but never consulted by any resolution path.
        assert_eq!(arenas.eager_winner(P), Some("tap"));
        assert_eq!(arenas.members(P), Some(&["pan"][..]));
    }

    #[test]
    fn sweep_accepts_earliest_registered_and_rejects_rest() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        arenas.add(P, "pan");
        arenas.add(P, "press");
        arenas.close(P);

        let events = arenas.sweep(P);
        assert_eq!(events[0], ArenaEvent::Accepted("tap"));
        assert_eq!(rejected(&events), vec!["pan", "press"]);
        assert!(!arenas.contains(P));
    }

    #[test]
    fn sweep_on_open_arena_is_refused() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        arenas.add(P, "pan");

        assert!(arenas.sweep(P).is_empty());
        assert_eq!(arenas.members(P), Some(&["tap", "pan"][..]));
    }

    #[test]
    fn sweep_without_arena_is_noop() {
        let mut arenas: ArenaSet<&str> = ArenaSet::new();
        assert!(arenas.sweep(P).is_empty());
    }

    #[test]
    fn hold_defers_sweep_until_release() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        arenas.add(P, "double");
        arenas.close(P);
        arenas.hold(P);

        // Pointer comes up: the sweep is requested but deferred.
        assert!(arenas.sweep(P).is_empty());
        assert!(arenas.contains(P));

        let events = arenas.release(P);
        assert_eq!(accepted(&events), vec!["tap"]);
        assert_eq!(rejected(&events), vec!["double"]);

        // The pending sweep ran exactly once; a second release finds nothing.
        assert!(arenas.release(P).is_empty());
    }

    #[test]
    fn release_without_pending_sweep_only_clears_hold() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, "tap");
        arenas.add(P, "double");
        arenas.close(P);
        arenas.hold(P);

        assert!(arenas.release(P).is_empty());
        // Not held any more: the next sweep resolves immediately.
        let events = arenas.sweep(P);
        assert_eq!(accepted(&events), vec!["tap"]);
    }

    #[test]
    fn resolving_after_resolution_is_silent() {
        let mut arenas = ArenaSet::new();
        let tap = arenas.add(P, "tap");
        arenas.close(P);

        // Resolved at close (single member). Late dispositions are no-ops,
        // the way a timer firing after the gesture completed must be.
        assert!(arenas.resolve(tap, Disposition::Accepted).is_empty());
        assert!(arenas.resolve(tap, Disposition::Rejected).is_empty());
    }

    // At most one member is ever accepted across an arena's lifetime,
    // whichever way the competition resolves.
    #[test]
    fn at_most_one_accept_per_arena_lifetime() {
        let mut arenas = ArenaSet::new();
        arenas.add(P, 1_u32);
        let b = arenas.add(P, 2_u32);
        let c = arenas.add(P, 3_u32);

        let mut all: Vec<ArenaEvent<u32>> = Vec::new();
        all.extend(arenas.close(P));
        all.extend(arenas.resolve(c, Disposition::Rejected));
        all.extend(arenas.resolve(b, Disposition::Accepted));
        all.extend(arenas.sweep(P));

        assert_eq!(accepted(&all).len(), 1);
    }

    #[test]
    fn pointers_compete_independently() {
        let mut arenas = ArenaSet::new();
        let p1 = PointerId::from_touch(0);
        arenas.add(P, "a");
        arenas.add(p1, "b");
        arenas.close(P);

        assert!(!arenas.contains(P)); // lone member won at close
        assert!(arenas.contains(p1)); // still open, untouched
    }
}
