// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the segment forest: handles, chirality, and animation flags.

/// Identifier for a segment in a [`Forest`](crate::Forest).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On deletion, the slot is freed; any existing `SegmentId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `SegmentId`.
///
/// A stale handle is how a deleted segment is recognised: pending
/// [`ScheduledChange`](crate::ScheduledChange)s keep their handle after the target is
/// deleted and simply stop touching it.
/// Use [`Forest::is_alive`](crate::Forest::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SegmentId(pub(crate) u32, pub(crate) u32);

impl SegmentId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Chirality of a segment's curvature.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Sweeps counter-clockwise on screen (`+1`).
    CounterClockwise,
    /// Sweeps clockwise on screen (`-1`).
    Clockwise,
}

impl Direction {
    /// The signed unit this direction contributes to angle arithmetic.
    pub const fn sign(self) -> f64 {
        match self {
            Self::CounterClockwise => 1.0,
            Self::Clockwise => -1.0,
        }
    }

    /// Pick either direction with equal probability.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }
}

/// One of the three animatable scalar attributes of a [`Segment`](crate::Segment).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Attribute {
    /// [`Segment::radius`](crate::Segment::radius).
    Radius,
    /// [`Segment::arc`](crate::Segment::arc).
    Arc,
    /// [`Segment::attach`](crate::Segment::attach).
    Attach,
}

impl Attribute {
    /// The [`Animating`] bit raised while a change of this kind is in flight.
    pub const fn flag(self) -> Animating {
        match self {
            Self::Radius => Animating::RADIUS,
            Self::Arc => Animating::ARC,
            Self::Attach => Animating::ATTACH,
        }
    }
}

bitflags::bitflags! {
    /// Which attributes of a segment currently have a change animating.
    ///
    /// At most one change per attribute is in flight; [`Pattern::mutate`](crate::Pattern::mutate)
    /// only schedules attributes whose bit is clear.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Animating: u8 {
        /// A radius change is in flight.
        const RADIUS = 0b0000_0001;
        /// An arc change is in flight.
        const ARC    = 0b0000_0010;
        /// An attach change is in flight.
        const ATTACH = 0b0000_0100;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn attribute_flags_are_distinct() {
        let all = Attribute::Radius.flag() | Attribute::Arc.flag() | Attribute::Attach.flag();
        assert_eq!(all, Animating::all());
        assert_eq!(all.bits().count_ones(), 3);
    }

    #[test]
    fn random_direction_produces_both_signs() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = (false, false);
        for _ in 0..64 {
            match Direction::random(&mut rng) {
                Direction::CounterClockwise => seen.0 = true,
                Direction::Clockwise => seen.1 = true,
            }
        }
        assert_eq!(seen, (true, true), "64 fair draws should hit both directions");
    }
}
