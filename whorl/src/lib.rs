// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whorl: a self-mutating tree of curved segments animated under rotational symmetry.
//!
//! A [`Pattern`] grows a forest of circular-arc [`Segment`]s. Every segment
//! carries a radius, a swept arc, and the point along its parent where it
//! attaches; all three drift towards random goals through
//! [`ScheduledChange`]s, each a linear interpolation over a random number of
//! frames. When a change lands, its segment re-plans: it may sprout a new
//! branch and it schedules fresh changes, one of which may shrink its arc to
//! nothing and delete it. The whole picture is drawn several times around the
//! centre, and the fold count itself changes over time without ever drawing
//! a fractional number of copies.
//!
//! ## Structure
//!
//! - [`Forest`]: arena of segments addressed by generational [`SegmentId`]s.
//!   Parents are handles, not owners. Removing a segment hands its children
//!   to its parent.
//! - [`ScheduledChange`]: one attribute of one segment moving towards a goal.
//! - [`Pattern`]: the forest, the change queue, global spin, and the
//!   symmetry state machine ([`Transition`]).
//! - [`Surface`]: what a graphics backend must provide to draw a pattern.
//! - [`Config`]: tunables, with rates per second so the frame rate can change.
//!
//! ## Invariants
//!
//! - Each child's [`Segment::max_radius`] is exactly half its parent's; roots
//!   use [`Config::limit`]. Drawing panics if this is ever broken.
//! - [`Pattern::complexity`] equals the number of live segments.
//! - At most one change per attribute per segment is in flight, and the
//!   segment's [`Animating`] flags say which.
//!
//! ## Driving a pattern
//!
//! The host owns the loop. Each frame it prepares the visible frame and calls
//! [`Pattern::tick`], which draws, advances every change by one frame, and
//! makes the random decisions for the next one.
//!
//! ```
//! use rand::{SeedableRng, rngs::SmallRng};
//! use whorl::{Config, Pattern};
//!
//! let mut pattern = Pattern::new(Config::for_frame(500.0, 500.0), SmallRng::seed_from_u64(7));
//! for _ in 0..600 {
//!     pattern.change();
//!     pattern.plan();
//! }
//! assert_eq!(pattern.complexity(), pattern.forest().len());
//! assert!(!pattern.forest().is_empty());
//! ```
//!
//! All randomness comes from the generator handed to [`Pattern::new`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod change;
mod config;
mod forest;
mod pattern;
mod segment;
mod surface;
mod types;

pub use change::{Progress, ScheduledChange};
pub use config::Config;
pub use forest::Forest;
pub use pattern::{Pattern, Transition};
pub use segment::{Segment, stroke_width};
pub use surface::Surface;
pub use types::{Animating, Attribute, Direction, SegmentId};

/// Greatest common divisor; `gcd(a, 0) == a`.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
