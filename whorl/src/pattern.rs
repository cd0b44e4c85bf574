// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pattern: segment forest, change queue, spin, and symmetry transitions.

use alloc::vec::Vec;

use kurbo::Point;
use log::{debug, info, trace};
use rand::Rng;

use crate::change::{Progress, ScheduledChange};
use crate::config::Config;
use crate::forest::Forest;
use crate::gcd;
use crate::segment::Segment;
use crate::surface::Surface;
use crate::types::{Animating, Attribute, Direction, SegmentId};

/// An in-flight change of rotational symmetry.
///
/// While a transition runs the pattern is drawn as `folds × partitions`
/// copies: `folds` evenly spaced groups, each holding `partitions` copies
/// offset by multiples of [`current`](Self::current). `current` moves from
/// `360 / from` to `360 / goal` degrees, so the picture starts as `from`-fold
/// and ends as `goal`-fold while the number of drawn copies stays integral.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    from: u32,
    goal: u32,
    folds: u32,
    partitions: u32,
    current: f64,
    step: f64,
    count: u32,
}

impl Transition {
    /// Symmetry when the transition started.
    pub fn from(&self) -> u32 {
        self.from
    }

    /// Symmetry once the transition completes.
    pub fn goal(&self) -> u32 {
        self.goal
    }

    /// `gcd(from, goal)`: evenly spaced groups drawn during the transition.
    pub fn folds(&self) -> u32 {
        self.folds
    }

    /// Copies per group: `max(from, goal) / folds`.
    pub fn partitions(&self) -> u32 {
        self.partitions
    }

    /// Angular offset between copies within a group, in degrees.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Per-frame change of [`current`](Self::current).
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Frames remaining.
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// A self-driving, perpetually mutating branching pattern.
///
/// Each frame the host calls [`tick`](Self::tick) (or [`draw`](Self::draw),
/// [`change`](Self::change) and [`plan`](Self::plan) in that order). All
/// randomness comes from the injected generator `R`, so a seeded generator
/// gives a reproducible animation.
pub struct Pattern<R> {
    config: Config,
    rng: R,
    forest: Forest,
    changes: Vec<ScheduledChange>,
    symmetry: u32,
    angle: f64,
    spin: f64,
    complexity: usize,
    transition: Option<Transition>,
}

impl<R> core::fmt::Debug for Pattern<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pattern")
            .field("symmetry", &self.symmetry)
            .field("angle", &self.angle)
            .field("spin", &self.spin)
            .field("complexity", &self.complexity)
            .field("changes", &self.changes.len())
            .field("transition", &self.transition)
            .field("forest", &self.forest)
            .finish_non_exhaustive()
    }
}

impl<R: Rng> Pattern<R> {
    /// Create a pattern seeded with one root and three branches.
    ///
    /// Panics on the same invalid configurations as [`empty`](Self::empty).
    ///
    /// The root has radius `3/4 · limit`; its three initial children have
    /// half that. All four are in place before any of them is mutated, so
    /// the first branching decision already sees a complexity of 4. Every
    /// seeded segment is then mutated, root first, so the pattern starts
    /// moving (and possibly branching) on the first frame.
    pub fn new(config: Config, rng: R) -> Self {
        let mut pattern = Self::empty(config, rng);
        let limit = pattern.config.limit;
        let root = pattern.random_segment(3.0 * limit / 4.0, limit);
        let root = pattern.spawn(None, root);
        let mut children = [root; 3];
        for child in &mut children {
            let seeded = pattern.random_segment(3.0 * limit / 8.0, limit / 2.0);
            *child = pattern.spawn(Some(root), seeded);
        }
        pattern.mutate(root);
        for child in children {
            pattern.mutate(child);
        }
        pattern
    }

    /// Create a pattern with no segments.
    ///
    /// The first [`plan`](Self::plan) reseeds it.
    ///
    /// # Panics
    ///
    /// Panics if `config.fps` is not a positive finite number or
    /// `config.symmetry` is zero.
    pub fn empty(config: Config, mut rng: R) -> Self {
        assert!(
            config.fps.is_finite() && config.fps > 0.0,
            "frame rate must be positive, got {}",
            config.fps
        );
        assert!(config.symmetry > 0, "symmetry must have at least one fold");
        let spin = 0.25 + rng.r#gen::<f64>();
        Self {
            symmetry: config.symmetry,
            config,
            rng,
            forest: Forest::new(),
            changes: Vec::new(),
            angle: 0.0,
            spin,
            complexity: 0,
            transition: None,
        }
    }

    /// Parameters this pattern runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The segment forest.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Pending attribute changes, oldest first.
    pub fn changes(&self) -> &[ScheduledChange] {
        &self.changes
    }

    /// Committed rotational fold count.
    ///
    /// Changes exactly once per transition, when it completes.
    pub fn symmetry(&self) -> u32 {
        self.symmetry
    }

    /// Evenly spaced groups currently drawn: the symmetry when idle,
    /// [`Transition::folds`] while transitioning.
    pub fn folds(&self) -> u32 {
        self.transition.as_ref().map_or(self.symmetry, |t| t.folds)
    }

    /// Copies drawn per group: 1 when idle.
    pub fn partitions(&self) -> u32 {
        self.transition.as_ref().map_or(1, |t| t.partitions)
    }

    /// Target symmetry of the running transition, if any.
    pub fn goal(&self) -> Option<u32> {
        self.transition.as_ref().map(|t| t.goal)
    }

    /// The running symmetry transition, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Global rotation in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Angular velocity in radians per second.
    pub fn spin(&self) -> f64 {
        self.spin
    }

    /// Number of live segments, as tracked by spawning and deletion.
    pub fn complexity(&self) -> usize {
        self.complexity
    }

    /// Render one frame.
    ///
    /// Clears `layer`, strokes every root tree into it around its centre,
    /// then composites rotated copies of it, centred, onto `frame`. The host
    /// prepares `frame` (for example by filling it with a background).
    pub fn draw<S: Surface>(&self, layer: &mut S, frame: &mut S) {
        layer.clear();
        let size = layer.size();
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        for &root in self.forest.roots() {
            self.forest.draw(root, layer, center, self.angle);
        }

        let folds = self.folds();
        let partitions = self.partitions();
        let offset = self.transition.as_ref().map_or(0.0, |t| t.current);
        let target = frame.size();
        for i in 0..folds {
            let base = 360.0 * f64::from(i) / f64::from(folds);
            for j in 0..partitions {
                let copy = layer.rotated(base + f64::from(j) * offset);
                let s = copy.size();
                let origin = Point::new(
                    (target.width - s.width) / 2.0,
                    (target.height - s.height) / 2.0,
                );
                frame.composite(&copy, origin);
            }
        }
    }

    /// Advance one frame of planned motion, then re-plan every segment
    /// whose change just completed.
    ///
    /// Re-planning is what keeps the animation going forever: a finished
    /// change clears its animating bit, and [`mutate`](Self::mutate)
    /// schedules a fresh one.
    pub fn change(&mut self) {
        for id in self.advance_changes() {
            if self.forest.is_alive(id) {
                self.mutate(id);
            }
        }
    }

    /// Advance spin, the symmetry transition, and every pending change by one
    /// frame, without re-planning.
    ///
    /// Returns the targets of changes that completed this frame, in queue
    /// order. Targets deleted by a collapsing arc are included; they are no
    /// longer alive.
    pub fn advance_changes(&mut self) -> Vec<SegmentId> {
        self.angle += self.spin / self.config.fps;

        if let Some(t) = &mut self.transition {
            t.current += t.step;
            t.count -= 1;
            if t.count == 0 {
                debug!("symmetry {} -> {} committed", self.symmetry, t.goal);
                self.symmetry = t.goal;
                self.transition = None;
            }
        }

        let pending = core::mem::take(&mut self.changes);
        let mut keep = Vec::with_capacity(pending.len());
        let mut completed = Vec::new();
        for mut change in pending {
            match change.act(&mut self.forest) {
                Progress::Running => keep.push(change),
                Progress::Finished => completed.push(change.target()),
                Progress::Collapse => {
                    self.delete(change.target());
                    completed.push(change.target());
                }
            }
        }
        self.changes = keep;
        completed
    }

    /// Make the low-probability decisions for this frame: maybe start a
    /// symmetry transition, maybe kick the spin, and reseed if every segment
    /// has decayed.
    pub fn plan(&mut self) {
        if self.transition.is_none()
            && self.rng.r#gen::<f64>() < self.config.per_frame(self.config.retarget_rate)
        {
            if let Some(goal) = self.pick_goal() {
                let seconds = self.config.transition_base_seconds * (1.0 + self.rng.r#gen::<f64>());
                self.retarget(goal, seconds);
            }
        }

        if self.rng.r#gen::<f64>() < self.config.per_frame(self.config.spin_rate) {
            self.spin += self.rng.gen_range(-1.0..1.0);
            self.spin *= self.config.spin_damping;
        }

        if self.forest.roots().is_empty() {
            let limit = self.config.limit;
            let attach = self.rng.r#gen::<f64>();
            let direction = Direction::random(&mut self.rng);
            let root = self.spawn(None, Segment::new(0.0, 0.0, attach, direction, limit));
            self.schedule(root, Attribute::Radius, limit / 2.0, self.config.reseed_seconds);
            info!("pattern decayed completely; reseeded");
        }
    }

    /// Draw, change, and plan: one full frame.
    pub fn tick<S: Surface>(&mut self, layer: &mut S, frame: &mut S) {
        self.draw(layer, frame);
        self.change();
        self.plan();
    }

    /// Start a transition to `goal`-fold symmetry lasting `seconds`.
    ///
    /// Returns `false` (and does nothing) if a transition is already running
    /// or `goal` is zero or equal to the current symmetry.
    pub fn retarget(&mut self, goal: u32, seconds: f64) -> bool {
        if self.transition.is_some() || goal == 0 || goal == self.symmetry {
            return false;
        }
        let from = self.symmetry;
        let count = self.config.frames(seconds);
        let current = 360.0 / f64::from(from);
        let step = (360.0 / f64::from(goal) - current) / f64::from(count);
        let folds = gcd(from, goal);
        let partitions = from.max(goal) / folds;
        debug!("symmetry {from} -> {goal} over {count} frames ({folds} x {partitions} copies)");
        self.transition = Some(Transition {
            from,
            goal,
            folds,
            partitions,
            current,
            step,
            count,
        });
        true
    }

    /// Add `segment` under `parent` (or as a root) and count it.
    pub fn spawn(&mut self, parent: Option<SegmentId>, segment: Segment) -> SegmentId {
        let id = self.forest.insert(parent, segment);
        self.complexity += 1;
        trace!("spawned {id:?} under {parent:?}");
        id
    }

    /// Remove `target`, handing its children to its parent, and uncount it.
    ///
    /// Returns `false` if `target` was already gone.
    pub fn delete(&mut self, target: SegmentId) -> bool {
        if !self.forest.splice_out(target) {
            return false;
        }
        self.complexity = self.complexity.saturating_sub(1);
        trace!("deleted {target:?}");
        true
    }

    /// Queue a change of `attribute` on `target` towards `goal` over `seconds`.
    ///
    /// Returns `false` if `target` is not alive or that attribute is already
    /// animating.
    pub fn schedule(
        &mut self,
        target: SegmentId,
        attribute: Attribute,
        goal: f64,
        seconds: f64,
    ) -> bool {
        let frames = self.config.frames(seconds);
        match ScheduledChange::new(&mut self.forest, target, attribute, goal, frames) {
            Some(change) => {
                self.changes.push(change);
                true
            }
            None => false,
        }
    }

    /// Re-plan the future of `target`.
    ///
    /// May grow one new zero-sized branch (less likely the more complex the
    /// pattern is), then schedules a change for every attribute not already
    /// animating. An arc change may aim at zero, which deletes the segment
    /// when it lands (more likely the more complex the pattern is).
    pub fn mutate(&mut self, target: SegmentId) {
        let Some(seg) = self.forest.get(target) else {
            return;
        };
        let max_radius = seg.max_radius();
        let animating = seg.animating();
        let Config { flux, stable, .. } = self.config;

        if self.rng.r#gen::<f64>() * self.complexity as f64 * 3.0 < flux * stable {
            let attach = self.rng.r#gen::<f64>();
            let direction = Direction::random(&mut self.rng);
            let branch = Segment::new(0.0, 0.0, attach, direction, max_radius / 2.0);
            let branch = self.spawn(Some(target), branch);
            self.mutate(branch);
        }

        if !animating.contains(Animating::RADIUS) {
            let goal = (3.0 * self.rng.r#gen::<f64>() + 1.0) * max_radius / 4.0;
            let seconds = self.random_duration();
            self.schedule(target, Attribute::Radius, goal, seconds);
        }

        if !animating.contains(Animating::ARC) {
            let goal = if self.rng.r#gen::<f64>() * stable < flux * self.complexity as f64 {
                0.0
            } else {
                self.random_arc()
            };
            let seconds = self.random_duration();
            self.schedule(target, Attribute::Arc, goal, seconds);
        }

        if !animating.contains(Animating::ATTACH) {
            let goal = self.rng.r#gen::<f64>();
            let seconds = self.random_duration();
            self.schedule(target, Attribute::Attach, goal, seconds);
        }
    }

    // --- internals ---

    fn pick_goal(&mut self) -> Option<u32> {
        let symmetry = self.symmetry;
        let candidates = self
            .config
            .symmetry_choices
            .iter()
            .filter(|&&c| c != 0 && c != symmetry);
        let n = candidates.clone().count();
        if n == 0 {
            return None;
        }
        let k = self.rng.gen_range(0..n);
        candidates.copied().nth(k)
    }

    fn random_arc(&mut self) -> f64 {
        let bend = self.config.bend;
        bend + (1.0 - 2.0 * bend) * self.rng.r#gen::<f64>()
    }

    fn random_duration(&mut self) -> f64 {
        self.config.min_duration + self.config.duration_spread * self.rng.r#gen::<f64>()
    }

    fn random_segment(&mut self, radius: f64, max_radius: f64) -> Segment {
        let arc = self.random_arc();
        let attach = self.rng.r#gen::<f64>();
        let direction = Direction::random(&mut self.rng);
        Segment::new(radius, arc, attach, direction, max_radius)
    }
}
