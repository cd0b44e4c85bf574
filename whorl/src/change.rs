// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-boxed linear interpolation of one segment attribute.

use crate::forest::Forest;
use crate::types::{Attribute, SegmentId};

/// What happened on one frame of a [`ScheduledChange`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Progress {
    /// Frames remain.
    Running,
    /// The last frame was applied and the animating flag cleared.
    Finished,
    /// An arc change reached a goal of zero: the target must be deleted.
    Collapse,
}

/// A planned change of one attribute of one segment.
///
/// Construction raises the attribute's [`Animating`](crate::Animating) bit on
/// the target; the final [`act`](Self::act) lands exactly on the goal and
/// clears it. If the target is deleted in the meantime the change keeps
/// counting down but no longer touches anything.
#[derive(Clone, Debug)]
pub struct ScheduledChange {
    target: SegmentId,
    attribute: Attribute,
    goal: f64,
    step: f64,
    count: u32,
}

impl ScheduledChange {
    /// Plan a change of `attribute` on `target` towards `goal` over `frames` frames.
    ///
    /// `frames` is clamped to at least one. Returns `None` if `target` is
    /// stale or `attribute` already has a change in flight.
    pub fn new(
        forest: &mut Forest,
        target: SegmentId,
        attribute: Attribute,
        goal: f64,
        frames: u32,
    ) -> Option<Self> {
        let frames = frames.max(1);
        let seg = forest.get_mut(target)?;
        if seg.animating.contains(attribute.flag()) {
            return None;
        }
        seg.animating.insert(attribute.flag());
        let step = (goal - seg.value(attribute)) / f64::from(frames);
        Some(Self {
            target,
            attribute,
            goal,
            step,
            count: frames,
        })
    }

    /// The segment this change animates.
    pub fn target(&self) -> SegmentId {
        self.target
    }

    /// The attribute this change animates.
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Final value of the attribute.
    pub fn goal(&self) -> f64 {
        self.goal
    }

    /// Per-frame delta.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Frames remaining.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Apply one frame.
    pub fn act(&mut self, forest: &mut Forest) -> Progress {
        self.count = self.count.saturating_sub(1);
        let done = self.count == 0;
        let Some(seg) = forest.get_mut(self.target) else {
            return if done {
                Progress::Finished
            } else {
                Progress::Running
            };
        };
        if done {
            seg.set_value(self.attribute, self.goal);
            seg.animating.remove(self.attribute.flag());
        } else {
            seg.set_value(self.attribute, seg.value(self.attribute) + self.step);
        }
        match (done, self.attribute) {
            (false, _) => Progress::Running,
            (true, Attribute::Arc) if self.goal == 0.0 => Progress::Collapse,
            (true, _) => Progress::Finished,
        }
    }
}
