// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for growth, decay, spin, and symmetry transitions.

/// Parameters of a [`Pattern`](crate::Pattern).
///
/// Durations are in seconds and rates in events per second; the pattern
/// converts them to frames and per-frame probabilities with [`fps`](Self::fps),
/// so changing the frame rate keeps the real-time speed of the animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Frames per second the host ticks at. Must be positive and finite.
    pub fps: f64,
    /// `max_radius` of root segments, in pixels.
    pub limit: f64,
    /// Overall mutation pressure: scales both branching and decay.
    pub flux: f64,
    /// Stability: larger values favour branching and disfavour decay.
    pub stable: f64,
    /// Margin keeping random arc goals away from `0` and `1`.
    pub bend: f64,
    /// Initial rotational fold count. Must be at least 1.
    pub symmetry: u32,
    /// Fold counts a symmetry transition may target. Zeros are never picked.
    pub symmetry_choices: &'static [u32],
    /// Expected symmetry transitions started per second while idle.
    pub retarget_rate: f64,
    /// Expected spin perturbations per second.
    pub spin_rate: f64,
    /// Factor applied to the spin after each perturbation.
    pub spin_damping: f64,
    /// Shortest attribute change.
    pub min_duration: f64,
    /// Random extra length added to an attribute change, up to this much.
    pub duration_spread: f64,
    /// Shortest symmetry transition; transitions last between one and two times this.
    pub transition_base_seconds: f64,
    /// Duration of the radius growth that follows a reseed.
    pub reseed_seconds: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60.0,
            limit: 100.0,
            flux: 0.5,
            stable: 20.0,
            bend: 0.3,
            symmetry: 6,
            symmetry_choices: &[4, 6, 8],
            retarget_rate: 0.1,
            spin_rate: 1.0,
            spin_damping: 0.9,
            min_duration: 0.5,
            duration_spread: 2.0,
            transition_base_seconds: 5.0,
            reseed_seconds: 0.5,
        }
    }
}

impl Config {
    /// Defaults sized for a visible frame of `width` by `height` pixels.
    ///
    /// Roots may grow to a fifth of the shorter side.
    pub fn for_frame(width: f64, height: f64) -> Self {
        Self {
            limit: width.min(height) / 5.0,
            ..Self::default()
        }
    }

    /// Replace the frame rate.
    #[must_use]
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Probability of an event with the given per-second rate happening in one frame.
    pub fn per_frame(&self, rate: f64) -> f64 {
        (rate / self.fps).clamp(0.0, 1.0)
    }

    /// Whole frames covering `seconds`, never fewer than one.
    pub fn frames(&self, seconds: f64) -> u32 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Durations are a few seconds at interactive frame rates."
        )]
        let frames = (seconds * self.fps) as u32;
        frames.max(1)
    }
}
