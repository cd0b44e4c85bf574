// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-interval frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Keeps a loop running at a fixed frame rate.
///
/// Each call to [`wait`](Self::wait) sleeps for whatever is left of the
/// current frame interval after the work done since the previous call. The
/// pacer aims at a fixed grid of deadlines, so short sleeps do not
/// accumulate drift; if a frame overruns by more than a whole interval the
/// grid restarts from the late frame instead of rushing to catch up.
#[derive(Clone, Debug)]
pub struct FramePacer {
    interval: Duration,
    deadline: Instant,
}

impl FramePacer {
    /// A pacer for `fps` frames per second whose first deadline is one interval from now.
    pub fn new(fps: f64) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    /// A pacer whose first deadline is one interval after `start`.
    pub fn starting_at(fps: f64, start: Instant) -> Self {
        let interval = Duration::from_secs_f64(1.0 / fps);
        Self {
            interval,
            deadline: start + interval,
        }
    }

    /// Length of one frame.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the current frame should end.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Account for a frame finishing its work at `now`.
    ///
    /// Returns how long to sleep before starting the next frame and moves
    /// the deadline on by one interval.
    pub fn step(&mut self, now: Instant) -> Duration {
        let sleep = self.deadline.saturating_duration_since(now);
        let woke = now + sleep;
        self.deadline = if woke > self.deadline + self.interval {
            woke + self.interval
        } else {
            self.deadline + self.interval
        };
        sleep
    }

    /// Sleep out the remainder of the current frame.
    pub fn wait(&mut self) {
        let sleep = self.step(Instant::now());
        if !sleep.is_zero() {
            thread::sleep(sleep);
        }
    }
}
