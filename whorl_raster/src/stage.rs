// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A pattern bundled with the buffers it draws through.

use rand::Rng;
use whorl::{Config, Pattern};

use crate::canvas::{Canvas, Rgb, WHITE};

/// Owns a [`Pattern`], its offscreen layer, and the visible frame.
///
/// [`tick`](Self::tick) is one full frame: clear the frame to the
/// background, draw the pattern through the layer, advance it, and plan.
/// The caller presents the returned frame and paces the loop.
#[derive(Debug)]
pub struct Stage<R> {
    pattern: Pattern<R>,
    layer: Canvas,
    frame: Canvas,
    background: Rgb<u8>,
}

impl<R: Rng> Stage<R> {
    /// A stage of `width` by `height` pixels running a fresh pattern.
    ///
    /// The pattern's `limit` is derived from the frame size.
    pub fn new(width: u32, height: u32, config: Config, rng: R) -> Self {
        let config = Config {
            limit: Config::for_frame(f64::from(width), f64::from(height)).limit,
            ..config
        };
        Self::with_pattern(width, height, Pattern::new(config, rng))
    }

    /// A stage around an existing pattern.
    pub fn with_pattern(width: u32, height: u32, pattern: Pattern<R>) -> Self {
        log::debug!("stage {width}x{height}, limit {}", pattern.config().limit);
        Self {
            pattern,
            layer: Canvas::new(width, height),
            frame: Canvas::new(width, height),
            background: WHITE,
        }
    }

    /// Replace the background colour.
    #[must_use]
    pub fn with_background(mut self, background: Rgb<u8>) -> Self {
        self.background = background;
        self
    }

    /// Render and advance one frame, returning it for presentation.
    pub fn tick(&mut self) -> &Canvas {
        self.frame.fill(self.background);
        self.pattern.tick(&mut self.layer, &mut self.frame);
        &self.frame
    }

    /// The pattern being animated.
    pub fn pattern(&self) -> &Pattern<R> {
        &self.pattern
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &Canvas {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BLACK, MAGENTA};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn ticks_draw_ink_on_background() {
        let mut stage = Stage::new(120, 120, Config::default(), SmallRng::seed_from_u64(9));
        assert_eq!(stage.pattern().config().limit, 24.0);
        let frame = stage.tick();
        let ink = frame.ink_count();
        let paper = frame.image().pixels().filter(|&&p| p == WHITE).count();
        assert!(ink > 0, "the seeded pattern is visible on the first frame");
        assert_eq!(ink + paper, 120 * 120, "the key colour never reaches the frame");
    }

    #[test]
    fn frames_are_symmetric_under_the_fold_count() {
        let mut stage = Stage::new(101, 101, Config::default(), SmallRng::seed_from_u64(10));
        assert_eq!(stage.pattern().folds(), 6);
        let frame = stage.tick().clone();
        // Six-fold symmetry includes the half turn, so both halves carry about the same ink.
        // Nearest-neighbour sampling blurs exact pixel matches.
        let top = (0..50)
            .flat_map(|y| (0..101).map(move |x| (x, y)))
            .filter(|&(x, y)| frame.pixel(x, y) == Some(BLACK))
            .count();
        let bottom = (51..101)
            .flat_map(|y| (0..101).map(move |x| (x, y)))
            .filter(|&(x, y)| frame.pixel(x, y) == Some(BLACK))
            .count();
        let diff = top.abs_diff(bottom);
        assert!(diff * 4 <= top.max(bottom) + 8, "halves differ: {top} vs {bottom}");
    }

    #[test]
    fn long_runs_keep_rendering() {
        let mut stage = Stage::new(80, 80, Config::default(), SmallRng::seed_from_u64(11))
            .with_background(Rgb([10, 20, 30]));
        for _ in 0..300 {
            let frame = stage.tick();
            assert!(frame.image().pixels().all(|&p| p != MAGENTA));
        }
        let pattern = stage.pattern();
        assert_eq!(pattern.complexity(), pattern.forest().len());
    }
}
