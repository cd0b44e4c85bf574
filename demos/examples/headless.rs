// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run a seeded pattern without a display and log how it evolves.
//!
//! Renders into an offscreen canvas as fast as possible, prints a summary
//! once per simulated second, and saves the last frame to `whorl.png`.
//! Set `RUST_LOG` to see more: `RUST_LOG=info,whorl=debug` also shows
//! symmetry transitions and reseeds.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p whorl_demos --example headless`

use std::time::Instant;

use anyhow::{Context, Result, ensure};
use rand::SeedableRng;
use rand::rngs::StdRng;
use whorl::Config;
use whorl_raster::Stage;

const SIZE: u32 = 300;
const SECONDS: u32 = 60;
const SEED: u64 = 0x5eed;
const OUTPUT: &str = "whorl.png";

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::default();
    let fps = config.fps;
    let mut stage = Stage::new(SIZE, SIZE, config, StdRng::seed_from_u64(SEED));
    let frames = config_frames(fps, SECONDS);
    log::info!("running {frames} frames of a {SIZE}x{SIZE} pattern, seed {SEED:#x}");

    let started = Instant::now();
    let mut peak = 0;
    for frame in 1..=frames {
        let ink = stage.tick().ink_count();
        let pattern = stage.pattern();
        peak = peak.max(pattern.complexity());
        ensure!(
            pattern.complexity() == pattern.forest().len(),
            "complexity {} drifted from {} live segments",
            pattern.complexity(),
            pattern.forest().len()
        );
        if frame % frames_per_second(fps) == 0 {
            log::info!(
                "t={:>3}s segments={:<4} changes={:<4} symmetry={} folds={} spin={:+.3} ink={ink}",
                frame / frames_per_second(fps),
                pattern.complexity(),
                pattern.changes().len(),
                pattern.symmetry(),
                pattern.folds(),
                pattern.spin(),
            );
        }
    }

    let elapsed = started.elapsed();
    log::info!(
        "done: {frames} frames in {elapsed:.2?} ({:.0} fps), peak {peak} segments",
        f64::from(frames) / elapsed.as_secs_f64()
    );

    stage
        .frame()
        .image()
        .save(OUTPUT)
        .with_context(|| format!("failed to write {OUTPUT}"))?;
    log::info!("last frame written to {OUTPUT}");
    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Frame rates are small positive numbers."
)]
fn frames_per_second(fps: f64) -> u32 {
    (fps.round() as u32).max(1)
}

fn config_frames(fps: f64, seconds: u32) -> u32 {
    frames_per_second(fps) * seconds
}
