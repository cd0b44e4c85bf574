// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whorl Raster: the software side of drawing a [`whorl::Pattern`].
//!
//! - [`Canvas`]: an [`RgbImage`] with a colour key. It implements
//!   [`whorl::Surface`]: arcs are flattened with Kurbo and stamped, rotation
//!   is nearest-neighbour into the rotated bounding box, and compositing
//!   skips keyed pixels.
//! - [`FramePacer`]: sleeps out the rest of each fixed-length frame.
//! - [`Stage`]: a pattern together with its offscreen layer and visible
//!   frame, advanced one frame per [`Stage::tick`].
//!
//! Presenting frames (to a window, a terminal, or a file) is left to the host.
//!
//! ```
//! use rand::{SeedableRng, rngs::SmallRng};
//! use whorl::Config;
//! use whorl_raster::{BLACK, Stage};
//!
//! let mut stage = Stage::new(64, 64, Config::default(), SmallRng::seed_from_u64(1));
//! let frame = stage.tick();
//! assert!(frame.image().pixels().any(|&p| p == BLACK));
//! ```

mod canvas;
mod pacer;
mod stage;

pub use canvas::{BLACK, Canvas, MAGENTA, Rgb, RgbImage, WHITE};
pub use pacer::FramePacer;
pub use stage::Stage;
