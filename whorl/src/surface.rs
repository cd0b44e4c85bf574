// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing seam between a [`Pattern`](crate::Pattern) and a graphics backend.

use kurbo::{Arc, Point, Size};

/// A pixel buffer the pattern can draw into and composite from.
///
/// The same type serves as the offscreen layer (segments are stroked into it,
/// then it is rotated and composited) and as the visible frame (rotated
/// copies are composited onto it). Backends decide how pixels are stored and
/// presented; `whorl_raster::Canvas` is a software implementation.
pub trait Surface {
    /// Size of the buffer in pixels.
    fn size(&self) -> Size;

    /// Fill the whole buffer with the transparent key colour.
    fn clear(&mut self);

    /// Stroke a circular arc in the ink colour.
    ///
    /// `width` is at least one pixel; callers never ask for empty strokes.
    fn stroke_arc(&mut self, arc: &Arc, width: f64);

    /// A copy of this buffer rotated by `degrees` counter-clockwise on screen.
    ///
    /// The result may be larger than `self`; pixels not covered by the source
    /// are transparent.
    fn rotated(&self, degrees: f64) -> Self
    where
        Self: Sized;

    /// Draw `src` onto this buffer with its top-left corner at `origin`,
    /// skipping transparent pixels. Parts falling outside are clipped.
    fn composite(&mut self, src: &Self, origin: Point)
    where
        Self: Sized;
}
