// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An image buffer implementing [`Surface`].

pub use image::{Rgb, RgbImage};

use image::ImageBuffer;
use kurbo::{Affine, Arc, PathEl, Point, Shape, Size, Vec2};
use whorl::Surface;

/// Accuracy of the Bézier approximation of arcs, in pixels.
const ARC_ACCURACY: f64 = 0.1;
/// Flattening tolerance for stroking, in pixels.
const FLATTEN_TOLERANCE: f64 = 0.25;
/// Distance between stamps along a stroked line, in pixels.
const STAMP_SPACING: f64 = 0.5;
/// Slack when sizing rotated buffers, so exact right angles do not grow by a pixel.
const SIZE_EPSILON: f64 = 1e-6;

/// Black, the default ink.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
/// White, the default background.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Magenta, the default transparent key.
pub const MAGENTA: Rgb<u8> = Rgb([255, 0, 255]);

/// An [`RgbImage`] with a colour key for transparency.
///
/// Pixels equal to [`key`](Self::key) are skipped when the canvas is
/// composited onto another. Arcs are stroked in [`ink`](Self::ink).
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    image: RgbImage,
    ink: Rgb<u8>,
    key: Rgb<u8>,
}

impl Canvas {
    /// A canvas filled with its key, drawing in black and keyed on magenta.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_colors(width, height, BLACK, MAGENTA)
    }

    /// A canvas filled with `key`, drawing in `ink`.
    pub fn with_colors(width: u32, height: u32, ink: Rgb<u8>, key: Rgb<u8>) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width, height, key),
            ink,
            key,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Stroke colour.
    pub fn ink(&self) -> Rgb<u8> {
        self.ink
    }

    /// Transparent colour.
    pub fn key(&self) -> Rgb<u8> {
        self.key
    }

    /// The backing image.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgb<u8>) {
        for p in self.image.pixels_mut() {
            *p = color;
        }
    }

    /// The pixel at `(x, y)`, if inside.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Set the pixel at `(x, y)`; ignored outside the canvas.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(p) = self.image.get_pixel_mut_checked(x, y) {
            *p = color;
        }
    }

    /// Number of pixels not equal to the key.
    pub fn opaque_count(&self) -> usize {
        self.image.pixels().filter(|&&p| p != self.key).count()
    }

    /// Number of pixels equal to the ink colour.
    pub fn ink_count(&self) -> usize {
        self.image.pixels().filter(|&&p| p == self.ink).count()
    }

    fn sample(&self, x: i64, y: i64) -> Option<Rgb<u8>> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        self.pixel(x, y)
    }

    fn stamp(&mut self, center: Point, radius: f64) {
        // Half a pixel diagonal of slack so thin strokes never fall between pixel centres.
        let reach = radius * radius + 0.5;
        let span = reach.sqrt();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Stamp bounds are pixel coordinates of a bounded canvas."
        )]
        let (x0, x1, y0, y1) = (
            (center.x - span).floor() as i64,
            (center.x + span).ceil() as i64,
            (center.y - span).floor() as i64,
            (center.y + span).ceil() as i64,
        );
        for y in y0..=y1 {
            for x in x0..=x1 {
                let pixel_center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if (pixel_center - center).hypot2() <= reach {
                    self.set_pixel(x, y, self.ink);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64) {
        let length = (to - from).hypot();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Line lengths are bounded by the canvas diagonal."
        )]
        let steps = ((length / STAMP_SPACING).ceil() as u32).max(1);
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.stamp(from.lerp(to, t), width / 2.0);
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    fn clear(&mut self) {
        self.fill(self.key);
    }

    fn stroke_arc(&mut self, arc: &Arc, width: f64) {
        let path = arc.to_path(ARC_ACCURACY);
        let mut last = None;
        let mut start = None;
        kurbo::flatten(&path, FLATTEN_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => {
                last = Some(p);
                start = Some(p);
            }
            PathEl::LineTo(p) => {
                if let Some(from) = last {
                    self.stroke_line(from, p, width);
                }
                last = Some(p);
            }
            PathEl::ClosePath => {
                if let (Some(from), Some(to)) = (last, start) {
                    self.stroke_line(from, to, width);
                }
                last = start;
            }
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
    }

    fn rotated(&self, degrees: f64) -> Self {
        let theta = degrees.to_radians();
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        let (sin, cos) = theta.sin_cos();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "A rotated canvas is at most 1.5 times larger on each side."
        )]
        let (new_w, new_h) = (
            ((w * cos.abs() + h * sin.abs()) - SIZE_EPSILON).ceil().max(0.0) as u32,
            ((w * sin.abs() + h * cos.abs()) - SIZE_EPSILON).ceil().max(0.0) as u32,
        );

        // Counter-clockwise on screen is a negative kurbo rotation with y pointing down.
        let forward = Affine::translate(Vec2::new(f64::from(new_w) / 2.0, f64::from(new_h) / 2.0))
            * Affine::rotate(-theta)
            * Affine::translate(Vec2::new(-w / 2.0, -h / 2.0));
        let back = forward.inverse();
        let image = ImageBuffer::from_fn(new_w, new_h, |x, y| {
            let src = back * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Source coordinates are bounded by the canvas size."
            )]
            let (sx, sy) = (src.x.floor() as i64, src.y.floor() as i64);
            self.sample(sx, sy).unwrap_or(self.key)
        });
        Self {
            image,
            ink: self.ink,
            key: self.key,
        }
    }

    fn composite(&mut self, src: &Self, origin: Point) {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Composite offsets are pixel coordinates."
        )]
        let (ox, oy) = (origin.x.floor() as i64, origin.y.floor() as i64);
        for (x, y, &color) in src.image.enumerate_pixels() {
            if color != src.key {
                self.set_pixel(ox + i64::from(x), oy + i64::from(y), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.image().pixels().count(), 12);
        assert_eq!(canvas.opaque_count(), 0);
        assert_eq!(canvas.pixel(3, 2), Some(MAGENTA));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn writes_outside_the_image_are_ignored() {
        let mut canvas = Canvas::new(3, 3);
        canvas.set_pixel(-1, 0, BLACK);
        canvas.set_pixel(0, 3, BLACK);
        canvas.set_pixel(i64::from(u32::MAX) + 1, 1, BLACK);
        assert_eq!(canvas.opaque_count(), 0);
        canvas.set_pixel(2, 1, BLACK);
        assert_eq!(canvas.image().get_pixel(2, 1), &BLACK);
        assert_eq!(canvas.ink_count(), 1);
    }

    #[test]
    fn stroked_arc_stays_on_its_circle() {
        let mut canvas = Canvas::new(100, 100);
        let arc = Arc {
            center: Point::new(50.0, 50.0),
            radii: Vec2::new(30.0, 30.0),
            start_angle: 0.0,
            sweep_angle: PI,
            x_rotation: 0.0,
        };
        canvas.stroke_arc(&arc, 2.0);
        assert!(canvas.opaque_count() > 90, "half a circle of radius 30 covers many pixels");
        assert_eq!(canvas.ink_count(), canvas.opaque_count());
        for y in 0..100 {
            for x in 0..100 {
                if canvas.pixel(x, y) == Some(BLACK) {
                    let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                    let d = (p - arc.center).hypot();
                    assert!((d - 30.0).abs() < 2.5, "ink at ({x}, {y}) is {d} from the centre");
                    assert!(p.y >= 47.0, "a positive sweep from angle 0 covers the lower half");
                }
            }
        }
    }

    #[test]
    fn thin_strokes_are_continuous() {
        let mut canvas = Canvas::new(40, 5);
        canvas.stroke_line(Point::new(2.0, 2.5), Point::new(37.0, 2.5), 1.0);
        for x in 2..37 {
            assert_eq!(canvas.pixel(x, 2), Some(BLACK), "gap at x = {x}");
        }
    }

    #[test]
    fn rotation_by_right_angles_keeps_or_swaps_size() {
        let canvas = Canvas::new(10, 4);
        let same = canvas.rotated(0.0);
        assert_eq!((same.width(), same.height()), (10, 4));
        let quarter = canvas.rotated(90.0);
        assert_eq!((quarter.width(), quarter.height()), (4, 10));
        let full = canvas.rotated(360.0);
        assert_eq!((full.width(), full.height()), (10, 4));
        let diagonal = canvas.rotated(45.0);
        assert_eq!((diagonal.width(), diagonal.height()), (10, 10));
    }

    #[test]
    fn rotation_is_counter_clockwise_on_screen() {
        // A dot right of centre moves above centre after a quarter turn.
        let mut canvas = Canvas::new(11, 11);
        canvas.set_pixel(9, 5, BLACK);
        let rotated = canvas.rotated(90.0);
        assert_eq!(rotated.pixel(5, 1), Some(BLACK));
        assert_eq!(rotated.opaque_count(), 1);
    }

    #[test]
    fn rotation_fills_uncovered_pixels_with_key() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill(WHITE);
        let rotated = canvas.rotated(45.0);
        assert_eq!(rotated.pixel(0, 0), Some(MAGENTA), "corners are uncovered");
        assert_eq!(rotated.pixel(7, 7), Some(WHITE), "the middle is covered");
    }

    #[test]
    fn composite_skips_key_and_clips() {
        let mut frame = Canvas::with_colors(6, 6, BLACK, MAGENTA);
        frame.fill(WHITE);
        let mut layer = Canvas::new(4, 4);
        layer.set_pixel(0, 0, BLACK);
        layer.set_pixel(3, 3, BLACK);
        frame.composite(&layer, Point::new(3.0, 3.0));
        assert_eq!(frame.pixel(3, 3), Some(BLACK));
        assert_eq!(frame.pixel(4, 4), Some(WHITE), "keyed pixels leave the frame alone");
        assert_eq!(
            frame.ink_count(),
            1,
            "the second dot falls outside"
        );

        let mut negative = Canvas::with_colors(4, 4, BLACK, MAGENTA);
        negative.fill(WHITE);
        negative.composite(&layer, Point::new(-3.0, -3.0));
        assert_eq!(negative.pixel(0, 0), Some(BLACK), "(3, 3) lands on the corner");
    }
}
