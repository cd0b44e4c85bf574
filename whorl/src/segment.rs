// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single curved segment and the geometry it contributes to a drawing.

use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

use kurbo::{Affine, Arc, Point, Vec2};

use crate::types::{Animating, Attribute, Direction, SegmentId};

/// One curved line segment.
///
/// A segment is a circular arc that starts at its origin (a point on its
/// parent's arc, or the pattern centre for roots) and sweeps `arc` of a full
/// turn with the given `radius` and [`Direction`].
///
/// Segments live in a [`Forest`](crate::Forest); the structural links
/// (`parent`, `children`) are handles into that arena.
#[derive(Clone, Debug)]
pub struct Segment {
    radius: f64,
    arc: f64,
    attach: f64,
    direction: Direction,
    max_radius: f64,
    pub(crate) animating: Animating,
    pub(crate) parent: Option<SegmentId>,
    pub(crate) children: Vec<SegmentId>,
}

impl Segment {
    /// Create a detached segment.
    pub fn new(radius: f64, arc: f64, attach: f64, direction: Direction, max_radius: f64) -> Self {
        Self {
            radius,
            arc,
            attach,
            direction,
            max_radius,
            animating: Animating::empty(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Radius of the arc, in pixels.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Fraction of a full turn swept, in `[0, 1]`.
    ///
    /// Zero means the segment is degenerate and about to be removed.
    pub fn arc(&self) -> f64 {
        self.arc
    }

    /// Fraction along the parent's arc where this segment starts, in `[0, 1]`.
    pub fn attach(&self) -> f64 {
        self.attach
    }

    /// Chirality of the curvature.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Upper bound on [`radius`](Self::radius); half the parent's bound.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Attributes that currently have a change in flight.
    pub fn animating(&self) -> Animating {
        self.animating
    }

    /// Structural parent, or `None` for a root.
    pub fn parent(&self) -> Option<SegmentId> {
        self.parent
    }

    /// Children in drawing order.
    pub fn children(&self) -> &[SegmentId] {
        &self.children
    }

    /// Read an animatable attribute.
    pub fn value(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Radius => self.radius,
            Attribute::Arc => self.arc,
            Attribute::Attach => self.attach,
        }
    }

    pub(crate) fn set_value(&mut self, attribute: Attribute, value: f64) {
        match attribute {
            Attribute::Radius => self.radius = value,
            Attribute::Arc => self.arc = value,
            Attribute::Attach => self.attach = value,
        }
    }

    pub(crate) fn set_attach(&mut self, attach: f64) {
        self.attach = attach;
    }

    pub(crate) fn double_max_radius(&mut self) {
        self.max_radius *= 2.0;
    }

    /// The arc this segment draws when it starts at `origin` with its local
    /// frame rotated by `angle` radians (counter-clockwise on screen).
    ///
    /// The returned arc always begins exactly at `origin`.
    pub fn arc_shape(&self, origin: Point, angle: f64) -> Arc {
        let d = self.direction.sign();
        let u = Vec2::from_angle(angle);
        let center = origin - Vec2::new(u.x, -u.y) * (d * self.radius);
        let start_angle = match self.direction {
            Direction::CounterClockwise => -angle,
            Direction::Clockwise => -angle - PI,
        };
        Arc {
            center,
            radii: Vec2::new(self.radius, self.radius),
            start_angle,
            sweep_angle: -d * TAU * self.arc,
            x_rotation: 0.0,
        }
    }

    /// Origin and frame angle for a child attached at `attach` along this
    /// segment's arc, when this segment starts at `origin` with frame `angle`.
    pub fn child_frame(&self, origin: Point, angle: f64, attach: f64) -> (Point, f64) {
        let d = self.direction.sign();
        let turn = TAU * self.arc * attach;
        let u = Vec2::from_angle(turn);
        let local = Point::new(d * self.radius * (u.x - 1.0), -self.radius * u.y);
        let offset = (Affine::rotate(-angle) * local).to_vec2();
        (origin + offset, angle + d * turn)
    }
}

/// Stroke width for an arc of the given radius: `min(2, floor(radius))`.
///
/// Returns `None` when the width would be zero.
pub fn stroke_width(radius: f64) -> Option<f64> {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Only the integral part of a small, non-negative radius matters here."
    )]
    let whole = (radius.max(0.0) as u32).min(2);
    (whole > 0).then_some(f64::from(whole))
}
