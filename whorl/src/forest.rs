// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment arena: structure, splicing, traversal, and drawing.

use alloc::vec::Vec;
use kurbo::Point;

use crate::segment::{Segment, stroke_width};
use crate::surface::Surface;
use crate::types::SegmentId;

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered list of segment trees stored in one arena.
///
/// Segments are addressed by generational [`SegmentId`]s. Parent links are
/// handles too, so a segment never owns its parent; the forest owns every
/// segment.
///
/// Invariant: every child's [`max_radius`](Segment::max_radius) is exactly
/// half its parent's. Structural edits here preserve it; drawing checks it.
#[derive(Clone)]
pub struct Forest {
    nodes: Vec<Option<Segment>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<SegmentId>,
}

impl core::fmt::Debug for Forest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Forest")
            .field("segments_total", &self.nodes.len())
            .field("segments_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

impl Forest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Insert `segment` as the last child of `parent` (or as the last root if `None`).
    ///
    /// Any structural links already present on `segment` are discarded.
    pub fn insert(&mut self, parent: Option<SegmentId>, mut segment: Segment) -> SegmentId {
        segment.parent = None;
        segment.children.clear();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(segment);
            (idx, generation)
        } else {
            self.nodes.push(Some(segment));
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "SegmentId uses 32-bit indices by design."
        )]
        let id = SegmentId::new(idx as u32, generation);
        self.link(id, parent);
        id
    }

    /// Returns true if `id` refers to a live segment.
    pub fn is_alive(&self, id: SegmentId) -> bool {
        self.nodes.get(id.idx()).is_some_and(|n| n.is_some())
            && self.generations.get(id.idx()) == Some(&id.generation())
    }

    /// The segment behind `id`, if it is still alive.
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.idx()].as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.idx()].as_mut()
    }

    /// Access a segment; panics if `id` is stale.
    pub(crate) fn node(&self, id: SegmentId) -> &Segment {
        self.get(id).expect("dangling SegmentId")
    }

    /// Access a segment mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: SegmentId) -> &mut Segment {
        self.get_mut(id).expect("dangling SegmentId")
    }

    /// Top-level segments in drawing order.
    pub fn roots(&self) -> &[SegmentId] {
        &self.roots
    }

    /// Number of live segments.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// True if no segment is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All live segments reachable from the roots, parents before children.
    pub fn depth_first(&self) -> Vec<SegmentId> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<SegmentId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    /// Remove `id` from the forest, handing its children to its parent.
    ///
    /// Each child keeps its subtree but moves up one level: its
    /// `max_radius` (and that of all its descendants) doubles, its `attach`
    /// becomes the removed segment's `attach`, and it is appended to the
    /// parent's children (or to the roots). Returns `false` if `id` was stale.
    pub fn splice_out(&mut self, id: SegmentId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let parent = self.node(id).parent;
        self.unlink(id, parent);
        let (attach, children) = {
            let seg = self.node_mut(id);
            (seg.attach(), core::mem::take(&mut seg.children))
        };
        for child in children {
            self.double_max_radius(child);
            self.node_mut(child).set_attach(attach);
            self.link(child, parent);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
        true
    }

    /// Double the `max_radius` of `id` and every descendant.
    ///
    /// Panics if `id` is stale.
    pub fn double_max_radius(&mut self, id: SegmentId) {
        let children = {
            let seg = self.node_mut(id);
            seg.double_max_radius();
            seg.children.clone()
        };
        for child in children {
            self.double_max_radius(child);
        }
    }

    /// Find a parent/child pair breaking the halving invariant, if any.
    ///
    /// Roots are compared against `root_max_radius`.
    pub fn check_max_radius(&self, root_max_radius: f64) -> Option<(Option<SegmentId>, SegmentId)> {
        if let Some(&root) = self
            .roots
            .iter()
            .find(|&&r| self.node(r).max_radius() != root_max_radius)
        {
            return Some((None, root));
        }
        self.depth_first().into_iter().find_map(|id| {
            let seg = self.node(id);
            seg.children
                .iter()
                .find(|&&c| self.node(c).max_radius() * 2.0 != seg.max_radius())
                .map(|&c| (Some(id), c))
        })
    }

    /// Draw `id` and its subtree, starting at `origin` with frame `angle`.
    ///
    /// Panics if a child's `max_radius` is not exactly half of its parent's;
    /// geometry built on a broken tree is meaningless.
    pub fn draw<S: Surface + ?Sized>(&self, id: SegmentId, surface: &mut S, origin: Point, angle: f64) {
        let seg = self.node(id);
        if seg.arc() > 0.0 {
            if let Some(width) = stroke_width(seg.radius()) {
                surface.stroke_arc(&seg.arc_shape(origin, angle), width);
            }
        }
        for &child_id in &seg.children {
            let child = self.node(child_id);
            assert!(
                child.max_radius() * 2.0 == seg.max_radius(),
                "child max radius {} is not half of parent max radius {}",
                child.max_radius(),
                seg.max_radius(),
            );
            let (child_origin, child_angle) = seg.child_frame(origin, angle, child.attach());
            self.draw(child_id, surface, child_origin, child_angle);
        }
    }

    // --- internals ---

    fn link(&mut self, id: SegmentId, parent: Option<SegmentId>) {
        match parent {
            Some(p) => self.node_mut(p).children.push(id),
            None => self.roots.push(id),
        }
        self.node_mut(id).parent = parent;
    }

    fn unlink(&mut self, id: SegmentId, parent: Option<SegmentId>) {
        match parent {
            Some(p) => self.node_mut(p).children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        self.node_mut(id).parent = None;
    }
}
