//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over primitive bounding boxes, stored as an arena of nodes
//! addressed by `u32` handles. The tree only knows primitive indices; the
//! owner supplies the actual intersection test through a closure, so the
//! same structure serves closest-hit and any-hit queries.

use crate::hittable::HitRecord;
use glint_math::{Aabb, Interval, Ray};

/// BVH node - either a branch with two children or a leaf with one primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch { bbox: Aabb, left: u32, right: u32 },
    /// Leaf node referencing a single primitive.
    Leaf { bbox: Aabb, primitive: u32 },
}

impl BvhNode {
    #[inline]
    fn bbox(&self) -> &Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => bbox,
        }
    }
}

/// Arena BVH. An empty hierarchy has no root and never reports a hit.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: Option<u32>,
}

impl Bvh {
    /// Build a hierarchy over primitives given by their bounding boxes.
    ///
    /// Median split: each range is sorted by box centroid along the longest
    /// axis of its union box and cut at `mid = (start + end) / 2`.
    pub fn build(boxes: &[Aabb]) -> Self {
        if boxes.is_empty() {
            return Self::default();
        }

        let mut order: Vec<u32> = (0..boxes.len() as u32).collect();
        let mut nodes = Vec::with_capacity(boxes.len() * 2 - 1);
        let root = Self::build_range(boxes, &mut order, 0, boxes.len() - 1, &mut nodes);

        Self {
            nodes,
            root: Some(root),
        }
    }

    /// Recursive construction over the inclusive range `[start, end]`.
    fn build_range(
        boxes: &[Aabb],
        order: &mut [u32],
        start: usize,
        end: usize,
        nodes: &mut Vec<BvhNode>,
    ) -> u32 {
        if start == end {
            let primitive = order[start];
            nodes.push(BvhNode::Leaf {
                bbox: boxes[primitive as usize],
                primitive,
            });
            return (nodes.len() - 1) as u32;
        }

        let bbox = order[start..=end]
            .iter()
            .fold(Aabb::EMPTY, |acc, &i| Aabb::surrounding(&acc, &boxes[i as usize]));
        let axis = bbox.longest_axis();

        // Stable, so equal centroids keep their input order
        order[start..=end].sort_by(|&a, &b| {
            let a = boxes[a as usize].centroid()[axis];
            let b = boxes[b as usize].centroid()[axis];
            a.total_cmp(&b)
        });

        let mid = (start + end) / 2;
        let left = Self::build_range(boxes, order, start, mid, nodes);
        let right = Self::build_range(boxes, order, mid + 1, end, nodes);

        nodes.push(BvhNode::Branch { bbox, left, right });
        (nodes.len() - 1) as u32
    }

    /// Closest-hit traversal.
    ///
    /// `leaf_test(primitive, ray_t, rec)` must behave like
    /// [`Hittable::hit`](crate::Hittable::hit). After the left subtree hits,
    /// the right subtree is searched with `max` shrunk to that distance.
    pub fn hit<F>(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord, mut leaf_test: F) -> bool
    where
        F: FnMut(usize, Interval, &mut HitRecord) -> bool,
    {
        match self.root {
            Some(root) => self.hit_node(root, ray, ray_t, rec, &mut leaf_test),
            None => false,
        }
    }

    fn hit_node<F>(&self, node: u32, ray: &Ray, ray_t: Interval, rec: &mut HitRecord, leaf_test: &mut F) -> bool
    where
        F: FnMut(usize, Interval, &mut HitRecord) -> bool,
    {
        let node = &self.nodes[node as usize];
        if !node.bbox().hit(ray, ray_t) {
            return false;
        }

        match *node {
            BvhNode::Leaf { primitive, .. } => leaf_test(primitive as usize, ray_t, rec),
            BvhNode::Branch { left, right, .. } => {
                let hit_left = self.hit_node(left, ray, ray_t, rec, leaf_test);
                let right_t = if hit_left { ray_t.with_max(rec.t) } else { ray_t };
                let hit_right = self.hit_node(right, ray, right_t, rec, leaf_test);
                hit_left || hit_right
            }
        }
    }

    /// Any-hit traversal; stops at the first primitive `leaf_test` accepts.
    pub fn occludes<F>(&self, ray: &Ray, ray_t: Interval, mut leaf_test: F) -> bool
    where
        F: FnMut(usize, Interval) -> bool,
    {
        match self.root {
            Some(root) => self.occludes_node(root, ray, ray_t, &mut leaf_test),
            None => false,
        }
    }

    fn occludes_node<F>(&self, node: u32, ray: &Ray, ray_t: Interval, leaf_test: &mut F) -> bool
    where
        F: FnMut(usize, Interval) -> bool,
    {
        let node = &self.nodes[node as usize];
        if !node.bbox().hit(ray, ray_t) {
            return false;
        }

        match *node {
            BvhNode::Leaf { primitive, .. } => leaf_test(primitive as usize, ray_t),
            BvhNode::Branch { left, right, .. } => {
                self.occludes_node(left, ray, ray_t, leaf_test)
                    || self.occludes_node(right, ray, ray_t, leaf_test)
            }
        }
    }

    /// Bounds of the whole hierarchy, `EMPTY` when there is nothing in it.
    pub fn bounding_box(&self) -> Aabb {
        self.root
            .map(|root| *self.nodes[root as usize].bbox())
            .unwrap_or(Aabb::EMPTY)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self.root {
            Some(root) => self.node_depth(root),
            None => 0,
        }
    }

    fn node_depth(&self, node: u32) -> usize {
        match self.nodes[node as usize] {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => {
                1 + self.node_depth(left).max(self.node_depth(right))
            }
        }
    }
}
