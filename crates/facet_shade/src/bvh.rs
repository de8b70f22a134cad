//! Bounding volume hierarchy over the mesh triangles.
//!
//! Prunes the shadow scan with box tests but runs the exact triangle test of
//! the brute-force occluder on whatever survives, so both give the same
//! answer for every ray.

use crate::intersect::{hit_distance, IntersectParams};
use crate::occlusion::Occluder;
use facet_core::Mesh;
use facet_math::{Aabb, Interval, Ray};

/// Maximum triangles per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// Slack added to every triangle box so hits on an edge are never culled.
const TRIANGLE_PAD: f32 = 1e-4;

/// BVH node - either a branch with two children or a leaf with triangle ids.
enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        triangles: Vec<usize>,
        bbox: Aabb,
    },
    Empty,
}

struct Primitive {
    triangle: usize,
    bbox: Aabb,
}

impl BvhNode {
    /// Simple median-split approach: sort by centroid on the longest axis,
    /// split in half, recurse.
    fn build(mut primitives: Vec<Primitive>) -> Self {
        if primitives.is_empty() {
            return BvhNode::Empty;
        }

        let n = primitives.len();
        let bounds = primitives
            .iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::surrounding(&acc, &p.bbox));

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                triangles: primitives.iter().map(|p| p.triangle).collect(),
                bbox: bounds,
            };
        }

        let centroid_bounds = primitives.iter().fold(Aabb::EMPTY, |acc, p| {
            let c = p.bbox.centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        primitives.sort_unstable_by(|a, b| {
            let a_val = a.bbox.centroid()[axis];
            let b_val = b.bbox.centroid()[axis];
            a_val.partial_cmp(&b_val).unwrap_or(std::cmp::Ordering::Equal)
        });

        let right = primitives.split_off(n / 2);

        BvhNode::Branch {
            left: Box::new(Self::build(primitives)),
            right: Box::new(Self::build(right)),
            bbox: bounds,
        }
    }

    fn occluded(&self, mesh: &Mesh, params: &IntersectParams, ray: &Ray, skip: usize) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { triangles, bbox } => {
                if !bbox.hit(ray, Interval::FORWARD) {
                    return false;
                }
                triangles.iter().filter(|&&i| i != skip).any(|&i| {
                    let [v0, v1, v2] = mesh.triangle_positions(i);
                    hit_distance(ray, v0, v1, v2, params).is_some()
                })
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, Interval::FORWARD) {
                    return false;
                }
                left.occluded(mesh, params, ray, skip) || right.occluded(mesh, params, ray, skip)
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
            _ => 1,
        }
    }
}

/// Shadow queries accelerated by a [`BvhNode`] tree.
pub struct BvhOccluder<'a> {
    mesh: &'a Mesh,
    params: IntersectParams,
    root: BvhNode,
}

impl<'a> BvhOccluder<'a> {
    /// Build the tree over every triangle of `mesh`.
    pub fn new(mesh: &'a Mesh, params: IntersectParams) -> Self {
        let primitives = (0..mesh.triangle_count())
            .map(|i| Primitive {
                triangle: i,
                bbox: Aabb::enclosing(&mesh.triangle_positions(i)).expand(TRIANGLE_PAD),
            })
            .collect();

        let bvh = Self {
            mesh,
            params,
            root: BvhNode::build(primitives),
        };
        let bounds = bvh.bounds();
        log::debug!(
            "Built shadow BVH over {} triangles, depth {}, bounds min={:?} max={:?}",
            mesh.triangle_count(),
            bvh.root.depth(),
            [bounds.x.min, bounds.y.min, bounds.z.min],
            [bounds.x.max, bounds.y.max, bounds.z.max]
        );

        bvh
    }

    /// Bounds of the whole tree.
    pub fn bounds(&self) -> Aabb {
        match &self.root {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}

impl Occluder for BvhOccluder<'_> {
    fn occluded(&self, ray: &Ray, skip_triangle: usize) -> bool {
        self.root.occluded(self.mesh, &self.params, ray, skip_triangle)
    }
}
