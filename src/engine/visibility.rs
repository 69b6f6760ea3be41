// Projection visibility oracle.
//
// An edge is "active" when its two endpoints land close together on screen
// under the current camera, so the walk between them reads as continuous.
// The on-screen tolerance scales inversely with fovy: zooming in (smaller
// fovy) widens the tolerance so alignment survives the zoom.

use glam::Vec2;

use super::camera::CameraState;
use super::graph::{NodeGraph, NodeId};

/// Screen-space gap (pixels) below which an edge is active at the reference fov.
pub const BASE_THRESHOLD: f32 = 80.0;
/// Field of view (degrees) at which `BASE_THRESHOLD` applies unscaled.
pub const REFERENCE_FOV: f32 = 45.0;
/// Max distance (pixels) between pointer and a node's projection for a pick.
pub const PICK_RADIUS: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityConfig {
    pub base_threshold: f32,
    pub reference_fov: f32,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            base_threshold: BASE_THRESHOLD,
            reference_fov: REFERENCE_FOV,
        }
    }
}

impl VisibilityConfig {
    /// Active-edge tolerance in pixels for a camera with the given fovy.
    pub fn threshold(&self, fovy: f32) -> f32 {
        self.base_threshold * (self.reference_fov / fovy.max(f32::EPSILON))
    }

    pub fn is_gap_active(&self, gap: f32, fovy: f32) -> bool {
        gap < self.threshold(fovy)
    }
}

/// Distance in pixels between the projections of nodes `a` and `b`.
pub fn screen_gap(graph: &NodeGraph, a: NodeId, b: NodeId, camera: &CameraState) -> f32 {
    let pa = camera.world_to_screen(graph.position(a));
    let pb = camera.world_to_screen(graph.position(b));
    pa.distance(pb)
}

/// Stateless check used once per candidate edge per search step.
pub fn is_edge_active(
    graph: &NodeGraph,
    a: NodeId,
    b: NodeId,
    camera: &CameraState,
    config: &VisibilityConfig,
) -> bool {
    config.is_gap_active(screen_gap(graph, a, b, camera), camera.fovy)
}

// ============================================================================
// EDGE ORACLE
// ============================================================================

/// Decides which static edges may be walked right now.
pub trait EdgeOracle {
    fn is_active(&self, graph: &NodeGraph, a: NodeId, b: NodeId) -> bool;
}

impl<F> EdgeOracle for F
where
    F: Fn(&NodeGraph, NodeId, NodeId) -> bool,
{
    fn is_active(&self, graph: &NodeGraph, a: NodeId, b: NodeId) -> bool {
        self(graph, a, b)
    }
}

/// Oracle backed by screen projection under one camera snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionOracle<'a> {
    pub camera: &'a CameraState,
    pub config: VisibilityConfig,
}

impl<'a> ProjectionOracle<'a> {
    pub fn new(camera: &'a CameraState, config: VisibilityConfig) -> Self {
        Self { camera, config }
    }
}

impl EdgeOracle for ProjectionOracle<'_> {
    fn is_active(&self, graph: &NodeGraph, a: NodeId, b: NodeId) -> bool {
        is_edge_active(graph, a, b, self.camera, &self.config)
    }
}

/// All static edges the oracle currently lets through, as `(low, high)`.
pub fn active_edges(graph: &NodeGraph, oracle: &impl EdgeOracle) -> Vec<(NodeId, NodeId)> {
    graph
        .edges()
        .filter(|&(a, b)| oracle.is_active(graph, a, b))
        .collect()
}

// ============================================================================
// PICKING
// ============================================================================

/// Resolve a pointer position to the node whose projection is nearest to it,
/// if any node lies within `radius` pixels. Ties go to the lowest id.
pub fn closest_clicked_node(
    graph: &NodeGraph,
    camera: &CameraState,
    pointer: Vec2,
    radius: f32,
) -> Option<NodeId> {
    let mut best: Option<(NodeId, f32)> = None;
    for node in graph.nodes() {
        let d = camera.world_to_screen(node.position).distance(pointer);
        if d > radius {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((node.id, d)),
        }
    }
    best.map(|(id, _)| id)
}
