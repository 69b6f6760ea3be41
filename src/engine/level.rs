// Hand-built levels.

use glam::Vec3;

use super::graph::{GraphError, NodeGraph, NodeId};

/// Spacing between consecutive nodes of the L level, in world units.
pub const STEP: f32 = 1.0;

pub struct Level {
    pub graph: NodeGraph,
    /// Where the player starts.
    pub spawn: NodeId,
    /// The edge that only works when the camera lines its ends up.
    pub illusion_edge: (NodeId, NodeId),
}

/// Five nodes in an L: three along +X on the ground, then two climbing +Y.
/// Consecutive nodes are linked, plus one shortcut between the two far ends.
///
/// ```text
///            4
///            |
///            3
///            |
///  0 -- 1 -- 2      (0 and 4 joined directly)
/// ```
pub fn build_l_level() -> Result<Level, GraphError> {
    let mut graph = NodeGraph::new();
    let corners = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(STEP, 0.0, 0.0),
        Vec3::new(2.0 * STEP, 0.0, 0.0),
        Vec3::new(2.0 * STEP, STEP, 0.0),
        Vec3::new(2.0 * STEP, 2.0 * STEP, 0.0),
    ];
    let ids: Vec<NodeId> = corners.iter().map(|&p| graph.add_node(p)).collect();

    for pair in ids.windows(2) {
        graph.add_edge(pair[0], pair[1])?;
    }
    let illusion_edge = (ids[0], ids[4]);
    graph.add_edge(illusion_edge.0, illusion_edge.1)?;

    Ok(Level {
        graph,
        spawn: ids[0],
        illusion_edge,
    })
}
