// Spatial node graph for point-to-point navigation.
//
// Nodes are fixed waypoints in world space; edges are undirected and stored
// as mutual neighbor lists. The graph is append-only: levels are built once
// and never edited afterwards. Whether an edge can actually be walked on a
// given frame is decided later by the visibility oracle, not here.

use glam::Vec3;
use thiserror::Error;

/// Stable node identifier. Assigned in insertion order starting at 0.
pub type NodeId = usize;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {id} does not exist (graph has {len} nodes)")]
    UnknownNode { id: NodeId, len: usize },

    #[error("node {0} cannot be connected to itself")]
    SelfLoop(NodeId),
}

// ============================================================================
// NODE
// ============================================================================

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Vec3,
    /// Mutual: if A lists B, B lists A. Never contains `id` itself.
    neighbors: Vec<NodeId>,
}

impl Node {
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

// ============================================================================
// NODE GRAPH
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    nodes: Vec<Node>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node and return its id.
    pub fn add_node(&mut self, position: Vec3) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            position,
            neighbors: Vec::new(),
        });
        id
    }

    /// Connect `a` and `b` in both directions.
    ///
    /// Connecting an already-connected pair is a no-op, so neighbor lists
    /// never hold duplicates.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        if self.nodes[a].neighbors.contains(&b) {
            return Ok(());
        }
        self.nodes[a].neighbors.push(b);
        self.nodes[b].neighbors.push(a);
        Ok(())
    }

    fn check(&self, id: NodeId) -> Result<(), GraphError> {
        if id < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode {
                id,
                len: self.nodes.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// World position of a node.
    ///
    /// # Panics
    /// If `id` is not a node of this graph. Unknown ids are caller bugs.
    #[inline]
    pub fn position(&self, id: NodeId) -> Vec3 {
        self.nodes[id].position
    }

    /// # Panics
    /// If `id` is not a node of this graph.
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].neighbors
    }

    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.node(a).is_some_and(|n| n.neighbors.contains(&b))
    }

    /// Euclidean distance between two nodes. Also the traversal cost of the
    /// edge between them.
    #[inline]
    pub fn distance(&self, a: NodeId, b: NodeId) -> f32 {
        self.position(a).distance(self.position(b))
    }

    /// Every undirected edge exactly once, as `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().flat_map(|node| {
            node.neighbors
                .iter()
                .filter(move |&&nb| nb > node.id)
                .map(move |&nb| (node.id, nb))
        })
    }

    /// Node nearest to `pos` by straight-line distance. Ties go to the lowest
    /// id. `None` only for an empty graph.
    pub fn closest_node(&self, pos: Vec3) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for node in &self.nodes {
            let d = node.position.distance_squared(pos);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((node.id, d)),
            }
        }
        best.map(|(id, _)| id)
    }
}
